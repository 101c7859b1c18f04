use sea_orm::prelude::{Date, DateTimeWithTimeZone, *};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employee")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub employee_id: Uuid,
    #[sea_orm(unique)]
    pub employee_code: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub identity_number: String,
    #[sea_orm(indexed)]
    pub position_id: Uuid,
    #[sea_orm(indexed)]
    pub department_id: Uuid,
    pub date_of_birth: Option<Date>,
    pub gender: Option<i32>,
    pub telephone_number: Option<String>,
    pub address: Option<String>,
    pub identity_date: Option<Date>,
    pub identity_place: Option<String>,
    pub bank_account: Option<String>,
    pub bank_name: Option<String>,
    pub branch: Option<String>,
    pub created_date: Option<DateTimeWithTimeZone>,
    pub created_by: Option<String>,
    pub modified_date: Option<DateTimeWithTimeZone>,
    pub modified_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Department,
    Position,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Department => Entity::belongs_to(super::department::Entity)
                .from(Column::DepartmentId)
                .to(super::department::Column::DepartmentId)
                .into(),
            Self::Position => Entity::belongs_to(super::position::Entity)
                .from(Column::PositionId)
                .to(super::position::Column::PositionId)
                .into(),
        }
    }
}

impl Related<super::department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::position::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Position.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
