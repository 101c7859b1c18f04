use async_trait::async_trait;
use chrono::Utc;
use entity::employee;
use platform_db::DbPool;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, prelude::DateTimeWithTimeZone,
};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::RepoError;
use crate::{
    code::CodeKind,
    input::EmployeeInput,
    lookup::Lookup,
    query::{EmployeeFiltered, EmployeeQueryParams},
};

pub struct EmployeeRepository<'a> {
    db: &'a DbPool,
}

impl<'a> EmployeeRepository<'a> {
    pub fn new(db: &'a DbPool) -> Self {
        Self { db }
    }

    #[instrument(name = "repo.employee.next_code", skip_all)]
    pub async fn next_code(&self) -> Result<String, RepoError> {
        let latest: Option<String> = employee::Entity::find()
            .select_only()
            .column(employee::Column::EmployeeCode)
            .order_by_desc(employee::Column::EmployeeCode)
            .limit(1)
            .into_tuple()
            .one(self.db)
            .await?;
        Ok(CodeKind::Employee.next_after(latest.as_deref())?)
    }

    #[instrument(name = "repo.employee.list_all", skip_all)]
    pub async fn list_all(&self) -> Result<Vec<employee::Model>, DbErr> {
        employee::Entity::find()
            .order_by_asc(employee::Column::EmployeeCode)
            .all(self.db)
            .await
    }

    /// Counts every match first, then loads the requested page ordered by code.
    /// A page past the end yields an empty list with the full totals.
    #[instrument(name = "repo.employee.list_filtered", skip_all)]
    pub async fn list_filtered(
        &self,
        params: &EmployeeQueryParams,
    ) -> Result<EmployeeFiltered, DbErr> {
        let page = params.page();
        let total = employee::Entity::find()
            .filter(params.condition())
            .count(self.db)
            .await?;
        let employees = if page.offset() >= total {
            Vec::new()
        } else {
            employee::Entity::find()
                .filter(params.condition())
                .order_by_asc(employee::Column::EmployeeCode)
                .offset(page.offset())
                .limit(page.size)
                .all(self.db)
                .await?
        };
        debug!(total, page = page.number, size = page.size, "employee page loaded");
        Ok(EmployeeFiltered::new(total, page, employees))
    }

    /// Employees still assigned to the department.
    #[instrument(name = "repo.employee.count_in_department", skip(self))]
    pub async fn count_in_department(&self, department_id: Uuid) -> Result<u64, DbErr> {
        employee::Entity::find()
            .filter(employee::Column::DepartmentId.eq(department_id))
            .count(self.db)
            .await
    }

    #[instrument(name = "repo.employee.count_in_position", skip(self))]
    pub async fn count_in_position(&self, position_id: Uuid) -> Result<u64, DbErr> {
        employee::Entity::find()
            .filter(employee::Column::PositionId.eq(position_id))
            .count(self.db)
            .await
    }

    #[instrument(name = "repo.employee.get", skip(self))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<employee::Model>, DbErr> {
        employee::Entity::find_by_id(id).one(self.db).await
    }

    /// Expects a validated payload: both references are present.
    #[instrument(name = "repo.employee.insert", skip_all)]
    pub async fn insert(&self, input: EmployeeInput) -> Result<employee::Model, DbErr> {
        let now: DateTimeWithTimeZone = Utc::now().into();
        let created_date = input.created_date.unwrap_or(now);
        let created_by = input.created_by.clone();
        let mut model = active_model(Uuid::new_v4(), input, now);
        model.created_date = Set(Some(created_date));
        model.created_by = Set(created_by);
        model.insert(self.db).await
    }

    #[instrument(name = "repo.employee.update", skip_all, fields(id = %existing.employee_id))]
    pub async fn update(
        &self,
        existing: employee::Model,
        input: EmployeeInput,
    ) -> Result<employee::Model, DbErr> {
        let created_date = input.created_date.or(existing.created_date);
        let created_by = input.created_by.clone().or(existing.created_by);
        let mut model = active_model(existing.employee_id, input, Utc::now().into());
        model.created_date = Set(created_date);
        model.created_by = Set(created_by);
        model.update(self.db).await
    }

    #[instrument(name = "repo.employee.delete", skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<u64, DbErr> {
        let result = employee::Entity::delete_by_id(id).exec(self.db).await?;
        Ok(result.rows_affected)
    }
}

fn active_model(
    id: Uuid,
    input: EmployeeInput,
    modified: DateTimeWithTimeZone,
) -> employee::ActiveModel {
    employee::ActiveModel {
        employee_id: Set(id),
        employee_code: Set(input.employee_code),
        full_name: Set(input.full_name),
        email: Set(input.email),
        phone_number: Set(input.phone_number),
        identity_number: Set(input.identity_number),
        position_id: Set(input.position_id.unwrap_or_default()),
        department_id: Set(input.department_id.unwrap_or_default()),
        date_of_birth: Set(input.date_of_birth),
        gender: Set(input.gender),
        telephone_number: Set(input.telephone_number),
        address: Set(input.address),
        identity_date: Set(input.identity_date),
        identity_place: Set(input.identity_place),
        bank_account: Set(input.bank_account),
        bank_name: Set(input.bank_name),
        branch: Set(input.branch),
        created_date: Set(None),
        created_by: Set(None),
        modified_date: Set(Some(modified)),
        modified_by: Set(input.modified_by),
    }
}

#[async_trait]
impl Lookup for EmployeeRepository<'_> {
    async fn code_exists(&self, code: &str, except: Option<Uuid>) -> Result<bool, DbErr> {
        let mut query = employee::Entity::find().filter(employee::Column::EmployeeCode.eq(code));
        if let Some(id) = except {
            query = query.filter(employee::Column::EmployeeId.ne(id));
        }
        Ok(query.count(self.db).await? > 0)
    }

    async fn id_exists(&self, id: Uuid) -> Result<bool, DbErr> {
        let count = employee::Entity::find_by_id(id).count(self.db).await?;
        Ok(count > 0)
    }
}
