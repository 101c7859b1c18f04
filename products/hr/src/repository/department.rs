use async_trait::async_trait;
use chrono::Utc;
use entity::department;
use platform_db::DbPool;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, prelude::DateTimeWithTimeZone,
};
use tracing::instrument;
use uuid::Uuid;

use super::RepoError;
use crate::{code::CodeKind, input::DepartmentInput, lookup::Lookup};

pub struct DepartmentRepository<'a> {
    db: &'a DbPool,
}

impl<'a> DepartmentRepository<'a> {
    pub fn new(db: &'a DbPool) -> Self {
        Self { db }
    }

    /// Code following the greatest stored one.
    #[instrument(name = "repo.department.next_code", skip_all)]
    pub async fn next_code(&self) -> Result<String, RepoError> {
        let latest: Option<String> = department::Entity::find()
            .select_only()
            .column(department::Column::DepartmentCode)
            .order_by_desc(department::Column::DepartmentCode)
            .limit(1)
            .into_tuple()
            .one(self.db)
            .await?;
        Ok(CodeKind::Department.next_after(latest.as_deref())?)
    }

    #[instrument(name = "repo.department.list_all", skip_all)]
    pub async fn list_all(&self) -> Result<Vec<department::Model>, DbErr> {
        department::Entity::find()
            .order_by_asc(department::Column::DepartmentCode)
            .all(self.db)
            .await
    }

    #[instrument(name = "repo.department.get", skip(self))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<department::Model>, DbErr> {
        department::Entity::find_by_id(id).one(self.db).await
    }

    /// Stores a new row under a freshly generated id.
    #[instrument(name = "repo.department.insert", skip_all)]
    pub async fn insert(&self, input: DepartmentInput) -> Result<department::Model, DbErr> {
        let now: DateTimeWithTimeZone = Utc::now().into();
        department::ActiveModel {
            department_id: Set(Uuid::new_v4()),
            department_code: Set(input.department_code),
            department_name: Set(input.department_name),
            description: Set(input.description),
            created_date: Set(Some(input.created_date.unwrap_or(now))),
            created_by: Set(input.created_by),
            modified_date: Set(Some(now)),
            modified_by: Set(input.modified_by),
        }
        .insert(self.db)
        .await
    }

    /// Overwrites every column of `existing` from `input`; only the creation audit
    /// fields fall back to the stored values when the payload leaves them out.
    #[instrument(name = "repo.department.update", skip_all, fields(id = %existing.department_id))]
    pub async fn update(
        &self,
        existing: department::Model,
        input: DepartmentInput,
    ) -> Result<department::Model, DbErr> {
        department::ActiveModel {
            department_id: Set(existing.department_id),
            department_code: Set(input.department_code),
            department_name: Set(input.department_name),
            description: Set(input.description),
            created_date: Set(input.created_date.or(existing.created_date)),
            created_by: Set(input.created_by.or(existing.created_by)),
            modified_date: Set(Some(Utc::now().into())),
            modified_by: Set(input.modified_by),
        }
        .update(self.db)
        .await
    }

    /// Number of rows removed; zero when the id was unknown.
    #[instrument(name = "repo.department.delete", skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<u64, DbErr> {
        let result = department::Entity::delete_by_id(id).exec(self.db).await?;
        Ok(result.rows_affected)
    }
}

#[async_trait]
impl Lookup for DepartmentRepository<'_> {
    async fn code_exists(&self, code: &str, except: Option<Uuid>) -> Result<bool, DbErr> {
        let mut query =
            department::Entity::find().filter(department::Column::DepartmentCode.eq(code));
        if let Some(id) = except {
            query = query.filter(department::Column::DepartmentId.ne(id));
        }
        Ok(query.count(self.db).await? > 0)
    }

    async fn id_exists(&self, id: Uuid) -> Result<bool, DbErr> {
        let count = department::Entity::find_by_id(id).count(self.db).await?;
        Ok(count > 0)
    }
}
