use async_trait::async_trait;
use chrono::Utc;
use entity::position;
use platform_db::DbPool;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, prelude::DateTimeWithTimeZone,
};
use tracing::instrument;
use uuid::Uuid;

use super::RepoError;
use crate::{code::CodeKind, input::PositionInput, lookup::Lookup};

pub struct PositionRepository<'a> {
    db: &'a DbPool,
}

impl<'a> PositionRepository<'a> {
    pub fn new(db: &'a DbPool) -> Self {
        Self { db }
    }

    /// Code following the greatest stored one.
    #[instrument(name = "repo.position.next_code", skip_all)]
    pub async fn next_code(&self) -> Result<String, RepoError> {
        let latest: Option<String> = position::Entity::find()
            .select_only()
            .column(position::Column::PositionCode)
            .order_by_desc(position::Column::PositionCode)
            .limit(1)
            .into_tuple()
            .one(self.db)
            .await?;
        Ok(CodeKind::Position.next_after(latest.as_deref())?)
    }

    #[instrument(name = "repo.position.list_all", skip_all)]
    pub async fn list_all(&self) -> Result<Vec<position::Model>, DbErr> {
        position::Entity::find()
            .order_by_asc(position::Column::PositionCode)
            .all(self.db)
            .await
    }

    #[instrument(name = "repo.position.get", skip(self))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<position::Model>, DbErr> {
        position::Entity::find_by_id(id).one(self.db).await
    }

    /// Stores a new row under a freshly generated id.
    #[instrument(name = "repo.position.insert", skip_all)]
    pub async fn insert(&self, input: PositionInput) -> Result<position::Model, DbErr> {
        let now: DateTimeWithTimeZone = Utc::now().into();
        position::ActiveModel {
            position_id: Set(Uuid::new_v4()),
            position_code: Set(input.position_code),
            position_name: Set(input.position_name),
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
    #[instrument(name = "repo.position.update", skip_all, fields(id = %existing.position_id))]
    pub async fn update(
        &self,
        existing: position::Model,
        input: PositionInput,
    ) -> Result<position::Model, DbErr> {
        position::ActiveModel {
            position_id: Set(existing.position_id),
            position_code: Set(input.position_code),
            position_name: Set(input.position_name),
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
    #[instrument(name = "repo.position.delete", skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<u64, DbErr> {
        let result = position::Entity::delete_by_id(id).exec(self.db).await?;
        Ok(result.rows_affected)
    }
}

#[async_trait]
impl Lookup for PositionRepository<'_> {
    async fn code_exists(&self, code: &str, except: Option<Uuid>) -> Result<bool, DbErr> {
        let mut query =
            position::Entity::find().filter(position::Column::PositionCode.eq(code));
        if let Some(id) = except {
            query = query.filter(position::Column::PositionId.ne(id));
        }
        Ok(query.count(self.db).await? > 0)
    }

    async fn id_exists(&self, id: Uuid) -> Result<bool, DbErr> {
        let count = position::Entity::find_by_id(id).count(self.db).await?;
        Ok(count > 0)
    }
}
