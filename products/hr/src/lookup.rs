use async_trait::async_trait;
use sea_orm::DbErr;
use uuid::Uuid;

/// Storage queries the validators need.
///
/// Implemented by each repository; validation therefore reads live storage state
/// and can race with a concurrent insert. The unique index on the code column is
/// what finally rejects a duplicate.
#[async_trait]
pub trait Lookup: Send + Sync {
    /// Whether `code` is taken by any record other than `except`.
    async fn code_exists(&self, code: &str, except: Option<Uuid>) -> Result<bool, DbErr>;

    async fn id_exists(&self, id: Uuid) -> Result<bool, DbErr>;
}
