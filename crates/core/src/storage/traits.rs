use async_trait::async_trait;

use super::Result;

/// Repository for local user records, keyed by the provider's external id.
///
/// Every method maps to a single parameterized statement. There are no
/// transactions, so `exists_by_external_id` followed by `insert` can race
/// when the same identity logs in twice at once.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Whether a record exists for `external_id`.
    async fn exists_by_external_id(&self, external_id: &str) -> Result<bool>;

    /// Insert a new record at the baseline level.
    async fn insert(&self, external_id: &str, nickname: &str, image: Option<&str>) -> Result<()>;

    /// Delete the record for `external_id`. Missing records are not an error.
    async fn delete(&self, external_id: &str) -> Result<()>;

    /// Rank label for `external_id`, [`BASELINE_LEVEL`](super::BASELINE_LEVEL)
    /// when no record exists.
    async fn get_level(&self, external_id: &str) -> Result<String>;
}
