//! Order number allocation
//!
//! Human-facing 4-digit order numbers, distinct from the record id.
//! Uniqueness is best-effort: draw a random candidate, check the store,
//! retry a bounded number of times. The check-then-insert window is NOT
//! closed here; the unique index on `order.number` turns a lost race into
//! a database error instead of a silent duplicate.

use crate::db::repository::{OrderRepository, RepoError};
use rand::Rng;
use thiserror::Error;

/// Inclusive range of order numbers
const NUMBER_MIN: u32 = 1000;
const NUMBER_MAX: u32 = 9999;

/// Bounded retry on collision
pub const MAX_ATTEMPTS: u32 = 5;

/// Allocation failure
#[derive(Debug, Error)]
pub enum AllocError {
    /// Every candidate collided within the retry bound; the whole order
    /// placement must abort with no side effects
    #[error("failed to allocate a unique order number after {0} attempts")]
    Exhausted(u32),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Draw a random candidate in 1000..=9999
fn random_candidate() -> String {
    // ThreadRng must not be held across an await point
    let n: u32 = rand::thread_rng().gen_range(NUMBER_MIN..=NUMBER_MAX);
    n.to_string()
}

/// Allocate a number not used by any existing order
///
/// Generic over the existence check so the retry behaviour is testable
/// without a database.
pub async fn allocate_with<F, Fut>(exists: F) -> Result<String, AllocError>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<bool, RepoError>>,
{
    for _ in 0..MAX_ATTEMPTS {
        let candidate = random_candidate();
        if !exists(candidate.clone()).await? {
            return Ok(candidate);
        }
    }
    Err(AllocError::Exhausted(MAX_ATTEMPTS))
}

/// Allocate against the order store
pub async fn allocate(repo: &OrderRepository) -> Result<String, AllocError> {
    allocate_with(|candidate| async move { repo.number_exists(&candidate).await }).await
}
