use tracing::{debug, info};

use crate::errors::GenerationError;
use crate::store::Store;

/// Apply schema statements in order, skipping blank ones.
///
/// Any failure is fatal: generation cannot proceed without tables.
pub async fn apply_schema<S, I, T>(store: &S, statements: I) -> Result<usize, GenerationError>
where
    S: Store,
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let mut applied = 0;
    for statement in statements {
        let statement = statement.as_ref().trim();
        if statement.is_empty() {
            continue;
        }
        store
            .execute_statement(statement)
            .await
            .map_err(GenerationError::Schema)?;
        applied += 1;
        debug!(index = applied, "schema statement applied");
    }
    info!(statements = applied, "schema applied");
    Ok(applied)
}
