use crate::cli::actions::{Action, seed};
use anyhow::Result;

/// Run the dispatched action.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Seed(args) => seed::execute(args).await,
    }
}
