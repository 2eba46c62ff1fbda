pub mod seed;

// The match lives in its own module so this file stays a plain list of
// actions as more are added.
mod run;

#[derive(Debug)]
pub enum Action {
    Seed(seed::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
