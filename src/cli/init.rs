//! Init command handler.

use color_eyre::Result;

use crate::config::Config;
use crate::context::Context;
use crate::di::FromRef;
use crate::repositories::SchemaRepository;

use super::App;

impl App {
    /// Create the uniqueness constraints backing every identifier.
    pub async fn run_init(&self) -> Result<()> {
        let config = Config::load()?;
        let ctx = Context::connect(config).await?;

        tracing::info!("Ensuring uniqueness constraints...");
        let constraints = SchemaRepository::from_ref(&ctx)
            .ensure_constraints()
            .await
            .map_err(|e| color_eyre::eyre::eyre!("Failed to create constraints: {}", e))?;

        tracing::info!(count = constraints.len(), "Schema ready: {:?}", constraints);
        Ok(())
    }
}
