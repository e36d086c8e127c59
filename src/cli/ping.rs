//! Ping command handler.

use color_eyre::Result;

use crate::config::Config;
use crate::context::Context;
use crate::di::FromRef;
use crate::repositories::SchemaRepository;

use super::App;

impl App {
    /// Round-trip one statement against the configured store.
    pub async fn run_ping(&self) -> Result<()> {
        let config = Config::load()?;
        let uri = config.neo4j.uri.clone();
        let ctx = Context::connect(config).await?;

        let message = SchemaRepository::from_ref(&ctx).ping().await?;
        tracing::info!(%uri, "Neo4j replied: {}", message);
        println!("{}", message);
        Ok(())
    }
}
