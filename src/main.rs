use anyhow::Result;
use gestor::config::AppConfig;
use gestor::server::AppState;
use gestor::storage::{self, Backend};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    gestor::telemetry::init(&config.telemetry)?;

    let backend = Backend::from_config(&config.database).await?;
    let objects = storage::object_storage(&config.aws)?;
    tracing::info!(
        environment = ?config.environment,
        storage = backend.name(),
        "starting gestor"
    );

    let state = AppState::new(&backend, objects, &config);
    gestor::server_builder().serve(state, &config).await
}
