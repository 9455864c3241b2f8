use std::sync::Arc;

use ai_llm_service::telemetry;
use api::AppState;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file; a missing file is fine,
    // a malformed one is not.
    match dotenvy::dotenv() {
        Ok(_) => {}
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e.into()),
    }

    telemetry::init("info,zakbot_backend=info")?;

    let state = Arc::new(AppState::from_env().await?);
    info!(environment = %state.settings.environment, "zakbot gateway configured");

    api::start(state).await?;

    Ok(())
}
