use std::sync::Arc;

use culture_explorer::{
    App, ChatConfig,
    chat::XaiClient,
    util::log,
};
use tracing::info;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let log_path = log::init(log::LOG_DIR)?;
    info!("logging to {}", log_path.display());

    let config = ChatConfig::from_env();
    info!("using {:?}", config);
    let client = Arc::new(XaiClient::new(&config)?);

    let terminal = ratatui::init();
    let result = App::new(client, &config.system_prompt).run(terminal).await;
    ratatui::restore();
    result
}
