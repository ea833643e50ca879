use std::sync::Arc;

use tmb_classifier::build_classifier;

use tmb_core::config::Config;

#[tokio::main]
async fn main() -> Result<(), tmb_core::Error> {
    tmb_core::logging::init("tmb")?;

    let cfg = Arc::new(Config::load()?);
    let classifier = build_classifier(&cfg.classifier);

    tmb_telegram::router::run_polling(cfg, classifier)
        .await
        .map_err(|e| tmb_core::Error::Transport(format!("telegram bot failed: {e}")))?;

    Ok(())
}
