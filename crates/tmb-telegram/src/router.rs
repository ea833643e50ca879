use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use tracing::info;

use tmb_core::{
    audit::AuditLogger,
    classifier::client::ClassifierClient,
    config::Config,
    messaging::port::ChatPort,
    moderation::{flow::Moderator, pipeline::ModerationPipeline},
};

use crate::handlers;
use crate::TelegramChat;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub moderator: Arc<Moderator>,
    pub bot_user_id: u64,
}

pub async fn run_polling(
    cfg: Arc<Config>,
    classifier: Arc<dyn ClassifierClient>,
) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    let me = bot.get_me().await?;
    info!(
        "tmb started: @{} (classifier: {:?})",
        me.username(),
        classifier.provider()
    );

    let chat: Arc<dyn ChatPort> = Arc::new(TelegramChat::new(bot.clone(), me.user.id));
    let pipeline = ModerationPipeline::new(classifier, cfg.classify_timeout);
    let audit = AuditLogger::new(cfg.audit_log_path.clone(), cfg.audit_log_json);
    let moderator = Arc::new(Moderator::new(chat, pipeline, audit, cfg.failure_policy));

    let state = Arc::new(AppState {
        cfg: cfg.clone(),
        moderator,
        bot_user_id: me.user.id.0,
    });

    let handler = dptree::entry().branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}
