//! Telegram bot.
//!
//! The bot owns the conversation: per-user wizard state lives in memory and
//! every read or write of transactions goes through [`engine::Engine`].

use engine::{DEFAULT_REPORT_LIMIT, Engine};
use teloxide::{prelude::*, utils::command::BotCommands};

mod commands;
mod error;
mod handlers;
mod parsing;
mod state;
mod ui;
mod wizard;

pub use commands::Command;
pub use error::BotError;

/// Dependencies shared by every handler.
#[derive(Clone)]
pub struct ConfigParameters {
    engine: Engine,
    sessions: state::SessionStore,
    report_limit: usize,
}

pub struct Bot {
    token: String,
    engine: Engine,
    report_limit: usize,
}

impl Bot {
    pub fn builder() -> BotBuilder {
        BotBuilder::default()
    }

    pub async fn run(&self) {
        tracing::info!("Starting telegram bot...");

        let bot = teloxide::Bot::new(&self.token);
        if let Err(err) = bot.set_my_commands(Command::bot_commands()).await {
            tracing::warn!("failed to register bot commands: {err}");
        }

        let parameters = ConfigParameters {
            engine: self.engine.clone(),
            sessions: state::SessionStore::default(),
            report_limit: self.report_limit,
        };

        // Wizard state is per user, so one user's updates are handled in
        // order even when they come from different chats.
        Dispatcher::builder(bot, handlers::schema())
            .distribution_function(|upd: &Update| upd.from().map(|user| user.id))
            .dependencies(dptree::deps![parameters])
            .default_handler(|upd| async move {
                tracing::warn!("Unhandled update: {:?}", upd);
            })
            .error_handler(LoggingErrorHandler::with_custom_text(
                "An error has occurred in the dispatcher",
            ))
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }
}

#[derive(Default, Debug)]
pub struct BotBuilder {
    token: String,
    engine: Option<Engine>,
    report_limit: Option<usize>,
}

impl BotBuilder {
    pub fn token(mut self, token: &str) -> BotBuilder {
        self.token = token.to_string();
        self
    }

    pub fn engine(mut self, engine: Engine) -> BotBuilder {
        self.engine = Some(engine);
        self
    }

    /// Lines listed in a report. Defaults to [`DEFAULT_REPORT_LIMIT`].
    pub fn report_limit(mut self, limit: usize) -> BotBuilder {
        self.report_limit = Some(limit);
        self
    }

    pub fn build(self) -> Result<Bot, String> {
        tracing::info!("Initializing telegram bot...");
        if self.token.trim().is_empty() {
            return Err("telegram token is empty".to_string());
        }
        let engine = self
            .engine
            .ok_or_else(|| "telegram bot needs an engine".to_string())?;
        let report_limit = match self.report_limit {
            Some(0) => return Err("report limit must be at least 1".to_string()),
            Some(limit) => limit,
            None => DEFAULT_REPORT_LIMIT,
        };

        Ok(Bot {
            token: self.token,
            engine,
            report_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::Database;

    use super::*;

    async fn engine() -> Engine {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Engine::builder().database(db).build().await.unwrap()
    }

    #[tokio::test]
    async fn builder_defaults_report_limit() {
        let bot = Bot::builder()
            .token("123:abc")
            .engine(engine().await)
            .build()
            .unwrap();
        assert_eq!(bot.report_limit, DEFAULT_REPORT_LIMIT);
    }

    #[tokio::test]
    async fn builder_rejects_missing_parts() {
        assert!(Bot::builder().engine(engine().await).build().is_err());
        assert!(Bot::builder().token("123:abc").build().is_err());
        assert!(
            Bot::builder()
                .token("123:abc")
                .engine(engine().await)
                .report_limit(0)
                .build()
                .is_err()
        );
    }
}
