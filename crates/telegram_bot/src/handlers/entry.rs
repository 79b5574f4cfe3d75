//! Handlers driving the "add transaction" wizard.

use engine::TransactionKind;
use teloxide::prelude::*;

use crate::{
    ConfigParameters,
    error::HandlerResult,
    ui,
    wizard::{self, Reply},
};

pub(super) async fn start_wizard(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    cfg: &ConfigParameters,
    kind: TransactionKind,
) -> HandlerResult {
    wizard::start(&cfg.sessions, user_id, kind).await;

    let prompt = bot.send_message(chat_id, ui::ask_category(kind));
    match kind {
        TransactionKind::Expense => prompt.reply_markup(ui::expense_categories()).await?,
        TransactionKind::Income => prompt.reply_markup(ui::no_keyboard()).await?,
    };
    Ok(())
}

pub(super) async fn continue_wizard(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    cfg: &ConfigParameters,
    text: &str,
) -> HandlerResult {
    let reply = match wizard::handle_text(&cfg.engine, &cfg.sessions, user_id, text).await {
        Ok(Some(reply)) => reply,
        Ok(None) => return Ok(()),
        Err(err) => {
            tracing::error!("failed to store transaction for user {user_id}: {err}");
            bot.send_message(chat_id, ui::STORAGE_ERROR).await?;
            return Err(err.into());
        }
    };

    match reply {
        Reply::AskAmount => {
            bot.send_message(chat_id, ui::ask_amount())
                .reply_markup(ui::back_only())
                .await?;
        }
        Reply::AskComment => {
            bot.send_message(chat_id, ui::ask_comment()).await?;
        }
        Reply::Rejected(rejection) => {
            bot.send_message(chat_id, ui::render_rejection(&rejection))
                .await?;
        }
        Reply::Cancelled => {
            tracing::debug!("user {user_id} left the wizard");
            bot.send_message(chat_id, ui::CANCELLED)
                .reply_markup(ui::main_menu())
                .await?;
        }
        Reply::Saved { id, saved } => {
            tracing::info!(
                "user {user_id} saved {} #{id} in {:?}",
                saved.kind.as_str(),
                saved.category
            );
            bot.send_message(
                chat_id,
                ui::render_saved(
                    saved.kind,
                    &saved.category,
                    saved.amount,
                    saved.comment.as_deref(),
                ),
            )
            .reply_markup(ui::main_menu())
            .await?;
        }
    }
    Ok(())
}
