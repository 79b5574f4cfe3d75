//! Main menu navigation: /start, /help and "back".

use teloxide::{prelude::*, types::User};

use crate::{ConfigParameters, error::HandlerResult, ui};

/// Greets the user and drops any unfinished wizard.
pub(super) async fn welcome(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    from: &User,
    cfg: &ConfigParameters,
) -> HandlerResult {
    cfg.sessions.clear(user_id).await;
    bot.send_message(chat_id, ui::welcome_text(&from.first_name))
        .reply_markup(ui::main_menu())
        .await?;
    Ok(())
}

pub(super) async fn help(bot: &Bot, chat_id: ChatId) -> HandlerResult {
    bot.send_message(chat_id, ui::help_text())
        .reply_markup(ui::main_menu())
        .await?;
    Ok(())
}

/// Leaves the wizard without saving anything.
pub(super) async fn back(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    cfg: &ConfigParameters,
) -> HandlerResult {
    let discarded = cfg.sessions.clear(user_id).await;
    let text = if discarded.is_active() {
        tracing::debug!("user {user_id} left the wizard at {discarded:?}");
        ui::CANCELLED
    } else {
        ui::MAIN_MENU
    };
    bot.send_message(chat_id, text)
        .reply_markup(ui::main_menu())
        .await?;
    Ok(())
}
