//! Update routing.
//!
//! Slash commands are matched first, whatever the wizard step. Plain messages
//! go to the active wizard, or are read as main-menu buttons when the user is
//! idle. Callback queries carry report periods.

use teloxide::{
    dispatching::{HandlerExt, UpdateHandler},
    prelude::*,
    types::User,
};

use crate::{
    ConfigParameters,
    commands::Command,
    error::{BotError, HandlerResult},
    parsing::{MenuAction, parse_menu_action},
    ui,
};

mod entry;
mod exports;
mod start;
mod statistics;

pub(crate) fn schema() -> UpdateHandler<BotError> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(handle_command),
        )
        .branch(Update::filter_message().endpoint(handle_message))
        .branch(Update::filter_callback_query().endpoint(statistics::handle_callback))
}

pub(crate) fn user_id(user: &User) -> i64 {
    user.id.0 as i64
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    cfg: ConfigParameters,
) -> HandlerResult {
    let Some(from) = msg.from.as_ref() else {
        bot.send_message(msg.chat.id, ui::NO_USER).await?;
        return Ok(());
    };
    let user_id = user_id(from);
    let chat_id = msg.chat.id;
    tracing::debug!("user {user_id} sent {cmd:?}");

    match cmd {
        Command::Start => start::welcome(&bot, chat_id, user_id, from, &cfg).await,
        Command::Help => start::help(&bot, chat_id).await,
        Command::AddExpense => {
            entry::start_wizard(&bot, chat_id, user_id, &cfg, engine::TransactionKind::Expense)
                .await
        }
        Command::AddIncome => {
            entry::start_wizard(&bot, chat_id, user_id, &cfg, engine::TransactionKind::Income)
                .await
        }
        Command::Report => statistics::ask_period(&bot, chat_id).await,
        Command::Stats => statistics::send_statistics(&bot, chat_id, user_id, &cfg).await,
        Command::Export => exports::send_export(&bot, chat_id, user_id, &cfg).await,
        Command::Cancel => start::back(&bot, chat_id, user_id, &cfg).await,
    }
}

async fn handle_message(bot: Bot, msg: Message, cfg: ConfigParameters) -> HandlerResult {
    let Some(from) = msg.from.as_ref() else {
        bot.send_message(msg.chat.id, ui::NO_USER).await?;
        return Ok(());
    };
    let user_id = user_id(from);
    let chat_id = msg.chat.id;

    if cfg.sessions.get(user_id).await.is_active() {
        return match msg.text() {
            Some(text) => entry::continue_wizard(&bot, chat_id, user_id, &cfg, text).await,
            None => {
                bot.send_message(chat_id, ui::TEXT_EXPECTED).await?;
                Ok(())
            }
        };
    }

    match msg.text().and_then(parse_menu_action) {
        Some(MenuAction::AddExpense) => {
            entry::start_wizard(&bot, chat_id, user_id, &cfg, engine::TransactionKind::Expense)
                .await
        }
        Some(MenuAction::AddIncome) => {
            entry::start_wizard(&bot, chat_id, user_id, &cfg, engine::TransactionKind::Income)
                .await
        }
        Some(MenuAction::Report) => statistics::ask_period(&bot, chat_id).await,
        Some(MenuAction::Statistics) => {
            statistics::send_statistics(&bot, chat_id, user_id, &cfg).await
        }
        Some(MenuAction::Help) => start::help(&bot, chat_id).await,
        Some(MenuAction::Back) => start::back(&bot, chat_id, user_id, &cfg).await,
        None => {
            bot.send_message(chat_id, ui::UNKNOWN_INPUT)
                .reply_markup(ui::main_menu())
                .await?;
            Ok(())
        }
    }
}
