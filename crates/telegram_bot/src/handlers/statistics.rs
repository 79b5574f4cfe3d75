//! Report and statistics handlers.

use engine::Period;
use teloxide::prelude::*;

use crate::{ConfigParameters, error::HandlerResult, parsing::parse_report_callback, ui};

use super::user_id;

pub(super) async fn ask_period(bot: &Bot, chat_id: ChatId) -> HandlerResult {
    bot.send_message(chat_id, ui::CHOOSE_PERIOD)
        .reply_markup(ui::report_periods())
        .await?;
    Ok(())
}

/// Current-month statistics.
pub(super) async fn send_statistics(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    cfg: &ConfigParameters,
) -> HandlerResult {
    let period = Period::Month;
    let stats = match cfg.engine.statistics(user_id, period).await {
        Ok(stats) => stats,
        Err(err) => {
            tracing::error!("failed to load statistics for user {user_id}: {err}");
            bot.send_message(chat_id, ui::READ_ERROR).await?;
            return Err(err.into());
        }
    };

    bot.send_message(chat_id, ui::render_statistics(period, &stats))
        .reply_markup(ui::main_menu())
        .await?;
    Ok(())
}

async fn send_report(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    cfg: &ConfigParameters,
    period: Period,
) -> HandlerResult {
    let report = match cfg.engine.report(user_id, period, cfg.report_limit).await {
        Ok(report) => report,
        Err(err) => {
            tracing::error!("failed to load {period} report for user {user_id}: {err}");
            bot.send_message(chat_id, ui::READ_ERROR).await?;
            return Err(err.into());
        }
    };

    let text = ui::render_report(period, &report, cfg.engine.timezone());
    bot.send_message(chat_id, text).await?;
    Ok(())
}

pub(super) async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    cfg: ConfigParameters,
) -> HandlerResult {
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(chat_id) = q.message.as_ref().map(|message| message.chat().id) else {
        return Ok(());
    };
    let Some(period) = q.data.as_deref().and_then(parse_report_callback) else {
        tracing::warn!("unexpected callback data: {:?}", q.data);
        return Ok(());
    };

    send_report(&bot, chat_id, user_id(&q.from), &cfg, period).await
}
