//! Handler for the CSV export.

use engine::Period;
use teloxide::{prelude::*, types::InputFile};

use crate::{ConfigParameters, error::HandlerResult, ui};

/// Sends every transaction of the user as a CSV document.
pub(super) async fn send_export(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    cfg: &ConfigParameters,
) -> HandlerResult {
    let transactions = match cfg.engine.transactions(user_id, Period::All).await {
        Ok(transactions) => transactions,
        Err(err) => {
            tracing::error!("failed to load transactions for export, user {user_id}: {err}");
            bot.send_message(chat_id, ui::READ_ERROR).await?;
            return Err(err.into());
        }
    };

    if transactions.is_empty() {
        bot.send_message(chat_id, ui::EXPORT_EMPTY).await?;
        return Ok(());
    }

    let data = match engine::to_csv(&transactions) {
        Ok(data) => data,
        Err(err) => {
            tracing::error!("failed to write export for user {user_id}: {err}");
            bot.send_message(chat_id, ui::READ_ERROR).await?;
            return Err(err.into());
        }
    };

    bot.send_document(chat_id, InputFile::memory(data).file_name(ui::export_file_name()))
        .await?;
    Ok(())
}
