//! Slash commands understood by the bot.

use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "snake_case", description = "Доступные команды:")]
pub enum Command {
    #[command(description = "Главное меню.")]
    Start,
    #[command(description = "Как пользоваться ботом.")]
    Help,
    #[command(description = "Добавить расход.")]
    AddExpense,
    #[command(description = "Добавить доход.")]
    AddIncome,
    #[command(description = "Отчет за период.")]
    Report,
    #[command(description = "Статистика за месяц.")]
    Stats,
    #[command(description = "Выгрузить все операции в CSV.")]
    Export,
    #[command(description = "Отменить текущее действие.")]
    Cancel,
}
