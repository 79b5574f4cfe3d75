use engine::Period;

use crate::ui;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub(crate) enum ParseError {
    #[error("сумма не указана")]
    Empty,
    #[error("сумма не является числом")]
    NotANumber,
    #[error("сумма должна быть больше нуля")]
    NotPositive,
}

/// Parses a user-typed amount.
///
/// Accepts `,` as decimal separator (`1500,50`); rejects anything that is
/// not a finite number greater than zero.
pub(crate) fn parse_amount(input: &str) -> Result<f64, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    let amount = trimmed
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| ParseError::NotANumber)?;
    if !amount.is_finite() {
        return Err(ParseError::NotANumber);
    }
    if amount <= 0.0 {
        return Err(ParseError::NotPositive);
    }
    Ok(amount)
}

/// Top-level actions reachable from the main menu buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MenuAction {
    AddExpense,
    AddIncome,
    Report,
    Statistics,
    Help,
    Back,
}

pub(crate) fn parse_menu_action(text: &str) -> Option<MenuAction> {
    match text.trim() {
        ui::BUTTON_ADD_EXPENSE => Some(MenuAction::AddExpense),
        ui::BUTTON_ADD_INCOME => Some(MenuAction::AddIncome),
        ui::BUTTON_REPORT => Some(MenuAction::Report),
        ui::BUTTON_STATISTICS => Some(MenuAction::Statistics),
        ui::BUTTON_HELP => Some(MenuAction::Help),
        ui::BUTTON_BACK => Some(MenuAction::Back),
        _ => None,
    }
}

/// Maps `report_<period>` callback data to a period; `None` for other data.
pub(crate) fn parse_report_callback(data: &str) -> Option<Period> {
    data.strip_prefix(ui::REPORT_CALLBACK_PREFIX)
        .map(Period::from_key)
}
