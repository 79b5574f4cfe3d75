use chrono::Utc;
use chrono_tz::Tz;
use engine::{CategoryStatistics, Period, PeriodReport, Totals, Transaction, TransactionKind};
use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup, KeyboardRemove,
};

use crate::{parsing::ParseError, wizard::Rejection};

pub(crate) const BUTTON_ADD_EXPENSE: &str = "➕ Добавить расход";
pub(crate) const BUTTON_ADD_INCOME: &str = "💰 Добавить доход";
pub(crate) const BUTTON_REPORT: &str = "📊 Отчет";
pub(crate) const BUTTON_STATISTICS: &str = "📈 Статистика";
pub(crate) const BUTTON_HELP: &str = "ℹ️ Помощь";
pub(crate) const BUTTON_BACK: &str = "↩️ Назад";

pub(crate) const REPORT_CALLBACK_PREFIX: &str = "report_";

pub(crate) const EXPENSE_CATEGORIES: [&str; 9] = [
    "🍔 Еда",
    "🚗 Транспорт",
    "🏠 Дом",
    "🎮 Развлечения",
    "👚 Одежда",
    "💊 Здоровье",
    "✈️ Путешествия",
    "📚 Образование",
    "💼 Прочее",
];

pub(crate) const STORAGE_ERROR: &str =
    "❌ Не удалось сохранить операцию. Попробуйте отправить комментарий еще раз.";
pub(crate) const READ_ERROR: &str = "❌ Не удалось загрузить данные. Попробуйте позже.";
pub(crate) const NO_USER: &str = "Не удалось определить пользователя.";
pub(crate) const UNKNOWN_INPUT: &str = "Не понял 🤔 Выберите действие в меню или нажмите «ℹ️ Помощь».";
pub(crate) const CANCELLED: &str = "Действие отменено.";
pub(crate) const MAIN_MENU: &str = "Главное меню.";
pub(crate) const TEXT_EXPECTED: &str = "Пожалуйста, отправьте ответ текстом.";
pub(crate) const CHOOSE_PERIOD: &str = "Выберите период:";
pub(crate) const EXPORT_EMPTY: &str = "📭 Пока нечего экспортировать.";

pub(crate) fn main_menu() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![
            KeyboardButton::new(BUTTON_ADD_EXPENSE),
            KeyboardButton::new(BUTTON_ADD_INCOME),
        ],
        vec![
            KeyboardButton::new(BUTTON_REPORT),
            KeyboardButton::new(BUTTON_STATISTICS),
        ],
        vec![KeyboardButton::new(BUTTON_HELP)],
    ])
    .resize_keyboard()
}

/// Expense categories three per row, with "back" on its own row.
pub(crate) fn expense_categories() -> KeyboardMarkup {
    let mut rows: Vec<Vec<KeyboardButton>> = EXPENSE_CATEGORIES
        .chunks(3)
        .map(|row| row.iter().map(|label| KeyboardButton::new(*label)).collect())
        .collect();
    rows.push(vec![KeyboardButton::new(BUTTON_BACK)]);
    KeyboardMarkup::new(rows).resize_keyboard()
}

pub(crate) fn back_only() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![KeyboardButton::new(BUTTON_BACK)]]).resize_keyboard()
}

pub(crate) fn no_keyboard() -> KeyboardRemove {
    KeyboardRemove::new()
}

pub(crate) fn report_periods() -> InlineKeyboardMarkup {
    let button = |period: Period| {
        InlineKeyboardButton::callback(
            period_button_label(period),
            format!("{REPORT_CALLBACK_PREFIX}{period}"),
        )
    };
    InlineKeyboardMarkup::new(vec![
        vec![button(Period::Day), button(Period::Week)],
        vec![button(Period::Month), button(Period::All)],
    ])
}

fn period_button_label(period: Period) -> &'static str {
    match period {
        Period::Day => "📅 День",
        Period::Week => "🗓 Неделя",
        Period::Month => "📆 Месяц",
        Period::All => "♾ Все время",
    }
}

/// Accusative form, as in "за {title}".
pub(crate) fn period_title(period: Period) -> &'static str {
    match period {
        Period::Day => "день",
        Period::Week => "неделю",
        Period::Month => "месяц",
        Period::All => "все время",
    }
}

pub(crate) fn format_amount(amount: f64) -> String {
    format!("{amount:.2} руб.")
}

pub(crate) fn welcome_text(first_name: &str) -> String {
    format!(
        "👋 Привет, {first_name}!\n\nЯ помогу вести учет доходов и расходов.\n\
         Выберите действие в меню ниже."
    )
}

pub(crate) fn help_text() -> &'static str {
    "ℹ️ Как пользоваться ботом:\n\n\
     ➕ Добавить расход: категория, сумма, комментарий\n\
     💰 Добавить доход: категория, сумма, комментарий\n\
     📊 Отчет: список операций за период\n\
     📈 Статистика: итоги и топ категорий расходов\n\n\
     Сумму можно писать через точку или запятую: 1500,50\n\
     Чтобы пропустить комментарий, напишите «нет».\n\n\
     Команды: /add_expense /add_income /report /stats /export /cancel"
}

pub(crate) fn ask_category(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Expense => "Выберите категорию расхода или напишите свою:",
        TransactionKind::Income => "Напишите источник дохода (например, Зарплата):",
    }
}

pub(crate) fn ask_amount() -> &'static str {
    "Введите сумму:"
}

pub(crate) fn ask_comment() -> &'static str {
    "Добавьте комментарий или напишите «нет», чтобы пропустить:"
}

pub(crate) fn render_rejection(rejection: &Rejection) -> String {
    match rejection {
        Rejection::EmptyCategory => "Категория не может быть пустой. Напишите категорию:".to_string(),
        Rejection::Amount(err @ (ParseError::Empty | ParseError::NotANumber)) => {
            format!("❗ {err}. Введите сумму числом, например 1500 или 1500,50:")
        }
        Rejection::Amount(err @ ParseError::NotPositive) => format!("❗ {err}. Введите сумму:"),
    }
}

pub(crate) fn render_saved(
    kind: TransactionKind,
    category: &str,
    amount: f64,
    comment: Option<&str>,
) -> String {
    let title = match kind {
        TransactionKind::Expense => "✅ Расход сохранен",
        TransactionKind::Income => "✅ Доход сохранен",
    };
    let mut text = format!(
        "{title}\n\nКатегория: {category}\nСумма: {}",
        format_amount(amount)
    );
    if let Some(comment) = comment {
        text.push_str(&format!("\nКомментарий: {comment}"));
    }
    text
}

fn render_totals(totals: &Totals) -> String {
    format!(
        "💸 Расходы: {}\n💰 Доходы: {}\n⚖️ Баланс: {}",
        format_amount(totals.expense),
        format_amount(totals.income),
        format_amount(totals.balance),
    )
}

fn render_line(tx: &Transaction, tz: Tz) -> String {
    let sign = match tx.kind {
        TransactionKind::Expense => ('➖', "-"),
        TransactionKind::Income => ('➕', "+"),
    };
    let mut line = format!(
        "{} {} | {}: {}{}",
        sign.0,
        tx.date.with_timezone(&tz).format("%d.%m.%Y"),
        tx.category,
        sign.1,
        format_amount(tx.amount),
    );
    if let Some(comment) = &tx.comment {
        line.push_str(&format!(" ({comment})"));
    }
    line
}

/// Report listing in the user's calendar.
pub(crate) fn render_report(period: Period, report: &PeriodReport, tz: Tz) -> String {
    let title = period_title(period);
    match report {
        PeriodReport::Empty => format!("📭 За {title} операций нет."),
        PeriodReport::Entries {
            shown,
            hidden,
            totals,
        } => {
            let mut text = format!("📊 Отчет за {title}\n\n");
            for tx in shown {
                text.push_str(&render_line(tx, tz));
                text.push('\n');
            }
            if *hidden > 0 {
                text.push_str(&format!("… и еще {hidden}\n"));
            }
            text.push('\n');
            text.push_str(&render_totals(totals));
            text
        }
    }
}

pub(crate) fn render_statistics(period: Period, stats: &CategoryStatistics) -> String {
    let title = period_title(period);
    match stats {
        CategoryStatistics::Empty => format!("📭 За {title} операций нет."),
        CategoryStatistics::Summary {
            count,
            totals,
            top_expenses,
        } => {
            let mut text = format!(
                "📈 Статистика за {title}\n\nОпераций: {count}\n{}",
                render_totals(totals)
            );
            if !top_expenses.is_empty() {
                text.push_str("\n\nТоп категорий расходов:");
                for share in top_expenses {
                    text.push_str(&format!(
                        "\n  {}: {} ({:.1}%)",
                        share.category,
                        format_amount(share.amount),
                        share.percentage
                    ));
                }
            }
            text
        }
    }
}

pub(crate) fn export_file_name() -> String {
    format!("transactions_{}.csv", Utc::now().format("%Y%m%d"))
}
