//! Transaction primitives.
//!
//! A `Transaction` is a single income or expense recorded by a user. Rows are
//! append-only: once stored they are never updated or deleted.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// Comment replies meaning "no comment" (compared case-insensitively).
pub(crate) const SKIP_COMMENT_TOKENS: [&str; 5] = ["нет", "no", "пропустить", "skip", "-"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Expense,
    Income,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            other => Err(EngineError::InvalidKind(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub kind: TransactionKind,
    pub category: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub comment: Option<String>,
}

impl Transaction {
    /// Amount with the sign of its effect on the balance.
    #[must_use]
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Expense => -self.amount,
            TransactionKind::Income => self.amount,
        }
    }
}

/// Returns `true` when a comment reply means "no comment".
pub(crate) fn is_skip_comment(text: &str) -> bool {
    let lowered = text.trim().to_lowercase();
    SKIP_COMMENT_TOKENS.contains(&lowered.as_str())
}

/// Maps blank text or a skip token to `None`; any other comment is kept
/// verbatim.
pub fn normalize_comment(comment: Option<&str>) -> Option<String> {
    comment
        .filter(|c| !c.trim().is_empty() && !is_skip_comment(c))
        .map(ToString::to_string)
}

pub(crate) fn normalize_category(category: &str) -> ResultEngine<String> {
    let trimmed = category.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidCategory(
            "category must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn validate_amount(amount: f64) -> ResultEngine<f64> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(EngineError::InvalidAmount(format!(
            "amount must be a positive number, got {amount}"
        )));
    }
    Ok(amount)
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    #[sea_orm(column_name = "type")]
    pub kind: String,
    pub category: String,
    #[sea_orm(column_type = "Double")]
    pub amount: f64,
    pub date: DateTimeUtc,
    pub comment: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    /// Builds an insertable row; `id` is left to the database.
    pub(crate) fn new_row(
        user_id: i64,
        kind: TransactionKind,
        category: String,
        amount: f64,
        date: DateTime<Utc>,
        comment: Option<String>,
    ) -> Self {
        Self {
            id: ActiveValue::NotSet,
            user_id: ActiveValue::Set(user_id),
            kind: ActiveValue::Set(kind.as_str().to_string()),
            category: ActiveValue::Set(category),
            amount: ActiveValue::Set(amount),
            date: ActiveValue::Set(date),
            comment: ActiveValue::Set(comment),
        }
    }
}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            kind: TransactionKind::try_from(model.kind.as_str())?,
            category: model.category,
            amount: model.amount,
            date: model.date,
            comment: model.comment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_storage_text() {
        for kind in [TransactionKind::Expense, TransactionKind::Income] {
            assert_eq!(TransactionKind::try_from(kind.as_str()).unwrap(), kind);
        }
        assert!(matches!(
            TransactionKind::try_from("refund"),
            Err(EngineError::InvalidKind(_))
        ));
    }

    #[test]
    fn skip_tokens_are_case_insensitive() {
        assert!(is_skip_comment("нет"));
        assert!(is_skip_comment("НЕТ"));
        assert!(is_skip_comment(" Skip "));
        assert!(is_skip_comment("Пропустить"));
        assert!(!is_skip_comment("обед"));
    }

    #[test]
    fn comment_normalization() {
        assert_eq!(normalize_comment(None), None);
        assert_eq!(normalize_comment(Some("   ")), None);
        assert_eq!(normalize_comment(Some("No")), None);
        assert_eq!(normalize_comment(Some(" Skip ")), None);
        assert_eq!(
            normalize_comment(Some("  обед с коллегами ")),
            Some("  обед с коллегами ".to_string())
        );
    }

    #[test]
    fn rejects_non_positive_amounts() {
        assert!(validate_amount(0.0).is_err());
        assert!(validate_amount(-3.5).is_err());
        assert!(validate_amount(f64::NAN).is_err());
        assert!(validate_amount(f64::INFINITY).is_err());
        assert_eq!(validate_amount(1500.5).unwrap(), 1500.5);
    }

    #[test]
    fn rejects_blank_category() {
        assert!(matches!(
            normalize_category("  "),
            Err(EngineError::InvalidCategory(_))
        ));
        assert_eq!(normalize_category(" 🍔 Еда ").unwrap(), "🍔 Еда");
    }

    #[test]
    fn signed_amount_follows_kind() {
        let mut tx = Transaction {
            id: 1,
            user_id: 7,
            kind: TransactionKind::Expense,
            category: "Еда".to_string(),
            amount: 500.0,
            date: Utc::now(),
            comment: None,
        };
        assert_eq!(tx.signed_amount(), -500.0);
        tx.kind = TransactionKind::Income;
        assert_eq!(tx.signed_amount(), 500.0);
    }
}
