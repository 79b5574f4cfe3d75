use chrono::{DateTime, Utc};
use sea_orm::{QueryFilter, QueryOrder, prelude::*};

use crate::{
    Period, ResultEngine, Transaction, TransactionKind, transactions,
    transactions::{normalize_category, normalize_comment, validate_amount},
};

use super::Engine;

impl Engine {
    /// Records a transaction dated now and returns its id.
    ///
    /// The comment is normalized first: empty text and skip tokens such as
    /// `нет` are stored as `NULL`.
    pub async fn add_transaction(
        &self,
        user_id: i64,
        kind: TransactionKind,
        category: &str,
        amount: f64,
        comment: Option<&str>,
    ) -> ResultEngine<i64> {
        self.add_transaction_at(user_id, kind, category, amount, comment, Utc::now())
            .await
    }

    /// Same as [`Engine::add_transaction`] with an explicit timestamp.
    pub async fn add_transaction_at(
        &self,
        user_id: i64,
        kind: TransactionKind,
        category: &str,
        amount: f64,
        comment: Option<&str>,
        date: DateTime<Utc>,
    ) -> ResultEngine<i64> {
        let row = transactions::ActiveModel::new_row(
            user_id,
            kind,
            normalize_category(category)?,
            validate_amount(amount)?,
            date,
            normalize_comment(comment),
        );
        let inserted = transactions::Entity::insert(row)
            .exec(&self.database)
            .await?;
        Ok(inserted.last_insert_id)
    }

    /// Lists the user's transactions inside `period`, most recent first.
    pub async fn transactions(
        &self,
        user_id: i64,
        period: Period,
    ) -> ResultEngine<Vec<Transaction>> {
        let from = period.window_start(Utc::now(), self.timezone);
        self.transactions_since(user_id, from).await
    }

    /// Lists the user's transactions dated at or after `from` (all of them
    /// when `None`), most recent first.
    pub async fn transactions_since(
        &self,
        user_id: i64,
        from: Option<DateTime<Utc>>,
    ) -> ResultEngine<Vec<Transaction>> {
        let mut query =
            transactions::Entity::find().filter(transactions::Column::UserId.eq(user_id));
        if let Some(from) = from {
            query = query.filter(transactions::Column::Date.gte(from));
        }

        query
            .order_by_desc(transactions::Column::Date)
            .order_by_desc(transactions::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }
}
