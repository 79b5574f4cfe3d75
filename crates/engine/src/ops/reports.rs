use crate::{CategoryStatistics, Period, PeriodReport, ResultEngine};

use super::Engine;

impl Engine {
    /// Chronological report of `period`, listing at most `cap` transactions.
    pub async fn report(
        &self,
        user_id: i64,
        period: Period,
        cap: usize,
    ) -> ResultEngine<PeriodReport> {
        let transactions = self.transactions(user_id, period).await?;
        Ok(PeriodReport::build(&transactions, cap))
    }

    /// Expense breakdown of `period` over every transaction in it.
    pub async fn statistics(
        &self,
        user_id: i64,
        period: Period,
    ) -> ResultEngine<CategoryStatistics> {
        let transactions = self.transactions(user_id, period).await?;
        Ok(CategoryStatistics::build(&transactions))
    }
}
