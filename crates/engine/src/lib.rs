//! Transaction store and reporting engine.
//!
//! The [`Engine`] owns the database connection and exposes the append-only
//! store (`add_transaction`, `transactions`) plus the period aggregations
//! built on top of it.

pub use error::EngineError;
pub use export::{to_csv, write_csv};
pub use ops::{Engine, EngineBuilder};
pub use period::Period;
pub use report::{
    CategoryShare, CategoryStatistics, DEFAULT_REPORT_LIMIT, PeriodReport, TOP_CATEGORIES, Totals,
};
pub use transactions::{Transaction, TransactionKind, normalize_comment};

mod error;
mod export;
mod ops;
mod period;
mod report;
mod transactions;

pub type ResultEngine<T> = Result<T, EngineError>;
