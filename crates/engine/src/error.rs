//! The module contains the errors the engine can throw.
//!
//! Validation errors ([`InvalidAmount`], [`InvalidCategory`]) are raised
//! before anything touches the database. [`Database`] wraps every storage
//! failure and is never recovered inside the engine.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidCategory`]: EngineError::InvalidCategory
//!  [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid category: {0}")]
    InvalidCategory(String),
    #[error("Invalid transaction kind: {0}")]
    InvalidKind(String),
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),
    #[error("Export failed: {0}")]
    Export(#[from] csv::Error),
    #[error(transparent)]
    Database(#[from] DbErr),
}
