use chrono_tz::Tz;
use sea_orm::DatabaseConnection;

use crate::ResultEngine;

mod reports;
mod transactions;

#[derive(Clone, Debug)]
pub struct Engine {
    database: DatabaseConnection,
    timezone: Tz,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Time zone used to resolve calendar periods.
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Closes the underlying connection pool.
    pub async fn close(self) -> ResultEngine<()> {
        self.database.close().await?;
        Ok(())
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    timezone: Option<Tz>,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Time zone for day/month boundaries. Defaults to UTC.
    pub fn timezone(mut self, tz: Tz) -> EngineBuilder {
        self.timezone = Some(tz);
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
            timezone: self.timezone.unwrap_or(Tz::UTC),
        })
    }
}
