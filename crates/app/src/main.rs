use migration::{Migrator, MigratorTrait};
use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "kopilka={level},telegram_bot={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let timezone = settings.app.timezone()?;

    let db = match parse_database(&settings.database).await {
        Ok(db) => db,
        Err(err) => {
            tracing::error!("failed to initialize database: {err}");
            return Err(err);
        }
    };

    let engine = engine::Engine::builder()
        .database(db)
        .timezone(timezone)
        .build()
        .await?;
    tracing::info!("Reports use the {timezone} time zone");

    let bot = match build_bot(&settings.telegram, engine.clone()) {
        Ok(bot) => bot,
        Err(err) => {
            tracing::error!("failed to initialize telegram bot: {err}");
            engine.close().await?;
            return Err(err);
        }
    };
    bot.run().await;

    tracing::info!("Shutting down...");
    engine.close().await?;
    Ok(())
}

fn build_bot(
    telegram: &settings::Telegram,
    engine: engine::Engine,
) -> Result<telegram_bot::Bot, Box<dyn std::error::Error + Send + Sync>> {
    let mut builder = telegram_bot::Bot::builder()
        .token(&telegram.token)
        .engine(engine);
    if let Some(limit) = telegram.report_limit {
        builder = builder.report_limit(limit);
    }
    Ok(builder.build()?)
}

async fn parse_database(
    config: &Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{path}?mode=rwc"),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn engine() -> engine::Engine {
        let db = parse_database(&Database::Memory).await.unwrap();
        engine::Engine::builder().database(db).build().await.unwrap()
    }

    #[tokio::test]
    async fn invalid_telegram_settings_are_an_error() {
        let blank_token = settings::Telegram {
            token: "  ".to_string(),
            report_limit: None,
        };
        assert!(build_bot(&blank_token, engine().await).is_err());

        let zero_limit = settings::Telegram {
            token: "123:abc".to_string(),
            report_limit: Some(0),
        };
        assert!(build_bot(&zero_limit, engine().await).is_err());
    }

    #[tokio::test]
    async fn valid_telegram_settings_build_a_bot() {
        let telegram = settings::Telegram {
            token: "123:abc".to_string(),
            report_limit: Some(20),
        };
        assert!(build_bot(&telegram, engine().await).is_ok());
    }
}
