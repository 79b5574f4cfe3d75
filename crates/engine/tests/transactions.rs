use chrono::{TimeDelta, Utc};
use chrono_tz::Europe::Moscow;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{
    CategoryStatistics, Engine, EngineError, Period, PeriodReport, TransactionKind,
};
use migration::MigratorTrait;

const ALICE: i64 = 1001;
const BOB: i64 = 2002;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .timezone(Moscow)
        .build()
        .await
        .unwrap();
    (engine, db)
}

async fn row_count(db: &DatabaseConnection) -> i64 {
    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_string(
            backend,
            "SELECT COUNT(*) AS n FROM transactions",
        ))
        .await
        .unwrap()
        .unwrap();
    row.try_get::<i64>("", "n").unwrap()
}

#[tokio::test]
async fn add_then_query_all_returns_exact_fields() {
    let (engine, _db) = engine_with_db().await;

    let id = engine
        .add_transaction(ALICE, TransactionKind::Expense, "Еда", 500.0, Some("обед"))
        .await
        .unwrap();

    let txs = engine.transactions(ALICE, Period::All).await.unwrap();
    assert_eq!(txs.len(), 1);
    let tx = &txs[0];
    assert_eq!(tx.id, id);
    assert_eq!(tx.user_id, ALICE);
    assert_eq!(tx.kind, TransactionKind::Expense);
    assert_eq!(tx.category, "Еда");
    assert_eq!(tx.amount, 500.0);
    assert_eq!(tx.comment.as_deref(), Some("обед"));
    assert!(Utc::now() - tx.date < TimeDelta::minutes(1));
}

#[tokio::test]
async fn comment_is_null_for_none_empty_and_skip_tokens() {
    let (engine, _db) = engine_with_db().await;

    for comment in [None, Some(""), Some("   "), Some("нет"), Some("SKIP"), Some("пропустить")] {
        engine
            .add_transaction(ALICE, TransactionKind::Income, "Фриланс", 10.0, comment)
            .await
            .unwrap();
    }
    engine
        .add_transaction(ALICE, TransactionKind::Income, "Фриланс", 10.0, Some("нет, не то"))
        .await
        .unwrap();

    let txs = engine.transactions(ALICE, Period::All).await.unwrap();
    assert_eq!(txs.len(), 7);
    let with_comment: Vec<_> = txs.iter().filter_map(|t| t.comment.as_deref()).collect();
    assert_eq!(with_comment, ["нет, не то"]);
}

#[tokio::test]
async fn comment_text_is_stored_verbatim() {
    let (engine, _db) = engine_with_db().await;

    engine
        .add_transaction(ALICE, TransactionKind::Expense, "Еда", 5.0, Some("  кофе  с собой "))
        .await
        .unwrap();

    let txs = engine.transactions(ALICE, Period::All).await.unwrap();
    assert_eq!(txs[0].comment.as_deref(), Some("  кофе  с собой "));
}

#[tokio::test]
async fn ids_are_unique_and_increasing() {
    let (engine, _db) = engine_with_db().await;

    let first = engine
        .add_transaction(ALICE, TransactionKind::Expense, "Дом", 1.0, None)
        .await
        .unwrap();
    let second = engine
        .add_transaction(ALICE, TransactionKind::Expense, "Дом", 2.0, None)
        .await
        .unwrap();
    assert!(second > first);
}

#[tokio::test]
async fn invalid_input_writes_nothing() {
    let (engine, db) = engine_with_db().await;

    let err = engine
        .add_transaction(ALICE, TransactionKind::Expense, "Еда", 0.0, None)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let err = engine
        .add_transaction(ALICE, TransactionKind::Expense, "Еда", -5.0, None)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let err = engine
        .add_transaction(ALICE, TransactionKind::Expense, "  ", 5.0, None)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidCategory(_)));

    assert_eq!(row_count(&db).await, 0);
}

#[tokio::test]
async fn query_is_scoped_to_the_user() {
    let (engine, _db) = engine_with_db().await;

    engine
        .add_transaction(ALICE, TransactionKind::Expense, "Еда", 10.0, None)
        .await
        .unwrap();
    engine
        .add_transaction(BOB, TransactionKind::Expense, "Еда", 20.0, None)
        .await
        .unwrap();

    let alice = engine.transactions(ALICE, Period::All).await.unwrap();
    assert_eq!(alice.len(), 1);
    assert_eq!(alice[0].amount, 10.0);
    assert!(engine.transactions(3003, Period::All).await.unwrap().is_empty());
}

#[tokio::test]
async fn results_are_most_recent_first() {
    let (engine, _db) = engine_with_db().await;
    let now = Utc::now();

    engine
        .add_transaction_at(ALICE, TransactionKind::Expense, "old", 1.0, None, now - TimeDelta::hours(3))
        .await
        .unwrap();
    engine
        .add_transaction_at(ALICE, TransactionKind::Expense, "new", 1.0, None, now - TimeDelta::minutes(1))
        .await
        .unwrap();
    engine
        .add_transaction_at(ALICE, TransactionKind::Expense, "mid", 1.0, None, now - TimeDelta::hours(1))
        .await
        .unwrap();

    let txs = engine.transactions(ALICE, Period::All).await.unwrap();
    let order: Vec<_> = txs.iter().map(|t| t.category.as_str()).collect();
    assert_eq!(order, ["new", "mid", "old"]);
}

#[tokio::test]
async fn period_windows_exclude_older_rows() {
    let (engine, _db) = engine_with_db().await;
    let now = Utc::now();

    engine
        .add_transaction(ALICE, TransactionKind::Expense, "today", 1.0, None)
        .await
        .unwrap();
    engine
        .add_transaction_at(ALICE, TransactionKind::Expense, "ten days", 1.0, None, now - TimeDelta::days(10))
        .await
        .unwrap();
    engine
        .add_transaction_at(ALICE, TransactionKind::Expense, "last year", 1.0, None, now - TimeDelta::days(400))
        .await
        .unwrap();

    let day = engine.transactions(ALICE, Period::Day).await.unwrap();
    assert_eq!(day.len(), 1);
    assert_eq!(day[0].category, "today");

    let week = engine.transactions(ALICE, Period::Week).await.unwrap();
    assert_eq!(week.len(), 1);

    let month_start = Period::Month.window_start(Utc::now(), Moscow).unwrap();
    let month = engine.transactions(ALICE, Period::Month).await.unwrap();
    assert!(month.iter().all(|t| t.date >= month_start));
    assert!(month.iter().any(|t| t.category == "today"));
    assert!(month.iter().all(|t| t.category != "last year"));

    assert_eq!(engine.transactions(ALICE, Period::All).await.unwrap().len(), 3);
}

#[tokio::test]
async fn window_start_boundary_is_inclusive() {
    let (engine, _db) = engine_with_db().await;
    let start = Period::Day.window_start(Utc::now(), Moscow).unwrap();

    engine
        .add_transaction_at(ALICE, TransactionKind::Expense, "at start", 1.0, None, start)
        .await
        .unwrap();
    engine
        .add_transaction_at(
            ALICE,
            TransactionKind::Expense,
            "just before",
            1.0,
            None,
            start - TimeDelta::milliseconds(1),
        )
        .await
        .unwrap();

    let txs = engine.transactions_since(ALICE, Some(start)).await.unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].category, "at start");

    let day = engine.transactions(ALICE, Period::Day).await.unwrap();
    assert!(day.iter().any(|t| t.category == "at start"));
    assert!(day.iter().all(|t| t.category != "just before"));
}

#[tokio::test]
async fn report_and_statistics_over_the_store() {
    let (engine, _db) = engine_with_db().await;

    engine
        .add_transaction(ALICE, TransactionKind::Expense, "Еда", 500.0, Some("обед"))
        .await
        .unwrap();
    engine
        .add_transaction(ALICE, TransactionKind::Income, "Зарплата", 2000.0, None)
        .await
        .unwrap();

    let PeriodReport::Entries {
        shown,
        hidden,
        totals,
    } = engine.report(ALICE, Period::Day, 1).await.unwrap()
    else {
        panic!("expected entries");
    };
    assert_eq!(shown.len(), 1);
    assert_eq!(hidden, 1);
    assert_eq!(totals.expense, 500.0);
    assert_eq!(totals.income, 2000.0);
    assert_eq!(totals.balance, 1500.0);

    let CategoryStatistics::Summary {
        count,
        top_expenses,
        ..
    } = engine.statistics(ALICE, Period::Month).await.unwrap()
    else {
        panic!("expected summary");
    };
    assert_eq!(count, 2);
    assert_eq!(top_expenses.len(), 1);
    assert_eq!(top_expenses[0].category, "Еда");
    assert_eq!(top_expenses[0].percentage, 100.0);

    assert_eq!(
        engine.report(BOB, Period::All, 15).await.unwrap(),
        PeriodReport::Empty
    );
    assert_eq!(
        engine.statistics(BOB, Period::All).await.unwrap(),
        CategoryStatistics::Empty
    );
}
