//! PostgreSQL integration tests
//!
//! These run only when `DATABASE_URL` points at a PostgreSQL server. Every
//! test works inside one session that is rolled back at the end, so no
//! tables or views are left behind.

use barerow::prelude::*;

#[derive(Debug, Clone, PartialEq, Record)]
#[record(table = "barerow_pg_events")]
pub struct PgEvent {
    pub id: Uuid,
    pub event: String,
    pub created_at: DateTime<Utc>,
}

async fn setup_db() -> Option<BareRow<Postgres>> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping PostgreSQL test");
        return None;
    };

    let config = DatabaseConfig::from_url(database_url).with_pool_size(1, 2);
    let db = BareRow::<Postgres>::connect(&config, SessionConfig::default())
        .await
        .expect("Failed to connect to database");
    Some(db)
}

async fn create_table(session: &mut Session<Postgres>) {
    session
        .execute(sqlx::query(
            "CREATE TABLE barerow_pg_events (
                id UUID PRIMARY KEY,
                event TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL
            )",
        ))
        .await
        .expect("Failed to create table");
}

#[tokio::test]
async fn test_postgres_insert_returning_and_tuples() {
    let Some(db) = setup_db().await else {
        return;
    };

    let mut session = db.sessions().begin().await.unwrap();
    create_table(&mut session).await;

    let batch: Vec<PgEvent> = ["a", "b"]
        .iter()
        .map(|event| PgEvent {
            id: Uuid::new_v4(),
            event: event.to_string(),
            created_at: Utc::now(),
        })
        .collect();
    let ids: Vec<Uuid> = batch.iter().map(|event| event.id).collect();

    let mut insert = insert_records::<Postgres, _, _>(batch).unwrap();
    let inserted = session.records::<PgEvent, _>(insert.build()).await.unwrap();
    assert_eq!(inserted.len(), 2);
    assert_eq!(inserted[0].id, ids[0]);
    assert_eq!(inserted[1].event, "b");

    let pairs = session
        .records::<(PgEvent, PgEvent), _>(sqlx::query(
            "SELECT l.id, l.event, l.created_at, r.id, r.event, r.created_at
             FROM barerow_pg_events l CROSS JOIN barerow_pg_events r
             WHERE l.event = 'a' AND r.event = 'b'",
        ))
        .await
        .unwrap();
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].0.id, ids[0]);
    assert_eq!(pairs[0].1.id, ids[1]);

    session.rollback().await.unwrap();
}

#[tokio::test]
async fn test_postgres_views_with_cascade() {
    let Some(db) = setup_db().await else {
        return;
    };

    let mut views = ViewSet::new();
    views
        .register(ViewTable::new(
            "barerow_pg_latest",
            "SELECT id, event, created_at FROM barerow_pg_events ORDER BY created_at DESC LIMIT 1",
        ))
        .unwrap();

    let mut session = db.sessions().begin().await.unwrap();
    create_table(&mut session).await;

    let created = views.create_all(&mut session).await.unwrap();
    assert_eq!(created, vec!["barerow_pg_latest"]);
    assert!(view_exists(&mut session, "barerow_pg_latest").await.unwrap());

    let dropped = views.drop_all(&mut session).await.unwrap();
    assert_eq!(dropped, vec!["barerow_pg_latest"]);
    assert!(!view_exists(&mut session, "barerow_pg_latest").await.unwrap());

    session.rollback().await.unwrap();
}
