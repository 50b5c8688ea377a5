//! Database layer: migrations, event queries and the resume cursor.

use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tracing::info;

use crate::errors::Result;
use crate::events::{EventRecord, TrackerEvent};

/// Establish a SQLite connection pool and run pending migrations.
pub async fn init_pool(database_url: &str) -> Result<SqlitePool> {
    let url = if database_url.starts_with("sqlite:") {
        database_url.to_string()
    } else {
        format!("sqlite:{database_url}")
    };
    // Create the database file on first start.
    let url = if url.contains('?') || url.contains(":memory:") {
        url
    } else {
        format!("{url}?mode=rwc")
    };

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database migrations applied successfully");
    Ok(pool)
}

// ─────────────────────────────────────────────────────────
// Cursor helpers
// ─────────────────────────────────────────────────────────

/// Read the last-seen ledger from the cursor row.
/// Returns `0` when no cursor has been persisted yet.
pub async fn get_last_ledger(pool: &SqlitePool) -> Result<i64> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT last_ledger FROM indexer_cursor WHERE id = 1")
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|(v,)| v).unwrap_or(0))
}

/// Persist the last-seen ledger (and optionally a pagination cursor string).
pub async fn save_cursor(
    pool: &SqlitePool,
    last_ledger: i64,
    last_cursor: Option<&str>,
) -> Result<()> {
    sqlx::query("UPDATE indexer_cursor SET last_ledger = ?1, last_cursor = ?2 WHERE id = 1")
        .bind(last_ledger)
        .bind(last_cursor)
        .execute(pool)
        .await?;
    Ok(())
}

/// Read back the raw cursor string (used to resume pagination mid-ledger).
pub async fn get_cursor_string(pool: &SqlitePool) -> Result<Option<String>> {
    let row: Option<(Option<String>,)> =
        sqlx::query_as("SELECT last_cursor FROM indexer_cursor WHERE id = 1")
            .fetch_optional(pool)
            .await?;
    Ok(row.and_then(|(v,)| v))
}

// ─────────────────────────────────────────────────────────
// Event writes
// ─────────────────────────────────────────────────────────

/// Persist a batch of decoded events. Events whose `event_id` is already
/// stored are silently ignored to make the indexer idempotent.
pub async fn insert_events(pool: &SqlitePool, events: &[TrackerEvent]) -> Result<usize> {
    let mut tx = pool.begin().await?;
    let mut count = 0usize;
    for ev in events {
        let rows_affected = sqlx::query(
            r#"
            INSERT OR IGNORE INTO events
                (event_id, event_type, contribution_id, actor, detail, ledger, timestamp,
                 contract_id, tx_hash)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&ev.event_id)
        .bind(&ev.event_type)
        .bind(&ev.contribution_id)
        .bind(&ev.actor)
        .bind(&ev.detail)
        .bind(ev.ledger)
        .bind(ev.timestamp)
        .bind(&ev.contract_id)
        .bind(&ev.tx_hash)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        count += rows_affected as usize;
    }
    tx.commit().await?;
    Ok(count)
}

// ─────────────────────────────────────────────────────────
// Event reads
// ─────────────────────────────────────────────────────────

/// Fetch all events for a given contribution, ordered by ledger ascending.
pub async fn get_events_for_contribution(
    pool: &SqlitePool,
    contribution_id: &str,
) -> Result<Vec<EventRecord>> {
    let rows = sqlx::query_as::<_, EventRecord>(
        r#"
        SELECT id, event_id, event_type, contribution_id, actor, detail, ledger, timestamp,
               contract_id, tx_hash, created_at
        FROM   events
        WHERE  contribution_id = ?1
        ORDER  BY ledger ASC, id ASC
        "#,
    )
    .bind(contribution_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Fetch every event in which `actor` was the volunteer, approver or authority.
pub async fn get_events_for_actor(pool: &SqlitePool, actor: &str) -> Result<Vec<EventRecord>> {
    let rows = sqlx::query_as::<_, EventRecord>(
        r#"
        SELECT id, event_id, event_type, contribution_id, actor, detail, ledger, timestamp,
               contract_id, tx_hash, created_at
        FROM   events
        WHERE  actor = ?1
        ORDER  BY ledger ASC, id ASC
        "#,
    )
    .bind(actor)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Fetch all events, ordered by ledger ascending.
pub async fn get_all_events(pool: &SqlitePool) -> Result<Vec<EventRecord>> {
    let rows = sqlx::query_as::<_, EventRecord>(
        r#"
        SELECT id, event_id, event_type, contribution_id, actor, detail, ledger, timestamp,
               contract_id, tx_hash, created_at
        FROM   events
        ORDER  BY ledger ASC, id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    // A single connection keeps every query on the same in-memory database.
    async fn memory_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        pool
    }

    fn event(event_type: &str, contribution_id: &str, actor: &str, ledger: i64) -> TrackerEvent {
        TrackerEvent {
            event_id: format!("{ledger:019}-{contribution_id}-{event_type}"),
            event_type: event_type.to_string(),
            contribution_id: Some(contribution_id.to_string()),
            actor: Some(actor.to_string()),
            detail: Some("1".to_string()),
            ledger,
            timestamp: 1_704_067_200 + ledger,
            contract_id: "CONTRACT1".to_string(),
            tx_hash: Some(format!("TX{ledger}")),
        }
    }

    #[tokio::test]
    async fn insert_is_idempotent() {
        let pool = memory_pool().await;
        let batch = vec![
            event("contribution_logged", "0", "GVOL", 10),
            event("contribution_approved", "0", "GAPP", 11),
        ];

        assert_eq!(insert_events(&pool, &batch).await.unwrap(), 2);
        assert_eq!(insert_events(&pool, &batch).await.unwrap(), 0);
        assert_eq!(get_all_events(&pool).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn config_events_are_deduplicated() {
        let pool = memory_pool().await;
        let min_set = TrackerEvent {
            event_id: "0000000042949672960-0000000000".to_string(),
            event_type: "min_approvals_set".to_string(),
            contribution_id: None,
            actor: Some("GAUTH".to_string()),
            detail: Some("3".to_string()),
            ledger: 10,
            timestamp: 1_704_067_210,
            contract_id: "CONTRACT1".to_string(),
            tx_hash: Some("TX10".to_string()),
        };

        assert_eq!(insert_events(&pool, &[min_set.clone()]).await.unwrap(), 1);
        assert_eq!(insert_events(&pool, &[min_set]).await.unwrap(), 0);

        let all = get_all_events(&pool).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].event_type, "min_approvals_set");
        assert_eq!(all[0].contribution_id, None);
    }

    #[tokio::test]
    async fn queries_filter_by_contribution_and_actor() {
        let pool = memory_pool().await;
        insert_events(
            &pool,
            &[
                event("contribution_logged", "0", "GVOL", 10),
                event("contribution_logged", "1", "GOTHER", 12),
                event("contribution_approved", "0", "GAPP", 13),
            ],
        )
        .await
        .unwrap();

        let for_zero = get_events_for_contribution(&pool, "0").await.unwrap();
        assert_eq!(for_zero.len(), 2);
        assert_eq!(for_zero[0].event_type, "contribution_logged");
        assert_eq!(for_zero[1].event_type, "contribution_approved");

        let by_approver = get_events_for_actor(&pool, "GAPP").await.unwrap();
        assert_eq!(by_approver.len(), 1);
        assert_eq!(by_approver[0].contribution_id.as_deref(), Some("0"));
    }

    #[tokio::test]
    async fn cursor_round_trips() {
        let pool = memory_pool().await;
        assert_eq!(get_last_ledger(&pool).await.unwrap(), 0);
        assert_eq!(get_cursor_string(&pool).await.unwrap(), None);

        save_cursor(&pool, 4321, Some("0000001-1")).await.unwrap();
        assert_eq!(get_last_ledger(&pool).await.unwrap(), 4321);
        assert_eq!(
            get_cursor_string(&pool).await.unwrap().as_deref(),
            Some("0000001-1")
        );
    }
}
