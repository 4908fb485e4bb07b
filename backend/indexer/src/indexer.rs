//! Background poll loop: drains `getEvents` pages from the Soroban RPC and
//! hands decoded campaign events to the database layer.
//!
//! The loop is crash-only. Each iteration persists its cursor after a
//! successful write, so a restart resumes from the last durable position and
//! the `INSERT OR IGNORE` uniqueness in `db` absorbs any replayed page.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use sqlx::SqlitePool;
use tracing::{error, info};

use crate::config::Config;
use crate::db;
use crate::rpc;

pub struct IndexerState {
    pub pool: SqlitePool,
    pub config: Config,
    pub client: Client,
}

/// Run the poll loop forever. Intended to be spawned as a [`tokio`] task
/// alongside the API server.
pub async fn run(state: Arc<IndexerState>) {
    info!(
        "watching contract {} via {}",
        state.config.contract_id, state.config.rpc_url
    );

    // Resume position: the persisted cursor wins over START_LEDGER.
    let last_ledger = db::get_last_ledger(&state.pool).await.unwrap_or(0);
    let mut cursor = db::get_cursor_string(&state.pool).await.unwrap_or(None);
    let mut current_ledger = if last_ledger > 0 {
        last_ledger as u32
    } else {
        state.config.start_ledger
    };

    info!("resuming from ledger {current_ledger}");

    loop {
        match poll_once(
            &state.pool,
            &state.client,
            &state.config,
            current_ledger,
            cursor.as_deref(),
        )
        .await
        {
            Ok((next_ledger, next_cursor)) => {
                current_ledger = next_ledger;
                cursor = next_cursor;
            }
            // A failed cycle keeps the old cursor; the next tick retries
            // the same window.
            Err(e) => error!("poll cycle failed: {e}"),
        }

        tokio::time::sleep(Duration::from_secs(state.config.poll_interval_secs)).await;
    }
}

/// One fetch-decode-store cycle. Returns `(next_start_ledger, next_cursor)`:
/// a non-empty cursor means the RPC has more pages within the same ledger
/// window, so the start ledger is held steady until pagination drains.
async fn poll_once(
    pool: &SqlitePool,
    client: &Client,
    config: &Config,
    start_ledger: u32,
    cursor: Option<&str>,
) -> crate::errors::Result<(u32, Option<String>)> {
    let (raw_events, next_cursor, latest_ledger) = rpc::fetch_events(
        client,
        &config.rpc_url,
        &config.contract_id,
        start_ledger,
        cursor,
        config.events_per_page,
    )
    .await?;

    if !raw_events.is_empty() {
        let decoded = rpc::decode_events(&raw_events, &config.contract_id);
        let inserted = db::insert_events(pool, &decoded).await?;
        info!(
            "{} raw events decoded, {} new rows",
            raw_events.len(),
            inserted
        );
    }

    let next_ledger = latest_ledger
        .map(|l| (l as u32).max(start_ledger))
        .unwrap_or(start_ledger);

    db::save_cursor(pool, next_ledger as i64, next_cursor.as_deref()).await?;

    Ok((next_ledger, next_cursor))
}
