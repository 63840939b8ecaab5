//! Key/value blob storage: each collection lives as one JSON array under its
//! own key, written and read as a whole.

use crate::core::state::{AppState, Collection};
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub const SYNC_STATE_KEY: &str = "sync_state";

pub fn get_blob(conn: &Connection, key: &str) -> AppResult<Option<String>> {
    let value = conn
        .query_row("SELECT value FROM storage WHERE key = ?1", [key], |row| {
            row.get::<_, String>(0)
        })
        .optional()?;
    Ok(value)
}

pub fn put_blob(conn: &Connection, key: &str, value: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO storage (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![key, value, Local::now().to_rfc3339()],
    )?;
    Ok(())
}

pub fn load_collection<T: DeserializeOwned>(conn: &Connection, key: &str) -> AppResult<Vec<T>> {
    match get_blob(conn, key)? {
        Some(raw) if !raw.trim().is_empty() => {
            serde_json::from_str(&raw).map_err(|source| AppError::Collection {
                key: key.to_string(),
                source,
            })
        }
        _ => Ok(Vec::new()),
    }
}

pub fn save_collection<T: Serialize>(conn: &Connection, key: &str, items: &[T]) -> AppResult<()> {
    let raw = serde_json::to_string(items)?;
    put_blob(conn, key, &raw)
}

pub fn load_state(conn: &Connection) -> AppResult<AppState> {
    Ok(AppState {
        records: load_collection(conn, Collection::Records.key())?,
        students: load_collection(conn, Collection::Students.key())?,
        classes: load_collection(conn, Collection::Classes.key())?,
    })
}

/// Persist one collection of `state`.
pub fn save_one(conn: &Connection, state: &AppState, which: Collection) -> AppResult<()> {
    match which {
        Collection::Records => save_collection(conn, which.key(), &state.records),
        Collection::Students => save_collection(conn, which.key(), &state.students),
        Collection::Classes => save_collection(conn, which.key(), &state.classes),
    }
}

/// Bookkeeping of the sync mirror, stored next to the collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncState {
    #[serde(default)]
    pub last_sync: Option<DateTime<Utc>>,
}

pub fn load_sync_state(conn: &Connection) -> AppResult<SyncState> {
    match get_blob(conn, SYNC_STATE_KEY)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(SyncState::default()),
    }
}

pub fn save_sync_state(conn: &Connection, state: &SyncState) -> AppResult<()> {
    put_blob(conn, SYNC_STATE_KEY, &serde_json::to_string(state)?)
}

/// Row counts and last write time per key, for `db --info`.
pub fn describe(conn: &Connection) -> AppResult<Vec<(String, usize, String)>> {
    let mut stmt = conn.prepare("SELECT key, value, updated_at FROM storage ORDER BY key ASC")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        let (key, value, updated_at) = r?;
        let items = serde_json::from_str::<Vec<serde_json::Value>>(&value)
            .map(|v| v.len())
            .unwrap_or(0);
        out.push((key, items, updated_at));
    }
    Ok(out)
}
