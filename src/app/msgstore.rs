use std::path::Path;

use rusqlite::{Connection, OpenFlags};

use crate::app::error::AppError;
use crate::app::models::MessageRow;

/// Upper bound on rows read per extraction; a triage preview, not a full
/// message dump.
pub const MESSAGE_ROW_LIMIT: usize = 50;

// Timestamps are stored as epoch milliseconds; SQLite renders them to
// calendar form at query time. The schema (table and column names) is the
// messaging application's and must match it exactly.
const MESSAGE_QUERY: &str =
    "SELECT datetime(timestamp / 1000, 'unixepoch'), key_remote_jid, data FROM messages LIMIT 50";

/// Reads up to [`MESSAGE_ROW_LIMIT`] rows from the recovered messaging
/// database, opened read-only. Any access failure (missing table, locked
/// file, schema drift) is a database error for the caller to render inline;
/// it never aborts the run.
pub fn read_messages(db_path: &Path, trace_id: &str) -> Result<Vec<MessageRow>, AppError> {
    let conn = Connection::open_with_flags(db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .map_err(|err| AppError::database(format!("Failed to open messaging store: {err}"), trace_id))?;

    let mut stmt = conn
        .prepare(MESSAGE_QUERY)
        .map_err(|err| AppError::database(format!("Failed to query messages: {err}"), trace_id))?;
    let rows = stmt
        .query_map([], |row| {
            Ok(MessageRow {
                timestamp: row.get(0)?,
                conversation_id: row.get(1)?,
                content: row.get(2)?,
            })
        })
        .map_err(|err| AppError::database(format!("Failed to query messages: {err}"), trace_id))?;

    let mut messages = Vec::new();
    for row in rows {
        let row = row.map_err(|err| {
            AppError::database(format!("Failed to read message row: {err}"), trace_id)
        })?;
        messages.push(row);
        if messages.len() >= MESSAGE_ROW_LIMIT {
            break;
        }
    }
    Ok(messages)
}

/// Renders one message the way the report displays it.
pub fn format_message(row: &MessageRow) -> String {
    format!(
        "[{}] {}: {}",
        row.timestamp,
        row.conversation_id,
        row.content.as_deref().unwrap_or("")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_store(path: &Path, count: usize) {
        let conn = Connection::open(path).expect("create db");
        conn.execute(
            "CREATE TABLE messages (timestamp INTEGER, key_remote_jid TEXT, data TEXT)",
            [],
        )
        .expect("create table");
        for i in 0..count {
            conn.execute(
                "INSERT INTO messages VALUES (?1, ?2, ?3)",
                rusqlite::params![
                    1_700_000_000_000_i64 + i as i64 * 60_000,
                    format!("447700900{i:03}@s.whatsapp.net"),
                    format!("message {i}")
                ],
            )
            .expect("insert");
        }
    }

    #[test]
    fn reads_rows_with_rendered_timestamps() {
        let dir = tempfile::tempdir().expect("tempdir");
        let db = dir.path().join("msgstore.db");
        seed_store(&db, 3);

        let rows = read_messages(&db, "test-trace").expect("read");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].timestamp, "2023-11-14 22:13:20");
        assert_eq!(rows[0].conversation_id, "447700900000@s.whatsapp.net");
        assert_eq!(rows[0].content.as_deref(), Some("message 0"));
        assert_eq!(
            format_message(&rows[0]),
            "[2023-11-14 22:13:20] 447700900000@s.whatsapp.net: message 0"
        );
    }

    #[test]
    fn caps_reads_at_the_row_limit() {
        let dir = tempfile::tempdir().expect("tempdir");
        let db = dir.path().join("msgstore.db");
        seed_store(&db, MESSAGE_ROW_LIMIT + 25);

        let rows = read_messages(&db, "test-trace").expect("read");
        assert_eq!(rows.len(), MESSAGE_ROW_LIMIT);
    }

    #[test]
    fn null_content_renders_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let db = dir.path().join("msgstore.db");
        let conn = Connection::open(&db).expect("create db");
        conn.execute(
            "CREATE TABLE messages (timestamp INTEGER, key_remote_jid TEXT, data TEXT)",
            [],
        )
        .expect("create table");
        conn.execute(
            "INSERT INTO messages VALUES (1700000000000, 'jid@s.whatsapp.net', NULL)",
            [],
        )
        .expect("insert");
        drop(conn);

        let rows = read_messages(&db, "test-trace").expect("read");
        assert_eq!(rows[0].content, None);
        assert!(format_message(&rows[0]).ends_with("jid@s.whatsapp.net: "));
    }

    #[test]
    fn schema_mismatch_is_a_database_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let db = dir.path().join("msgstore.db");
        let conn = Connection::open(&db).expect("create db");
        conn.execute("CREATE TABLE chats (id INTEGER)", [])
            .expect("create table");
        drop(conn);

        let err = read_messages(&db, "test-trace").expect_err("missing table must fail");
        assert_eq!(err.code, "ERR_DATABASE");
    }
}
