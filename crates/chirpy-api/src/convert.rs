use chrono::{DateTime, Utc};
use tracing::warn;
use uuid::Uuid;

use chirpy_db::models::{ChirpRow, UserRow};
use chirpy_types::api::{ChirpResponse, UserResponse};

pub fn user_response(row: UserRow) -> UserResponse {
    UserResponse {
        id: parse_id(&row.id, "user"),
        created_at: parse_timestamp(&row.created_at, &row.id),
        updated_at: parse_timestamp(&row.updated_at, &row.id),
        email: row.email.unwrap_or_default(),
    }
}

pub fn chirp_response(row: ChirpRow) -> ChirpResponse {
    ChirpResponse {
        id: parse_id(&row.id, "chirp"),
        created_at: parse_timestamp(&row.created_at, &row.id),
        updated_at: parse_timestamp(&row.updated_at, &row.id),
        user_id: parse_id(&row.user_id, "chirp owner"),
        body: row.body,
    }
}

fn parse_id(raw: &str, what: &str) -> Uuid {
    raw.parse().unwrap_or_else(|e| {
        warn!("Corrupt {} id '{}': {}", what, raw, e);
        Uuid::default()
    })
}

fn parse_timestamp(raw: &str, row_id: &str) -> DateTime<Utc> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| {
            // Rows written by hand through the sqlite shell use datetime('now'),
            // which has no timezone. Treat as UTC.
            chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!("Corrupt timestamp '{}' on row '{}': {}", raw, row_id, e);
            DateTime::default()
        })
}
