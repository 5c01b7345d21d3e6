use crate::Database;
use crate::models::{ChirpRow, UserRow};
use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, Row};

impl Database {
    // -- Users --

    pub fn create_user(
        &self,
        id: &str,
        email: Option<&str>,
        hashed_password: &str,
    ) -> Result<UserRow> {
        let now = timestamp();
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, email, hashed_password, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?4)",
                rusqlite::params![id, email, hashed_password, now],
            )?;
            Ok(UserRow {
                id: id.to_string(),
                email: email.map(str::to_string),
                hashed_password: hashed_password.to_string(),
                created_at: now.clone(),
                updated_at: now,
            })
        })
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "email", email))
    }

    pub fn get_user_by_id(&self, id: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "id", id))
    }

    /// Removes every user; their chirps go with them. Returns the user count.
    pub fn delete_users(&self) -> Result<usize> {
        self.with_conn(|conn| Ok(conn.execute("DELETE FROM users", [])?))
    }

    // -- Chirps --

    pub fn create_chirp(&self, id: &str, body: &str, user_id: &str) -> Result<ChirpRow> {
        let now = timestamp();
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO chirps (id, body, user_id, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?4)",
                rusqlite::params![id, body, user_id, now],
            )?;
            Ok(ChirpRow {
                id: id.to_string(),
                body: body.to_string(),
                user_id: user_id.to_string(),
                created_at: now.clone(),
                updated_at: now,
            })
        })
    }

    /// All chirps, oldest first.
    pub fn get_chirps(&self) -> Result<Vec<ChirpRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, body, user_id, created_at, updated_at
                 FROM chirps
                 ORDER BY created_at ASC, rowid ASC",
            )?;

            let rows = stmt
                .query_map([], chirp_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    pub fn get_chirp_by_id(&self, id: &str) -> Result<Option<ChirpRow>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT id, body, user_id, created_at, updated_at FROM chirps WHERE id = ?1",
                [id],
                chirp_from_row,
            )
            .optional()
        })
    }
}

/// True when `err` is a UNIQUE constraint failure, e.g. an email registered
/// concurrently after the caller's existence check.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<rusqlite::Error>(),
        Some(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// Fixed-width, so lexical order is chronological order.
fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn query_user(conn: &Connection, column: &str, value: &str) -> Result<Option<UserRow>> {
    // `column` is one of our own literals, never caller input.
    let sql = format!(
        "SELECT id, email, hashed_password, created_at, updated_at FROM users WHERE {} = ?1",
        column
    );
    let mut stmt = conn.prepare(&sql)?;

    let row = stmt
        .query_row([value], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                email: row.get(1)?,
                hashed_password: row.get(2)?,
                created_at: row.get(3)?,
                updated_at: row.get(4)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn chirp_from_row(row: &Row<'_>) -> rusqlite::Result<ChirpRow> {
    Ok(ChirpRow {
        id: row.get(0)?,
        body: row.get(1)?,
        user_id: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn new_id() -> String {
        Uuid::new_v4().to_string()
    }

    #[test]
    fn user_roundtrip_by_email_and_id() {
        let db = Database::open_in_memory().unwrap();
        let id = new_id();
        let created = db.create_user(&id, Some("walt@example.com"), "$argon2id$fake").unwrap();

        let by_email = db.get_user_by_email("walt@example.com").unwrap().unwrap();
        assert_eq!(by_email.id, id);
        assert_eq!(by_email.hashed_password, "$argon2id$fake");
        assert_eq!(by_email.created_at, created.created_at);
        assert_eq!(by_email.updated_at, created.created_at);

        assert!(db.get_user_by_id(&id).unwrap().is_some());
        assert!(db.get_user_by_email("jesse@example.com").unwrap().is_none());
    }

    #[test]
    fn null_emails_do_not_collide() {
        let db = Database::open_in_memory().unwrap();
        db.create_user(&new_id(), None, "h1").unwrap();
        db.create_user(&new_id(), None, "h2").unwrap();
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let db = Database::open_in_memory().unwrap();
        db.create_user(&new_id(), Some("dup@example.com"), "h").unwrap();

        let err = db.create_user(&new_id(), Some("dup@example.com"), "h").unwrap_err();
        assert!(is_unique_violation(&err));
    }

    #[test]
    fn other_failures_are_not_unique_violations() {
        let db = Database::open_in_memory().unwrap();

        // Foreign key failure, not UNIQUE.
        let err = db.create_chirp(&new_id(), "orphan", &new_id()).unwrap_err();
        assert!(!is_unique_violation(&err));
        assert!(!is_unique_violation(&anyhow::anyhow!("unrelated")));
    }

    #[test]
    fn chirps_come_back_oldest_first() {
        let db = Database::open_in_memory().unwrap();
        let user = new_id();
        db.create_user(&user, None, "h").unwrap();

        let first = db.create_chirp(&new_id(), "first", &user).unwrap();
        let second = db.create_chirp(&new_id(), "second", &user).unwrap();

        let all = db.get_chirps().unwrap();
        let ids: Vec<_> = all.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec![first.id.as_str(), second.id.as_str()]);

        let fetched = db.get_chirp_by_id(&second.id).unwrap().unwrap();
        assert_eq!(fetched.body, "second");
        assert!(db.get_chirp_by_id(&new_id()).unwrap().is_none());
    }

    #[test]
    fn chirp_requires_existing_user() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.create_chirp(&new_id(), "orphan", &new_id()).is_err());
    }

    #[test]
    fn deleting_users_cascades_to_chirps() {
        let db = Database::open_in_memory().unwrap();
        let user = new_id();
        db.create_user(&user, Some("gone@example.com"), "h").unwrap();
        db.create_chirp(&new_id(), "bye", &user).unwrap();

        assert_eq!(db.delete_users().unwrap(), 1);
        assert!(db.get_chirps().unwrap().is_empty());
        assert!(db.get_user_by_email("gone@example.com").unwrap().is_none());
    }

    #[test]
    fn reopening_a_file_keeps_data_and_skips_migrations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chirpy.db");
        let id = new_id();

        {
            let db = Database::open(&path).unwrap();
            db.create_user(&id, Some("persist@example.com"), "h").unwrap();
        }

        let db = Database::open(&path).unwrap();
        assert!(db.get_user_by_id(&id).unwrap().is_some());
    }
}
