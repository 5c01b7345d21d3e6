/// Database row types — these map directly to SQLite rows.
/// Distinct from chirpy-types API models to keep the DB layer independent.
/// Timestamps are RFC 3339 UTC strings.

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: String,
    pub email: Option<String>,
    pub hashed_password: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone)]
pub struct ChirpRow {
    pub id: String,
    pub body: String,
    pub user_id: String,
    pub created_at: String,
    pub updated_at: String,
}
