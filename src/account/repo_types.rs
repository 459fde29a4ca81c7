use serde::Serialize;
use sqlx::FromRow;
use time::{Date, OffsetDateTime};

/// User record in the database. Plain data only; queries live in `repo`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub phone: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // argon2 PHC string, never exposed in JSON
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub birth_date: Option<Date>,
    pub created_at: OffsetDateTime,
}
