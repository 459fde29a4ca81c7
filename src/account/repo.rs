use sqlx::PgPool;
use time::Date;

use crate::account::repo_types::User;

/// The unique indexes on `users.phone` and `users.email` are the
/// authoritative uniqueness guard; handler pre-checks only exist for
/// friendlier messages. A raced insert lands here as a duplicate error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Phone number already registered")]
    DuplicatePhone,
    #[error("Email already registered")]
    DuplicateEmail,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub async fn find_by_phone(db: &PgPool, phone: &str) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, phone, password_hash, full_name, email, birth_date, created_at
        FROM users
        WHERE phone = $1
        "#,
    )
    .bind(phone)
    .fetch_optional(db)
    .await
}

pub async fn find_by_email(db: &PgPool, email: &str) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, phone, password_hash, full_name, email, birth_date, created_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(db)
    .await
}

pub async fn find_by_id(db: &PgPool, id: i64) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, phone, password_hash, full_name, email, birth_date, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

/// Insert a new user with an already-hashed password. `id` and `created_at`
/// are assigned by the database and never change afterwards.
pub async fn create(
    db: &PgPool,
    phone: &str,
    full_name: &str,
    email: &str,
    birth_date: Date,
    password_hash: &str,
) -> Result<User, StoreError> {
    let res = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (phone, password_hash, full_name, email, birth_date)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, phone, password_hash, full_name, email, birth_date, created_at
        "#,
    )
    .bind(phone)
    .bind(password_hash)
    .bind(full_name)
    .bind(email)
    .bind(birth_date)
    .fetch_one(db)
    .await;

    match res {
        Ok(user) => Ok(user),
        Err(sqlx::Error::Database(e)) if e.constraint() == Some("users_phone_key") => {
            Err(StoreError::DuplicatePhone)
        }
        Err(sqlx::Error::Database(e)) if e.constraint() == Some("users_email_key") => {
            Err(StoreError::DuplicateEmail)
        }
        Err(e) => Err(StoreError::Database(e)),
    }
}
