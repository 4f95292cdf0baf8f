use sqlx::SqlitePool;

use crate::{
    db,
    errors::AppError,
    structs::User,
    utils::{hash_password, safe, verify_password},
};

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    employee_name TEXT
);
CREATE INDEX IF NOT EXISTS idx_users_username ON users (username);
";

/// Repository over the `users` table. Owns its pool exclusively; nothing
/// else writes to this database file.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    pool: SqlitePool,
}

impl CredentialStore {
    /// Open (and create if missing) the credentials database at `url`.
    pub async fn open(url: &str) -> Result<Self, AppError> {
        let pool = db::connect(url).await?;
        Self::with_pool(pool).await
    }

    /// Open the database named by `LOGIN_DATABASE_URL`, or `login.db`.
    pub async fn open_default() -> Result<Self, AppError> {
        Self::open(&db::login_db_url()).await
    }

    /// In-memory store for tests.
    pub async fn open_in_memory() -> Result<Self, AppError> {
        let pool = db::connect_in_memory().await?;
        Self::with_pool(pool).await
    }

    pub async fn with_pool(pool: SqlitePool) -> Result<Self, AppError> {
        sqlx::raw_sql(SCHEMA).execute(&pool).await?;
        Ok(Self { pool })
    }

    /// Insert a new user and return its row id. The password is hashed with
    /// argon2 before it is stored. A duplicate username surfaces as
    /// [`AppError::Conflict`] via the column's uniqueness constraint.
    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        employee_name: Option<&str>,
    ) -> Result<i64, AppError> {
        let username = safe(username);
        let pwd_hash = hash_password(&safe(password))?;

        let result = sqlx::query("INSERT INTO users (username, password, employee_name) VALUES (?, ?, ?)")
            .bind(&username)
            .bind(&pwd_hash)
            .bind(employee_name.map(safe))
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => {
                log::info!("User created: {}", username);
                Ok(done.last_insert_rowid())
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                log::warn!("Username already taken: {}", username);
                Err(AppError::Conflict)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Check if a username is already in the table. Used by registration to
    /// pre-empt a doomed insert with a field-specific message.
    pub async fn user_exists(&self, username: &str) -> Result<bool, AppError> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE username = ?")
            .bind(safe(username))
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    /// True iff a user with this exact (case-sensitive) username exists and
    /// the password verifies against the stored hash.
    pub async fn validate_login(&self, username: &str, password: &str) -> Result<bool, AppError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT password FROM users WHERE username = ?")
            .bind(safe(username))
            .fetch_optional(&self.pool)
            .await?;

        Ok(match row {
            Some((stored_hash,)) => verify_password(&safe(password), &stored_hash),
            None => false,
        })
    }

    /// Replace the password for a username. Returns the number of rows
    /// updated; 0 means no such user and the caller must treat that as a
    /// failure, not a silent success.
    pub async fn change_password(&self, username: &str, new_password: &str) -> Result<u64, AppError> {
        let username = safe(username);
        let pwd_hash = hash_password(&safe(new_password))?;

        let done = sqlx::query("UPDATE users SET password = ? WHERE username = ?")
            .bind(&pwd_hash)
            .bind(&username)
            .execute(&self.pool)
            .await?;

        if done.rows_affected() > 0 {
            log::info!("Password changed for user: {}", username);
        }
        Ok(done.rows_affected())
    }

    /// Fetch a user row by username.
    pub async fn get_user(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password, employee_name FROM users WHERE username = ?",
        )
        .bind(safe(username))
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Administrative escape hatch; there is no user-facing delete flow.
    pub async fn delete_user_by_id(&self, id: i64) -> Result<u64, AppError> {
        let done = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if done.rows_affected() > 0 {
            log::info!("User with id {} deleted", id);
        }
        Ok(done.rows_affected())
    }
}
