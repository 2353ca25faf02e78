//! SQLite-backed record store.
//!
//! Opening a store bootstraps the schema, so a fresh database file is
//! ready for writes immediately. All statements are idempotent; reopening
//! an existing file leaves its rows untouched.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use gleaner_core::traits::RecordStore;
use gleaner_core::{AppError, DbConfig, Repo, Selection, SortOrder, User};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::sql::{self, BindValue};

/// How long a connection waits on a locked database before giving up.
/// Concurrent upserts from the harvest fan-out contend on the write lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Schema bootstrap, executed on every open.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id     INTEGER PRIMARY KEY,
    login  TEXT NOT NULL,
    url    TEXT NOT NULL
);
CREATE UNIQUE INDEX IF NOT EXISTS idx_users_login ON users (login);
CREATE TABLE IF NOT EXISTS repos (
    id          INTEGER PRIMARY KEY,
    owner_id    INTEGER NOT NULL,
    url         TEXT NOT NULL,
    name        TEXT NOT NULL,
    description TEXT,
    language    TEXT,
    FOREIGN KEY (owner_id) REFERENCES users (id)
);
"#;

// Column lists for SELECT statements. Must remain const literals to ensure
// SQL safety since format!() bypasses sqlx compile-time validation.
const USER_COLUMNS: &str = "id, login, url";
const REPO_COLUMNS: &str = "id, owner_id, url, name, description, language";

const UPSERT_USER: &str = r#"
INSERT INTO users (id, login, url)
VALUES (?, ?, ?)
ON CONFLICT (id) DO UPDATE SET
    login = excluded.login,
    url = excluded.url
"#;

const UPSERT_REPO: &str = r#"
INSERT INTO repos (id, owner_id, url, name, description, language)
VALUES (?, ?, ?, ?, ?, ?)
ON CONFLICT (id) DO UPDATE SET
    owner_id = excluded.owner_id,
    url = excluded.url,
    name = excluded.name,
    description = excluded.description,
    language = excluded.language
"#;

/// Record store backed by a SQLite connection pool.
///
/// Cloning is cheap and shares the pool. The database runs in WAL mode
/// with foreign keys enforced, so repos referencing unknown owners are
/// rejected rather than silently orphaned.
///
/// # Examples
///
/// ```no_run
/// use gleaner_db::SqliteStore;
///
/// # async fn example() -> Result<(), gleaner_core::AppError> {
/// let store = SqliteStore::open("./data.sqlite").await?;
/// store.health_check().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens the store at `path`, creating the file and any missing parent
    /// directories, and bootstraps the schema.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        Self::open_with_config(path, &DbConfig::default()).await
    }

    /// Opens the store with an explicit pool configuration.
    pub async fn open_with_config(
        path: impl AsRef<Path>,
        config: &DbConfig,
    ) -> Result<Self, AppError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::ConfigError(format!(
                    "cannot create database directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let opts = SqliteConnectOptions::from_str(&format!("sqlite://{}?mode=rwc", path.display()))?
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(opts)
            .await?;

        Self::bootstrap(pool).await
    }

    /// Opens a private in-memory store.
    ///
    /// The pool is capped at one connection: each SQLite in-memory
    /// database is visible only to the connection that created it.
    pub async fn in_memory() -> Result<Self, AppError> {
        let opts = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .connect_with(opts)
            .await?;

        Self::bootstrap(pool).await
    }

    async fn bootstrap(pool: SqlitePool) -> Result<Self, AppError> {
        sqlx::query(SCHEMA).execute(&pool).await?;
        Ok(Self { pool })
    }

    /// Checks database connectivity by executing a trivial query.
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(AppError::DatabaseError)?;
        Ok(())
    }

    /// Counts stored users.
    pub async fn count_users(&self) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Counts stored repos.
    pub async fn count_repos(&self) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM repos")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

impl RecordStore for SqliteStore {
    async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        sqlx::query(UPSERT_USER)
            .bind(user.id)
            .bind(&user.login)
            .bind(&user.url)
            .execute(&self.pool)
            .await
            .map_err(AppError::DatabaseError)?;
        Ok(())
    }

    async fn upsert_repo(&self, repo: &Repo) -> Result<(), AppError> {
        sqlx::query(UPSERT_REPO)
            .bind(repo.id)
            .bind(repo.owner_id)
            .bind(&repo.url)
            .bind(&repo.name)
            .bind(&repo.description)
            .bind(&repo.language)
            .execute(&self.pool)
            .await
            .map_err(AppError::DatabaseError)?;
        Ok(())
    }

    async fn get_user(&self, selection: &Selection) -> Result<Option<User>, AppError> {
        let rendered = sql::render(selection);
        let query = format!("SELECT {USER_COLUMNS} FROM users{}", rendered.clauses);
        bind_all(sqlx::query_as::<_, User>(&query), rendered.binds)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::DatabaseError)
    }

    async fn get_repo(&self, selection: &Selection) -> Result<Option<Repo>, AppError> {
        let rendered = sql::render(selection);
        let query = format!("SELECT {REPO_COLUMNS} FROM repos{}", rendered.clauses);
        bind_all(sqlx::query_as::<_, Repo>(&query), rendered.binds)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::DatabaseError)
    }

    async fn list_users(&self, selection: &Selection) -> Result<Vec<User>, AppError> {
        let rendered = sql::render(selection);
        let query = format!("SELECT {USER_COLUMNS} FROM users{}", rendered.clauses);
        bind_all(sqlx::query_as::<_, User>(&query), rendered.binds)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::DatabaseError)
    }

    async fn list_repos(&self, selection: &Selection) -> Result<Vec<Repo>, AppError> {
        let rendered = sql::render(selection);
        let query = format!("SELECT {REPO_COLUMNS} FROM repos{}", rendered.clauses);
        bind_all(sqlx::query_as::<_, Repo>(&query), rendered.binds)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::DatabaseError)
    }

    async fn last_user_id(&self) -> Result<i64, AppError> {
        let newest = self
            .get_user(&Selection::new().order_by(SortOrder::desc("id")))
            .await?;
        Ok(newest.map(|user| user.id).unwrap_or(0))
    }
}

/// Attaches rendered bind values to a query in placeholder order.
fn bind_all<'q, T>(
    query: sqlx::query::QueryAs<'q, sqlx::Sqlite, T, sqlx::sqlite::SqliteArguments<'q>>,
    binds: Vec<BindValue>,
) -> sqlx::query::QueryAs<'q, sqlx::Sqlite, T, sqlx::sqlite::SqliteArguments<'q>> {
    binds.into_iter().fold(query, |q, bind| match bind {
        BindValue::Int(value) => q.bind(value),
        BindValue::Text(value) => q.bind(value),
    })
}
