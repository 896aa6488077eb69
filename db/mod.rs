use crate::*;

mod query;
pub use query::*;
mod task;
pub use task::*;

use chrono::{NaiveDateTime, Utc};
use sqlx::{
    query as sql, query_as,
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
};
use std::str::FromStr;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    task TEXT NOT NULL CHECK (length(task) BETWEEN 1 AND 500),
    is_done INTEGER NOT NULL DEFAULT 0 CHECK (is_done IN (0, 1)),
    priority INTEGER NOT NULL DEFAULT 1 CHECK (priority BETWEEN 0 AND 2),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)";

/// Current server time used for `created_at` and `updated_at`
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Handle to the task table, cheap to clone and shared across requests
#[derive(Clone, Debug)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Opens a pool for the given sqlite url, creating the file when missing
    pub async fn connect(url: &str) -> sqlx::Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        // every connection to an in-memory url is a separate database
        let pool = if url.contains(":memory:") || url.contains("mode=memory") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        }
        .connect_with(options)
        .await?;
        debug!("connected to {url}");
        Ok(Self { pool })
    }

    /// Fresh migrated store that lives as long as its clones
    pub async fn in_memory() -> sqlx::Result<Self> {
        let store = Self::connect("sqlite::memory:").await?;
        store.migrate().await?;
        Ok(store)
    }

    pub async fn migrate(&self) -> sqlx::Result<()> {
        sql(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    pub async fn ping(&self) -> sqlx::Result<()> {
        sql("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn insert(
        &self,
        text: &TaskText,
        priority: Priority,
        now: NaiveDateTime,
    ) -> sqlx::Result<Task> {
        let q = "INSERT INTO todos (task, is_done, priority, created_at, updated_at)
                 VALUES (?, 0, ?, ?, ?)
                 RETURNING id, task, is_done, priority, created_at, updated_at";
        query_as::<_, Task>(q)
            .bind(text.as_str())
            .bind(priority)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await
    }

    pub async fn list(&self, filter: Filter, sort: Sort) -> sqlx::Result<Vec<Task>> {
        let q = select_tasks(filter, sort);
        query_as::<_, Task>(&q).fetch_all(&self.pool).await
    }

    pub async fn get(&self, id: TaskId) -> sqlx::Result<Option<Task>> {
        let q = "SELECT id, task, is_done, priority, created_at, updated_at FROM todos WHERE id = ?";
        query_as::<_, Task>(q)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn count(&self) -> sqlx::Result<i64> {
        let (count,): (i64,) = query_as("SELECT COUNT(*) FROM todos")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Applies the change to one row, `false` when no row has that id
    pub async fn update(&self, id: TaskId, change: &Change, now: NaiveDateTime) -> sqlx::Result<bool> {
        let q = match change {
            Change::Done(done) => sql("UPDATE todos SET is_done = ?, updated_at = ? WHERE id = ?")
                .bind(*done),
            Change::Text(text) => sql("UPDATE todos SET task = ?, updated_at = ? WHERE id = ?")
                .bind(text.as_str()),
            Change::Priority(priority) => {
                sql("UPDATE todos SET priority = ?, updated_at = ? WHERE id = ?").bind(*priority)
            }
        };
        let result = q.bind(now).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Removes one row, `false` when no row has that id
    pub async fn delete(&self, id: TaskId) -> sqlx::Result<bool> {
        let result = sql("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Waits for in-flight statements and closes every connection
    pub async fn close(&self) {
        self.pool.close().await
    }
}
