use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow}, Row, SqlitePool};

use crate::domain::{
    error::RepoError,
    repository::TodoRepository,
    todo::{CreateTodo, Todo, TodoId, UpdateTodo},
};

#[derive(Clone)]
pub struct SqliteTodoRepository {
    pool: SqlitePool,
}

impl SqliteTodoRepository {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("invalid database url `{database_url}`"))?
            .create_if_missing(true);

        // An in-memory database lives only as long as its connection.
        let pool_options = if is_in_memory(database_url) {
            SqlitePoolOptions::new().max_connections(1).idle_timeout(None).max_lifetime(None)
        } else {
            ensure_parent_dir(database_url)?;
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("failed to open database `{database_url}`"))?;
        Ok(Self { pool })
    }

    pub async fn init(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS todos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                description TEXT NOT NULL,
                is_done BOOLEAN NOT NULL DEFAULT FALSE
            )",
        )
        .execute(&self.pool)
        .await
        .context("failed to create todos table")?;
        Ok(())
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn list(&self) -> Result<Vec<Todo>, RepoError> {
        let rows = sqlx::query("SELECT id, description, is_done FROM todos ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_todo).collect()
    }

    async fn get(&self, id: TodoId) -> Result<Todo, RepoError> {
        let row = sqlx::query("SELECT id, description, is_done FROM todos WHERE id = ?1")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => row_to_todo(&row),
            None => Err(RepoError::NotFound(id)),
        }
    }

    async fn create(&self, input: CreateTodo) -> Result<Todo, RepoError> {
        let result = sqlx::query("INSERT INTO todos (description, is_done) VALUES (?1, FALSE)")
            .bind(&input.description)
            .execute(&self.pool)
            .await?;
        let id = TodoId(result.last_insert_rowid());
        tracing::debug!(%id, "inserted todo");

        // Second statement: a concurrent delete can remove the row before this read.
        match self.get(id).await {
            Err(RepoError::NotFound(_)) => Err(RepoError::Storage(sqlx::Error::RowNotFound)),
            other => other,
        }
    }

    async fn delete(&self, id: TodoId) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?1")
            .bind(id.0)
            .execute(&self.pool)
            .await?;
        tracing::debug!(%id, rows = result.rows_affected(), "deleted todo");
        Ok(())
    }

    async fn update(&self, id: TodoId, input: UpdateTodo) -> Result<(), RepoError> {
        let result = sqlx::query("UPDATE todos SET description = ?1, is_done = ?2 WHERE id = ?3")
            .bind(&input.description)
            .bind(input.is_done)
            .bind(id.0)
            .execute(&self.pool)
            .await?;
        match result.rows_affected() {
            1 => Ok(()),
            0 => Err(RepoError::NotFound(id)),
            n => Err(RepoError::Storage(sqlx::Error::Protocol(format!("update of todo {id} touched {n} rows")))),
        }
    }
}

// SQLite decodes NULL TEXT as "", so nullability is checked explicitly.
fn row_to_todo(row: &SqliteRow) -> Result<Todo, RepoError> {
    Ok(Todo {
        id: TodoId(row.try_get("id")?),
        description: not_null("description", row.try_get("description")?)?,
        is_done: not_null("is_done", row.try_get("is_done")?)?,
    })
}

fn not_null<T>(column: &str, value: Option<T>) -> Result<T, RepoError> {
    value.ok_or_else(|| {
        RepoError::Storage(sqlx::Error::ColumnDecode {
            index: column.into(),
            source: Box::new(sqlx::error::UnexpectedNullError),
        })
    })
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

fn ensure_parent_dir(database_url: &str) -> Result<()> {
    let Some(path) = database_url.strip_prefix("sqlite://").or_else(|| database_url.strip_prefix("sqlite:")) else {
        return Ok(());
    };
    let path = path.split('?').next().unwrap_or(path);
    // Absolute Windows paths arrive as /C:/...
    let path = if cfg!(windows) && path.len() >= 3 && path.as_bytes()[0] == b'/' && path.as_bytes()[2] == b':' {
        &path[1..]
    } else {
        path
    };
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create database directory `{}`", parent.display()))?;
        }
    }
    Ok(())
}
