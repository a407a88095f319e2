use crate::config::AppPaths;
use crate::domain::{Entry, EntryKind, Goal};
use crate::error::EngineError;
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use std::fs;
use std::path::PathBuf;

pub struct Db {
    conn: Connection,
}

impl Db {
    pub fn open(paths: &AppPaths) -> Result<(Self, PathBuf)> {
        fs::create_dir_all(&paths.data_dir)
            .with_context(|| format!("Failed to create data dir {}", paths.data_dir.display()))?;

        let db_path = paths.data_dir.join("finsight.sqlite3");
        let conn = Connection::open(&db_path)
            .with_context(|| format!("Failed to open DB {}", db_path.display()))?;

        let db = Self { conn };
        db.migrate()?;
        Ok((db, db_path))
    }

    fn migrate(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                kind TEXT NOT NULL,
                category TEXT NOT NULL,
                amount TEXT NOT NULL,
                occurred_on TEXT NOT NULL,
                description TEXT,
                created_at TEXT NOT NULL,
                FOREIGN KEY(user_id) REFERENCES users(id)
            );

            CREATE INDEX IF NOT EXISTS idx_entries_user ON entries(user_id);
            CREATE INDEX IF NOT EXISTS idx_entries_user_date ON entries(user_id, occurred_on);

            CREATE TABLE IF NOT EXISTS goals (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                category TEXT NOT NULL,
                monthly_limit TEXT NOT NULL,
                FOREIGN KEY(user_id) REFERENCES users(id)
            );

            CREATE UNIQUE INDEX IF NOT EXISTS idx_goals_user_category ON goals(user_id, category);
            "#,
        )?;
        Ok(())
    }

    /// Inserts a new user row. A username collision surfaces as
    /// `EngineError::UsernameTaken` so registration can report it without
    /// leaking store details.
    pub fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        created_at: DateTime<Utc>,
    ) -> Result<i64> {
        let inserted = self.conn.execute(
            "INSERT INTO users (username, password_hash, created_at) VALUES (?1, ?2, ?3)",
            params![username, password_hash, created_at.to_rfc3339()],
        );

        match inserted {
            Ok(_) => Ok(self.conn.last_insert_rowid()),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(EngineError::UsernameTaken.into())
            }
            Err(e) => Err(EngineError::Store(e).into()),
        }
    }

    pub fn find_user(&self, username: &str) -> Result<Option<(i64, String)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, password_hash FROM users WHERE username = ?1")?;

        let mut rows = stmt.query(params![username])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };
        Ok(Some((row.get(0)?, row.get(1)?)))
    }

    pub fn insert_entry(
        &self,
        user_id: i64,
        kind: EntryKind,
        category: &str,
        amount: Decimal,
        occurred_on: NaiveDate,
        description: Option<&str>,
        created_at: DateTime<Utc>,
    ) -> Result<i64> {
        self.conn.execute(
            r#"
            INSERT INTO entries (user_id, kind, category, amount, occurred_on, description, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                user_id,
                kind.as_str(),
                category,
                amount.to_string(),
                occurred_on.format("%Y-%m-%d").to_string(),
                description,
                created_at.to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Entries in canonical display order: `occurred_on` desc, id desc.
    pub fn list_entries(&self, user_id: i64) -> Result<Vec<Entry>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, user_id, kind, category, amount, occurred_on, description, created_at
            FROM entries
            WHERE user_id = ?1
            ORDER BY occurred_on DESC, id DESC
            "#,
        )?;

        let rows = stmt.query_map(params![user_id], |row| {
            let id: i64 = row.get(0)?;
            let user_id: i64 = row.get(1)?;
            let kind: String = row.get(2)?;
            let category: String = row.get(3)?;
            let amount: String = row.get(4)?;
            let occurred_on: String = row.get(5)?;
            let description: Option<String> = row.get(6)?;
            let created_at: String = row.get(7)?;
            Ok((
                id,
                user_id,
                kind,
                category,
                amount,
                occurred_on,
                description,
                created_at,
            ))
        })?;

        let mut out = Vec::new();
        for row in rows {
            let (id, user_id, kind, category, amount, occurred_on, description, created_at) = row?;
            let kind = EntryKind::parse(&kind)
                .with_context(|| format!("Invalid entry kind in DB: {kind}"))?;
            let amount = amount
                .parse::<Decimal>()
                .context("Invalid decimal amount in entries table")?;
            let occurred_on = NaiveDate::parse_from_str(&occurred_on, "%Y-%m-%d")
                .context("Invalid occurred_on in entries table")?;
            let created_at = DateTime::parse_from_rfc3339(&created_at)
                .context("Invalid created_at in entries table")?
                .with_timezone(&Utc);

            out.push(Entry {
                id,
                user_id,
                kind,
                category,
                amount,
                occurred_on,
                description,
                created_at,
            });
        }

        Ok(out)
    }

    /// Hard delete, scoped to the owning user. Returns false when no row
    /// matched so the caller can report not-found.
    pub fn delete_entry(&self, user_id: i64, id: i64) -> Result<bool> {
        let changed = self.conn.execute(
            "DELETE FROM entries WHERE user_id = ?1 AND id = ?2",
            params![user_id, id],
        )?;
        Ok(changed > 0)
    }

    /// Find-or-create by `(user_id, category)`. The unique index plus the
    /// conflict clause make concurrent upserts converge on one row.
    pub fn upsert_goal(&self, user_id: i64, category: &str, monthly_limit: Decimal) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO goals (user_id, category, monthly_limit)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(user_id, category) DO UPDATE SET monthly_limit = excluded.monthly_limit
            "#,
            params![user_id, category, monthly_limit.to_string()],
        )?;
        Ok(())
    }

    pub fn list_goals(&self, user_id: i64) -> Result<Vec<Goal>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT user_id, category, monthly_limit
            FROM goals
            WHERE user_id = ?1
            ORDER BY category ASC
            "#,
        )?;

        let rows = stmt.query_map(params![user_id], |row| {
            let user_id: i64 = row.get(0)?;
            let category: String = row.get(1)?;
            let monthly_limit: String = row.get(2)?;
            Ok((user_id, category, monthly_limit))
        })?;

        let mut out = Vec::new();
        for row in rows {
            let (user_id, category, monthly_limit) = row?;
            let monthly_limit = monthly_limit
                .parse::<Decimal>()
                .context("Invalid decimal limit in goals table")?;
            out.push(Goal {
                user_id,
                category,
                monthly_limit,
            });
        }

        Ok(out)
    }
}
