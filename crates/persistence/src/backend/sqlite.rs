// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Opening a `SQLite` database and bringing its schema up to date.

use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// How the database is backed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    /// A shared-cache in-memory database, gone when the last connection closes.
    Memory,
    /// A file on disk, opened in WAL mode.
    File,
}

/// Opens `url`, applies connection pragmas and runs pending migrations.
///
/// # Errors
///
/// Returns an error if the connection, a pragma, or a migration fails.
pub fn open(url: &str, storage: Storage) -> Result<SqliteConnection, PersistenceError> {
    info!(url, ?storage, "Opening SQLite database");
    let mut conn: SqliteConnection = SqliteConnection::establish(url)?;

    // Diesel has no DSL for PRAGMA
    pragma(&mut conn, "foreign_keys = ON")?;
    if storage == Storage::File {
        pragma(&mut conn, "journal_mode = WAL")?;
        pragma(&mut conn, "busy_timeout = 5000")?;
    }

    let applied: usize = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::Migration(e.to_string()))?
        .len();
    if applied > 0 {
        info!(applied, "Applied schema migrations");
    }

    Ok(conn)
}

fn pragma(conn: &mut SqliteConnection, setting: &str) -> Result<(), PersistenceError> {
    debug!(setting, "Setting pragma");
    diesel::sql_query(format!("PRAGMA {setting}")).execute(conn)?;
    Ok(())
}
