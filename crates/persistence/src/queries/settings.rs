// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use rinkside::PersistedSettings;
use serde_json::{Map, Value};
use tracing::debug;

use crate::diesel_schema::settings;
use crate::error::PersistenceError;

/// Loads the settings record.
///
/// Each row holds one field of the record as a JSON value.
///
/// # Returns
///
/// `None` if no settings have been written yet.
///
/// # Errors
///
/// Returns an error if the query fails or a stored value does not
/// deserialize (including a missing key).
pub fn load_settings(
    conn: &mut SqliteConnection,
) -> Result<Option<PersistedSettings>, PersistenceError> {
    let rows: Vec<(String, String)> = settings::table
        .select((settings::key, settings::value))
        .load(conn)?;

    if rows.is_empty() {
        debug!("No stored settings");
        return Ok(None);
    }

    let mut fields: Map<String, Value> = Map::new();
    for (key, value) in rows {
        fields.insert(key, serde_json::from_str(&value)?);
    }

    let loaded: PersistedSettings = serde_json::from_value(Value::Object(fields))?;
    debug!(
        require_code = loaded.require_code,
        roster_released = loaded.roster_released,
        "Loaded settings"
    );
    Ok(Some(loaded))
}
