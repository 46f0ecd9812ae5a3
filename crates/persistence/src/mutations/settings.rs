// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use rinkside::PersistedSettings;
use serde_json::Value;
use tracing::debug;

use crate::diesel_schema::settings;
use crate::error::PersistenceError;

/// Overwrites the settings record.
///
/// Every field is written as its own row inside one transaction, so a
/// reader never sees a half-written record.
///
/// # Errors
///
/// Returns an error if serialization or any write fails.
pub fn save_settings(
    conn: &mut SqliteConnection,
    record: &PersistedSettings,
) -> Result<(), PersistenceError> {
    let Value::Object(fields) = serde_json::to_value(record)? else {
        return Err(PersistenceError::Serialization(String::from(
            "settings did not serialize to an object",
        )));
    };

    let rows: Vec<(String, String)> = fields
        .into_iter()
        .map(|(key, value)| Ok((key, serde_json::to_string(&value)?)))
        .collect::<Result<_, PersistenceError>>()?;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        for (key, value) in &rows {
            diesel::replace_into(settings::table)
                .values((settings::key.eq(key), settings::value.eq(value)))
                .execute(conn)?;
        }
        Ok(())
    })?;

    debug!(
        require_code = record.require_code,
        spots_remaining = record.spots_remaining,
        "Saved settings"
    );
    Ok(())
}
