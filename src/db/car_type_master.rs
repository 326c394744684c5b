use std::collections::BTreeMap;

use duckdb::{params, AccessMode, Config, Connection};
use itertools::Itertools;
use log::{debug, error, info};

use crate::error::Result;

/// Substrings that disqualify a make from the logo lookup, matched
/// case-insensitively anywhere in the name.
pub const EXCLUDED_PATTERNS: [&str; 13] = [
    "American",
    "Company",
    "/",
    "&",
    " INC",
    "Co.",
    "Trailer",
    " HOME",
    "Performance",
    "WELDING",
    "AAA",
    "SUPPLY",
    "BULK",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertSummary {
    pub inserted: usize,
    pub skipped: usize,
}

/// What the maintenance jobs need from the backing store.  Every call is a
/// self-contained unit of work.
pub trait MakeStore {
    /// (CarTypeID, CarMake) pairs that survive the exclusion list.
    fn filtered_makes(&self) -> Result<BTreeMap<i64, String>>;

    /// All (CarTypeID, CarMake) pairs, unfiltered.
    fn all_makes(&self) -> Result<BTreeMap<i64, String>>;

    /// Insert the names in one transaction, skipping the ones already present.
    fn insert_makes(&self, makes: &[String]) -> Result<InsertSummary>;

    /// Set `LogoPath` and `ModifiedDate` for each id.  A failing row is
    /// logged and skipped, the rest are committed together.  Returns the
    /// number of rows updated.
    fn set_logo_paths(&self, paths: &[(i64, String)]) -> Result<usize>;
}

#[derive(Clone)]
pub struct CarTypeMasterArchive {
    pub duckdb_path: String,
}

impl CarTypeMasterArchive {
    fn connect(&self, access_mode: AccessMode) -> Result<Connection> {
        let config = Config::default().access_mode(access_mode)?;
        Ok(Connection::open_with_flags(&self.duckdb_path, config)?)
    }

    pub fn ensure_table(&self) -> Result<()> {
        let conn = self.connect(AccessMode::ReadWrite)?;
        conn.execute_batch(
            r"
CREATE SEQUENCE IF NOT EXISTS seq_car_type_id START 1;
CREATE TABLE IF NOT EXISTS CarTypeMaster (
    CarTypeID BIGINT PRIMARY KEY DEFAULT nextval('seq_car_type_id'),
    CarMake VARCHAR NOT NULL UNIQUE,
    LogoPath VARCHAR,
    ModifiedDate TIMESTAMPTZ,
);",
        )?;
        Ok(())
    }

    fn query_makes(&self, query: &str) -> Result<BTreeMap<i64, String>> {
        let conn = self.connect(AccessMode::ReadOnly)?;
        let mut stmt = conn.prepare(query)?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?;
        let mut makes = BTreeMap::new();
        for row in rows {
            let (id, name) = row?;
            makes.insert(id, name);
        }
        Ok(makes)
    }
}

/// The SELECT behind [`MakeStore::filtered_makes`], with the exclusion list
/// embedded as literal patterns.
pub fn filtered_makes_query() -> String {
    let patterns = EXCLUDED_PATTERNS
        .iter()
        .map(|p| format!("    AND CarMake NOT ILIKE '%{}%'", p.replace('\'', "''")))
        .join("\n");
    format!(
        r"
SELECT CarTypeID, CarMake
FROM CarTypeMaster
WHERE NOT regexp_matches(CarMake, '[0-9]')
{}
ORDER BY CarTypeID;",
        patterns
    )
}

impl MakeStore for CarTypeMasterArchive {
    fn filtered_makes(&self) -> Result<BTreeMap<i64, String>> {
        self.query_makes(&filtered_makes_query())
    }

    fn all_makes(&self) -> Result<BTreeMap<i64, String>> {
        self.query_makes("SELECT CarTypeID, CarMake FROM CarTypeMaster ORDER BY CarTypeID;")
    }

    fn insert_makes(&self, makes: &[String]) -> Result<InsertSummary> {
        let mut conn = self.connect(AccessMode::ReadWrite)?;
        info!("Inserting {} car makes into {}", makes.len(), self.duckdb_path);
        let tx = conn.transaction()?;
        let mut summary = InsertSummary::default();
        {
            let mut stmt = tx
                .prepare("INSERT INTO CarTypeMaster (CarMake) VALUES (?) ON CONFLICT DO NOTHING;")?;
            for make in makes {
                match stmt.execute(params![make])? {
                    0 => {
                        debug!("Skipped duplicate: {}", make);
                        summary.skipped += 1;
                    }
                    n => summary.inserted += n,
                }
            }
        }
        tx.commit()?;
        Ok(summary)
    }

    fn set_logo_paths(&self, paths: &[(i64, String)]) -> Result<usize> {
        let mut conn = self.connect(AccessMode::ReadWrite)?;
        let mut pending: Vec<&(i64, String)> = paths.iter().collect();
        // DuckDB aborts the transaction on the first failed statement, so a
        // rejected row is dropped and the remaining rows replayed.
        loop {
            let tx = conn.transaction()?;
            let mut updated = 0;
            let mut rejected = None;
            {
                let mut stmt = tx.prepare(
                    "UPDATE CarTypeMaster SET LogoPath = ?, ModifiedDate = current_timestamp WHERE CarTypeID = ?;",
                )?;
                for (id, path) in &pending {
                    match stmt.execute(params![path, id]) {
                        Ok(0) => debug!("No row with CarTypeID {}", id),
                        Ok(n) => updated += n,
                        Err(e) => {
                            error!("Error updating CarTypeID {}: {}", id, e);
                            rejected = Some(*id);
                            break;
                        }
                    }
                }
            }
            match rejected {
                None => {
                    tx.commit()?;
                    return Ok(updated);
                }
                Some(bad_id) => {
                    tx.rollback()?;
                    pending.retain(|(id, _)| *id != bad_id);
                }
            }
        }
    }
}
