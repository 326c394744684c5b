use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use jiff::Zoned;
use log::{info, warn};

use crate::db::car_type_master::MakeStore;
use crate::error::Result;
use crate::logos::Logo;

/// Path the database should hold for a logo, e.g. `\\server\photos\Toyota.png`.
pub fn logo_path(server_path: &str, filename: &str) -> String {
    format!("{}\\{}", server_path, filename)
}

fn escape_sql(value: &str) -> String {
    value.replace('\'', "''")
}

/// Text of the review script.  Rows are matched on a substring of the
/// current make name, so a logo whose id is no longer in `make_names` is
/// left out rather than matching every row.
pub fn render_sql_script(
    logos: &BTreeMap<i64, Logo>,
    make_names: &BTreeMap<i64, String>,
    server_path: &str,
    generated_on: &str,
) -> String {
    let mut lines = vec![
        "-- Auto-generated SQL script to update car logo paths".to_string(),
        format!("-- Generated on {}", generated_on),
        String::new(),
        "USE AdventureWorks2017;".to_string(),
        "GO".to_string(),
        String::new(),
        "-- Update logo paths for downloaded car makes".to_string(),
        String::new(),
    ];
    for (car_type_id, logo) in logos {
        let Some(make_name) = make_names.get(car_type_id) else {
            warn!("CarTypeID {} is no longer in the database, skipping", car_type_id);
            continue;
        };
        lines.push(format!(
            "UPDATE dbo.CarTypeMaster SET LogoPath = '{}', ModifiedDate = GETUTCDATE() WHERE CarMake LIKE '%{}%';",
            escape_sql(&logo_path(server_path, &logo.filename)),
            escape_sql(make_name)
        ));
    }
    lines.extend(
        [
            "",
            "-- Summary of updated records",
            "SELECT",
            "    COUNT(*) as TotalMakes,",
            "    SUM(CASE WHEN LogoPath IS NOT NULL THEN 1 ELSE 0 END) as MakesWithLogo,",
            "    SUM(CASE WHEN LogoPath IS NULL THEN 1 ELSE 0 END) as MakesWithoutLogo",
            "FROM dbo.CarTypeMaster;",
            "",
            "-- List all makes with logos",
            "SELECT CarTypeID, CarMake, LogoPath FROM dbo.CarTypeMaster WHERE LogoPath IS NOT NULL ORDER BY CarMake;",
        ]
        .map(String::from),
    );
    lines.join("\n")
}

/// Write the UPDATE statements for the downloaded logos to `output_file`,
/// using the make names currently in the store.  Returns the absolute path
/// of the script, or `None` if there was nothing to write.
pub fn generate_sql_script(
    store: &impl MakeStore,
    logos: &BTreeMap<i64, Logo>,
    server_path: &str,
    output_file: &Path,
) -> Result<Option<PathBuf>> {
    if logos.is_empty() {
        warn!("No logos to generate SQL script for");
        return Ok(None);
    }
    let make_names = store.all_makes()?;
    let generated_on = Zoned::now().strftime("%Y-%m-%d %H:%M:%S %Z").to_string();
    let script = render_sql_script(logos, &make_names, server_path, &generated_on);
    fs::write(output_file, script)?;
    let path = fs::canonicalize(output_file)?;
    info!("Generated SQL script: {}", path.display());
    Ok(Some(path))
}

/// Point `LogoPath` of each downloaded make at its file, matching rows by
/// CarTypeID.  Returns the number of rows updated.
pub fn update_database(
    store: &impl MakeStore,
    logos: &BTreeMap<i64, Logo>,
    server_path: &str,
) -> Result<usize> {
    if logos.is_empty() {
        warn!("No logos to update in database");
        return Ok(0);
    }
    let paths: Vec<(i64, String)> = logos
        .iter()
        .map(|(id, logo)| (*id, logo_path(server_path, &logo.filename)))
        .collect();
    let updated = store.set_logo_paths(&paths)?;
    info!("Updated {} records in database", updated);
    Ok(updated)
}
