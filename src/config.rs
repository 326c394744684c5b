use std::{env, path::PathBuf};

pub const DEFAULT_PHOTOS_DIR: &str = "photos";
pub const DEFAULT_SERVER_PATH: &str = r"\\server\photos";
pub const DEFAULT_SQL_SCRIPT: &str = "update_logo_paths.sql";

/// Where logos land locally, how the database should refer to them, and
/// where the review script goes.
#[derive(Debug, Clone, PartialEq)]
pub struct LogoSettings {
    pub photos_folder: PathBuf,
    /// Network path to the photos folder, e.g. `\\server\photos`
    pub server_path: String,
    pub sql_script: PathBuf,
}

impl Default for LogoSettings {
    fn default() -> Self {
        LogoSettings {
            photos_folder: PathBuf::from(DEFAULT_PHOTOS_DIR),
            server_path: DEFAULT_SERVER_PATH.to_string(),
            sql_script: PathBuf::from(DEFAULT_SQL_SCRIPT),
        }
    }
}

impl LogoSettings {
    /// Read `CARDB_PHOTOS_DIR`, `CARDB_SERVER_PATH` and `CARDB_SQL_SCRIPT`,
    /// falling back to the defaults for the ones not set.
    pub fn from_env() -> Self {
        let defaults = LogoSettings::default();
        LogoSettings {
            photos_folder: env::var("CARDB_PHOTOS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.photos_folder),
            server_path: env::var("CARDB_SERVER_PATH").unwrap_or(defaults.server_path),
            sql_script: env::var("CARDB_SQL_SCRIPT")
                .map(PathBuf::from)
                .unwrap_or(defaults.sql_script),
        }
    }
}
