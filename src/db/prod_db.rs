use std::env;

use crate::db::car_type_master::CarTypeMasterArchive;
use crate::error::{Error, Result};

pub struct ProdDb {}

impl ProdDb {
    /// The `CarTypeMaster` store, at the path given by `CARDB_DUCKDB_PATH`.
    pub fn car_type_master() -> Result<CarTypeMasterArchive> {
        let duckdb_path = env::var("CARDB_DUCKDB_PATH")
            .map_err(|_| Error::MissingEnv("CARDB_DUCKDB_PATH".to_string()))?;
        Ok(CarTypeMasterArchive { duckdb_path })
    }
}
