pub mod car_type_master;
pub mod nhtsa;
pub mod prod_db;
