use std::{error::Error, path::Path};

use carmakes::db::{
    car_type_master::MakeStore,
    nhtsa::all_makes::{fetch_car_makes, nhtsa_client, NHTSA_API_URL},
    prod_db::ProdDb,
};
use clap::Parser;
use log::{error, info, warn};

#[derive(Parser, Debug)]
#[command(version, about = "Insert the NHTSA list of car makes into CarTypeMaster", long_about = None)]
struct Args {
    /// Environment name, e.g., test, prod
    #[arg(short, long, default_value = "prod")]
    env: String,

    /// Create the CarTypeMaster table if it doesn't exist
    #[arg(long)]
    create_table: bool,
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let archive = ProdDb::car_type_master()?;
    if args.create_table {
        archive.ensure_table()?;
    }
    let makes = fetch_car_makes(&nhtsa_client()?, NHTSA_API_URL)?;
    let summary = archive.insert_makes(&makes)?;
    info!(
        "Process completed: {} inserted, {} skipped",
        summary.inserted, summary.skipped
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let env_file = format!(".env/{}.env", args.env);
    if let Err(e) = dotenvy::from_path(Path::new(&env_file)) {
        warn!("Could not load {}: {}", env_file, e);
    }

    run(&args).inspect_err(|e| error!("Process failed: {}", e))
}
