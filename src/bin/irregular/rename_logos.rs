use std::{error::Error, io::ErrorKind, path::PathBuf};

use carmakes::utils::rename::{prefix_png_files, DEFAULT_PREFIX};
use clap::Parser;
use log::{error, info};

/// Prefix every .png in the photos folder.  Running it twice prefixes twice.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "./photos")]
    dir: PathBuf,

    #[arg(short, long, default_value = DEFAULT_PREFIX)]
    prefix: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    match prefix_png_files(&args.dir, &args.prefix) {
        Ok(renamed) => info!("Renamed {} files", renamed.len()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            error!("Directory {} not found", args.dir.display())
        }
        Err(e) => error!("Error processing files in directory: {}", e),
    }
    info!("done");
    Ok(())
}
