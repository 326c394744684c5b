use std::{error::Error, path::Path, time::Duration};

use carmakes::{
    config::LogoSettings,
    db::prod_db::ProdDb,
    logos::{
        downloader::{DownloadReport, LogoDownloader},
        fetch::HttpFetcher,
        persist::{generate_sql_script, logo_path, update_database},
    },
};
use clap::Parser;
use log::{error, info, warn};
use tabled::{builder::Builder, settings::Style};

#[derive(Parser, Debug)]
#[command(version, about = "Download car make logos and record their paths", long_about = None)]
struct Args {
    /// Environment name, e.g., test, prod
    #[arg(short, long, default_value = "prod")]
    env: String,

    /// Don't write the SQL script
    #[arg(long)]
    skip_script: bool,

    /// Don't update the database directly
    #[arg(long)]
    skip_update: bool,
}

/// Seconds, per request
const LOGO_TIMEOUT: u64 = 10;

/// Make an ASCII table from the downloaded logos
fn ascii_table(report: &DownloadReport, server_path: &str) -> tabled::Table {
    let mut builder = Builder::new();
    builder.push_record(vec!["CarTypeID", "File", "Logo Path"]);
    for (car_type_id, logo) in &report.downloaded {
        builder.push_record(vec![
            car_type_id.to_string(),
            logo.filename.clone(),
            logo_path(server_path, &logo.filename),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::sharp());
    table
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let settings = LogoSettings::from_env();
    let archive = ProdDb::car_type_master()?;

    let fetcher = HttpFetcher::new(Duration::from_secs(LOGO_TIMEOUT))?;
    let downloader = LogoDownloader::new(fetcher, &settings.photos_folder)?;
    let report = downloader.download_all_logos(&archive)?;

    if !args.skip_script {
        if let Some(path) = generate_sql_script(
            &archive,
            &report.downloaded,
            &settings.server_path,
            &settings.sql_script,
        )? {
            info!("SQL script generated at: {}", path.display());
            info!("You can run this script in SQL Server Management Studio");
        }
    }

    if !args.skip_update {
        update_database(&archive, &report.downloaded, &settings.server_path)?;
    }

    if !report.downloaded.is_empty() {
        println!("{}", ascii_table(&report, &settings.server_path));
    }
    info!("Logo download, SQL generation, and database update completed successfully");
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
