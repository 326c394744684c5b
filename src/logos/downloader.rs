use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use itertools::Itertools;
use log::{debug, info, warn};
use thiserror::Error;

use crate::db::car_type_master::MakeStore;
use crate::error;
use crate::logos::{
    fetch::{Fetch, FetchError},
    sanitize::sanitize_make_name,
    source::{default_sources, resolve_extension, LogoSource},
    Logo,
};

/// How many failed makes to list in the summary log.
const FAILED_MAKES_SHOWN: usize = 10;

/// Why a single source did not produce a logo.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP status {0}")]
    Status(u16),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("invalid image: {0}")]
    InvalidImage(#[from] image::ImageError),
    #[error(transparent)]
    Save(#[from] SaveError),
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("image failed validation before saving: {0}")]
    Invalid(#[source] image::ImageError),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Default)]
pub struct DownloadReport {
    /// CarTypeID -> logo, for every make with a logo on disk
    pub downloaded: BTreeMap<i64, Logo>,
    pub failed: Vec<String>,
}

/// Read the makes eligible for a logo lookup: the store's filtered set minus
/// the names that are empty or start with a digit.
pub fn get_car_makes(store: &impl MakeStore) -> error::Result<BTreeMap<i64, String>> {
    let all_makes = store.filtered_makes()?;
    let total = all_makes.len();
    let makes: BTreeMap<i64, String> = all_makes
        .into_iter()
        .filter(|(_, name)| name.chars().next().is_some_and(|c| !c.is_numeric()))
        .collect();
    info!(
        "Retrieved {} car makes from database (filtered from {})",
        makes.len(),
        total
    );
    if makes.len() < total {
        info!(
            "Excluded {} makes that start with numbers",
            total - makes.len()
        );
    }
    Ok(makes)
}

pub struct LogoDownloader<F: Fetch> {
    fetcher: F,
    photos_folder: PathBuf,
    sources: Vec<LogoSource>,
}

impl<F: Fetch> LogoDownloader<F> {
    /// Use the default sources.  Creates the photos folder if needed.
    pub fn new(fetcher: F, photos_folder: &Path) -> io::Result<Self> {
        Self::with_sources(fetcher, photos_folder, default_sources())
    }

    pub fn with_sources(
        fetcher: F,
        photos_folder: &Path,
        sources: Vec<LogoSource>,
    ) -> io::Result<Self> {
        fs::create_dir_all(photos_folder)?;
        info!("Photos folder set to: {}", photos_folder.display());
        Ok(LogoDownloader {
            fetcher,
            photos_folder: photos_folder.to_path_buf(),
            sources,
        })
    }

    pub fn photos_folder(&self) -> &Path {
        &self.photos_folder
    }

    /// Try the sources in order and keep the first logo that downloads,
    /// decodes and saves.  Later sources are not contacted.
    pub fn download_logo(&self, make_name: &str) -> Option<Logo> {
        let token = sanitize_make_name(make_name);
        let logo = self
            .sources
            .iter()
            .map(|source| source.url(&token))
            .find_map(|url| match self.try_source(make_name, &url) {
                Ok(logo) => {
                    info!(
                        "Successfully downloaded and saved logo for {} from {}",
                        make_name, url
                    );
                    Some(logo)
                }
                Err(SourceError::Save(e)) => {
                    warn!("Failed to save logo for {}: {}", make_name, e);
                    None
                }
                Err(e) => {
                    debug!("No logo from {}: {}", url, e);
                    None
                }
            });
        if logo.is_none() {
            warn!("Could not find logo for {}", make_name);
        }
        logo
    }

    fn try_source(&self, make_name: &str, url: &str) -> Result<Logo, SourceError> {
        debug!("Trying to download logo from: {}", url);
        let response = self.fetcher.get(url)?;
        if response.status != 200 {
            return Err(SourceError::Status(response.status));
        }
        image::load_from_memory(&response.body)?;
        let extension = resolve_extension(response.content_type.as_deref(), url);
        let logo = Logo::for_make(make_name, extension);
        self.save_logo(&logo, &response.body)?;
        Ok(logo)
    }

    /// Write the image to `<photos>/<filename>`, overwriting an existing file.
    /// The bytes are decoded once more before anything touches the disk.
    pub fn save_logo(&self, logo: &Logo, content: &[u8]) -> Result<PathBuf, SaveError> {
        image::load_from_memory(content).map_err(SaveError::Invalid)?;
        let path = self.photos_folder.join(&logo.filename);
        fs::write(&path, content).map_err(|source| SaveError::Write {
            path: path.clone(),
            source,
        })?;
        debug!("Saved logo to {}", path.display());
        Ok(path)
    }

    /// Sequentially download a logo for each make.  A make without a logo
    /// never stops the batch.
    pub fn download_all(&self, makes: &BTreeMap<i64, String>) -> DownloadReport {
        info!("Starting to download {} car logos", makes.len());
        let mut report = DownloadReport::default();
        for (car_type_id, make_name) in makes {
            match self.download_logo(make_name) {
                Some(logo) => {
                    report.downloaded.insert(*car_type_id, logo);
                }
                None => report.failed.push(make_name.clone()),
            }
        }
        info!(
            "Download complete: {} successful, {} failed",
            report.downloaded.len(),
            report.failed.len()
        );
        if !report.failed.is_empty() {
            info!(
                "Failed makes: {}",
                report.failed.iter().take(FAILED_MAKES_SHOWN).join(", ")
            );
        }
        report
    }

    /// Read the eligible makes from the store, then download their logos.
    pub fn download_all_logos(&self, store: &impl MakeStore) -> error::Result<DownloadReport> {
        let makes = get_car_makes(store)?;
        Ok(self.download_all(&makes))
    }
}
