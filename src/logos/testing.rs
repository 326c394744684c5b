//! Fakes for the store and the transport.

use std::{
    cell::RefCell,
    collections::{BTreeMap, BTreeSet, HashMap},
    io::Cursor,
};

use image::{DynamicImage, ImageFormat};

use crate::db::car_type_master::{InsertSummary, MakeStore};
use crate::error::{Error, Result};
use crate::logos::fetch::{Fetch, FetchError, FetchedResponse};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MakeRow {
    pub name: String,
    pub logo_path: Option<String>,
    pub modified: bool,
}

/// In-memory `CarTypeMaster`.  `filtered` is what the store-side filter
/// returns, so tests can make it admit anything they like.
#[derive(Default)]
pub struct MemoryStore {
    pub rows: RefCell<BTreeMap<i64, MakeRow>>,
    pub filtered: Option<BTreeMap<i64, String>>,
    /// Ids whose update is rejected
    pub poisoned: BTreeSet<i64>,
    pub unreachable: bool,
}

impl MemoryStore {
    pub fn with_makes(makes: &[(i64, &str)]) -> MemoryStore {
        let rows = makes
            .iter()
            .map(|(id, name)| {
                (
                    *id,
                    MakeRow {
                        name: name.to_string(),
                        logo_path: None,
                        modified: false,
                    },
                )
            })
            .collect();
        MemoryStore {
            rows: RefCell::new(rows),
            ..Default::default()
        }
    }

    fn check(&self) -> Result<()> {
        if self.unreachable {
            return Err(Error::Store("store is unreachable".to_string()));
        }
        Ok(())
    }
}

impl MakeStore for MemoryStore {
    fn filtered_makes(&self) -> Result<BTreeMap<i64, String>> {
        self.check()?;
        match &self.filtered {
            Some(filtered) => Ok(filtered.clone()),
            None => self.all_makes(),
        }
    }

    fn all_makes(&self) -> Result<BTreeMap<i64, String>> {
        self.check()?;
        Ok(self
            .rows
            .borrow()
            .iter()
            .map(|(id, row)| (*id, row.name.clone()))
            .collect())
    }

    fn insert_makes(&self, makes: &[String]) -> Result<InsertSummary> {
        self.check()?;
        let mut rows = self.rows.borrow_mut();
        let mut summary = InsertSummary::default();
        for make in makes {
            if rows.values().any(|r| &r.name == make) {
                summary.skipped += 1;
                continue;
            }
            let id = rows.keys().next_back().map_or(1, |id| id + 1);
            rows.insert(
                id,
                MakeRow {
                    name: make.clone(),
                    logo_path: None,
                    modified: false,
                },
            );
            summary.inserted += 1;
        }
        Ok(summary)
    }

    fn set_logo_paths(&self, paths: &[(i64, String)]) -> Result<usize> {
        self.check()?;
        let mut staged = self.rows.borrow().clone();
        let mut updated = 0;
        for (id, path) in paths {
            if self.poisoned.contains(id) {
                continue;
            }
            if let Some(row) = staged.get_mut(id) {
                row.logo_path = Some(path.clone());
                row.modified = true;
                updated += 1;
            }
        }
        *self.rows.borrow_mut() = staged;
        Ok(updated)
    }
}

/// Serves canned responses by URL and remembers what was asked.  Unknown
/// URLs get a 404.
#[derive(Default)]
pub struct ScriptedFetcher {
    pub responses: HashMap<String, std::result::Result<FetchedResponse, String>>,
    pub requested: RefCell<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn respond(mut self, url: &str, status: u16, content_type: &str, body: Vec<u8>) -> Self {
        self.responses.insert(
            url.to_string(),
            Ok(FetchedResponse {
                status,
                content_type: Some(content_type.to_string()),
                body,
            }),
        );
        self
    }

    pub fn time_out(mut self, url: &str) -> Self {
        self.responses.insert(url.to_string(), Err(url.to_string()));
        self
    }
}

impl Fetch for ScriptedFetcher {
    fn get(&self, url: &str) -> std::result::Result<FetchedResponse, FetchError> {
        self.requested.borrow_mut().push(url.to_string());
        match self.responses.get(url) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(url)) => Err(FetchError::Timeout(url.clone())),
            None => Ok(FetchedResponse {
                status: 404,
                content_type: Some("text/html".to_string()),
                body: Vec::new(),
            }),
        }
    }
}

pub fn png_bytes() -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::new_rgba8(4, 4)
        .write_to(&mut buf, ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

pub fn jpg_bytes() -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::new_rgb8(4, 4)
        .write_to(&mut buf, ImageFormat::Jpeg)
        .unwrap();
    buf.into_inner()
}
