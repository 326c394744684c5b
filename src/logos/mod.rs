pub mod downloader;
pub mod fetch;
pub mod persist;
pub mod sanitize;
pub mod source;

#[cfg(test)]
pub(crate) mod testing;

use std::fmt::Display;

use crate::logos::sanitize::sanitize_make_name;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extension {
    Png,
    Jpg,
}

impl Display for Extension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Extension::Png => write!(f, "png"),
            Extension::Jpg => write!(f, "jpg"),
        }
    }
}

/// A logo saved to the photos folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logo {
    pub filename: String,
    pub extension: Extension,
}

impl Logo {
    pub fn for_make(make_name: &str, extension: Extension) -> Logo {
        Logo {
            filename: format!("{}.{}", sanitize_make_name(make_name), extension),
            extension,
        }
    }
}
