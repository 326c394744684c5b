use crate::logos::Extension;

/// Logo sources, most preferred first.  `{make_name}` is replaced by the
/// lower-cased, percent-encoded token.
pub const LOGO_SOURCES: [&str; 4] = [
    "https://raw.githubusercontent.com/filippofilip95/car-logos-dataset/master/logos/thumb/{make_name}.png",
    "https://raw.githubusercontent.com/filippofilip95/car-logos-dataset/master/logos/thumb/{make_name}.jpg",
    "https://www.carlogos.org/logo/{make_name}.png",
    "https://www.carlogos.org/logo/{make_name}.jpg",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoSource {
    pub template: String,
}

impl LogoSource {
    pub fn new(template: impl Into<String>) -> LogoSource {
        LogoSource {
            template: template.into(),
        }
    }

    pub fn url(&self, token: &str) -> String {
        self.template
            .replace("{make_name}", &urlencoding::encode(&token.to_lowercase()))
    }
}

pub fn default_sources() -> Vec<LogoSource> {
    LOGO_SOURCES.iter().map(|t| LogoSource::new(*t)).collect()
}

/// Pick the file extension, trusting the content type over the URL.
/// Anything unrecognized is saved as png.
pub fn resolve_extension(content_type: Option<&str>, url: &str) -> Extension {
    let content_type = content_type.unwrap_or_default().to_lowercase();
    if content_type.contains("png") {
        return Extension::Png;
    }
    if content_type.contains("jpg") || content_type.contains("jpeg") {
        return Extension::Jpg;
    }
    let url = url.to_lowercase();
    if url.ends_with(".jpg") || url.ends_with(".jpeg") {
        Extension::Jpg
    } else {
        Extension::Png
    }
}
