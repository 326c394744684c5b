use std::time::Duration;

use reqwest::{
    blocking::Client,
    header::{CONTENT_TYPE, USER_AGENT},
    StatusCode,
};
use thiserror::Error;

/// Some logo hosts refuse clients that don't look like a browser.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedResponse {
    pub status: u16,
    /// Lower-cased `content-type` header, if any
    pub content_type: Option<String>,
    /// Empty unless the status is 200
    pub body: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("timeout downloading from {0}")]
    Timeout(String),
    #[error("error downloading from {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Transport for the logo sources.
pub trait Fetch {
    fn get(&self, url: &str) -> Result<FetchedResponse, FetchError>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<HttpFetcher, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(HttpFetcher { client })
    }
}

fn classify(url: &str, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout(url.to_string())
    } else {
        FetchError::Transport {
            url: url.to_string(),
            source: e,
        }
    }
}

impl Fetch for HttpFetcher {
    fn get(&self, url: &str) -> Result<FetchedResponse, FetchError> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .map_err(|e| classify(url, e))?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_lowercase());
        let body = if status == StatusCode::OK {
            response.bytes().map_err(|e| classify(url, e))?.to_vec()
        } else {
            Vec::new()
        };
        Ok(FetchedResponse {
            status: status.as_u16(),
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{error::Error, time::Duration};

    use httpmock::prelude::*;

    use super::*;

    #[test]
    fn sends_browser_user_agent() -> Result<(), Box<dyn Error>> {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/logo/toyota.png")
                .header("user-agent", BROWSER_USER_AGENT);
            then.status(200)
                .header("content-type", "Image/PNG")
                .body(b"not really a png");
        });
        let fetcher = HttpFetcher::new(Duration::from_secs(10))?;
        let response = fetcher.get(&server.url("/logo/toyota.png"))?;
        mock.assert();
        assert_eq!(response.status, 200);
        assert_eq!(response.content_type.as_deref(), Some("image/png"));
        assert_eq!(response.body, b"not really a png".to_vec());
        Ok(())
    }

    #[test]
    fn non_200_has_no_body() -> Result<(), Box<dyn Error>> {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/logo/nope.png");
            then.status(404).body("Not Found");
        });
        let fetcher = HttpFetcher::new(Duration::from_secs(10))?;
        let response = fetcher.get(&server.url("/logo/nope.png"))?;
        assert_eq!(response.status, 404);
        assert!(response.body.is_empty());
        Ok(())
    }

    #[test]
    fn unreachable_host_is_transport_error() -> Result<(), Box<dyn Error>> {
        let fetcher = HttpFetcher::new(Duration::from_secs(2))?;
        let res = fetcher.get("http://127.0.0.1:1/logo.png");
        assert!(matches!(res, Err(FetchError::Transport { .. })));
        Ok(())
    }
}
