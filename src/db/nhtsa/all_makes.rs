use std::time::Duration;

use log::{error, info};
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::{Error, Result};

pub const NHTSA_API_URL: &str = "https://vpic.nhtsa.dot.gov/api/vehicles/getallmakes";

/// Seconds
pub const TIMEOUT: u64 = 10;

#[derive(Debug, Deserialize)]
struct AllMakesResponse {
    #[serde(rename = "Results", default)]
    results: Vec<MakeResult>,
}

#[derive(Debug, Deserialize)]
struct MakeResult {
    #[serde(rename = "Make_Name")]
    make_name: String,
}

pub fn nhtsa_client() -> Result<Client> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(TIMEOUT))
        .build()?)
}

/// Get the names of all the makes known to the vPIC database.  Any failure
/// (network, status, malformed JSON) ends the run.
pub fn fetch_car_makes(client: &Client, url: &str) -> Result<Vec<String>> {
    info!("Fetching car makes from {}", url);
    let response = client
        .get(url)
        .query(&[("format", "json")])
        .send()
        .map_err(|e| {
            if e.is_timeout() {
                error!("Request timed out after {} seconds", TIMEOUT);
            } else {
                error!("Failed to connect to the API: {}", e);
            }
            e
        })?;
    let response = response.error_for_status().map_err(|e| {
        error!("HTTP error occurred: {:?}", e.status());
        e
    })?;
    let body = response.text()?;
    let data: AllMakesResponse = serde_json::from_str(&body).map_err(|e| {
        error!("Failed to parse JSON response: {}", e);
        Error::from(e)
    })?;
    let makes: Vec<String> = data.results.into_iter().map(|r| r.make_name).collect();
    info!("Successfully fetched {} car makes", makes.len());
    Ok(makes)
}
