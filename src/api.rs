use gloo_net::http::{Request, Response};
use serde::Serialize;
use thiserror::Error;

use crate::comparison::GuessComparison;
use crate::config::GameConfig;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },
    #[error("could not parse response: {0}")]
    Parse(String),
}

impl ApiError {
    fn network<E: std::fmt::Display>(err: E) -> Self {
        Self::Network(err.to_string())
    }

    fn parse<E: std::fmt::Display>(err: E) -> Self {
        Self::Parse(err.to_string())
    }
}

#[derive(Serialize)]
struct GuessBody<'a> {
    guess: &'a str,
}

pub async fn fetch_teams(config: &GameConfig) -> Result<Vec<String>, ApiError> {
    let url = config.endpoint("teams");
    let response = Request::get(&url)
        .send()
        .await
        .map_err(ApiError::network)?;
    let text = checked_text(response, &url).await?;
    let teams: Vec<String> = serde_json::from_str(&text).map_err(ApiError::parse)?;
    Ok(teams)
}

pub async fn submit_guess(config: &GameConfig, guess: &str) -> Result<GuessComparison, ApiError> {
    let url = config.endpoint("guess");
    let response = Request::post(&url)
        .json(&GuessBody { guess })
        .map_err(ApiError::network)?
        .send()
        .await
        .map_err(ApiError::network)?;
    let text = checked_text(response, &url).await?;
    serde_json::from_str(&text).map_err(ApiError::parse)
}

/// Asks the server to pick a new target. Only the status is checked.
pub async fn reset_game(config: &GameConfig) -> Result<(), ApiError> {
    let url = config.endpoint("reset");
    let response = Request::post(&url)
        .send()
        .await
        .map_err(ApiError::network)?;
    if !response.ok() {
        return Err(ApiError::Status {
            status: response.status(),
            url,
        });
    }
    Ok(())
}

async fn checked_text(response: Response, url: &str) -> Result<String, ApiError> {
    if !response.ok() {
        return Err(ApiError::Status {
            status: response.status(),
            url: url.to_owned(),
        });
    }
    response.text().await.map_err(ApiError::network)
}
