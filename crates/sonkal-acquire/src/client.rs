use anyhow::Result;
use reqwest::StatusCode;

const BASE_URL: &str = "https://sonkal.cz";

/// How a page fetch can fail.
///
/// Callers currently treat both kinds the same (skip the page, log), but
/// the distinction is kept so they can diverge without reworking the fetch.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {0}")]
    Status(StatusCode),
}

/// Build the shared HTTP client used for every fetch in a run.
pub fn build_client() -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent("sonkal/0.1 (club roster tool)")
        .build()?;
    Ok(client)
}

/// URL of the profile page ("osobni karta") for a numeric competitor id.
pub fn profile_url(id: u32) -> String {
    format!("{BASE_URL}/osobni_karta/{id}")
}

/// Fetch one page, yielding the HTML body on a 2xx response.
pub async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<String, FetchError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }

    Ok(response.text().await?)
}
