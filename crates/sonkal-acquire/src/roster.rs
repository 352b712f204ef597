use std::sync::Arc;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use scraper::{Html, Selector};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use unicode_normalization::UnicodeNormalization;

use sonkal_model::{Competitor, CompetitorDirectory};

use crate::client::{self, FetchError};

/// Parameters for one roster crawl over a contiguous id range.
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// First profile id to probe (inclusive, >= 1).
    pub start_id: u32,
    /// Last profile id to probe (inclusive).
    pub end_id: u32,
    /// Upper bound on simultaneously in-flight probes.
    pub max_concurrency: usize,
    /// Fixed politeness pause each probe holds after its request.
    pub delay: Duration,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            start_id: 1,
            end_id: 750,
            max_concurrency: 10,
            delay: Duration::from_millis(100),
        }
    }
}

impl CrawlOptions {
    fn validate(&self) -> Result<()> {
        ensure!(self.start_id >= 1, "start id must be >= 1");
        ensure!(
            self.start_id <= self.end_id,
            "start id {} is past end id {}",
            self.start_id,
            self.end_id
        );
        ensure!(self.max_concurrency >= 1, "max concurrency must be >= 1");
        Ok(())
    }
}

/// Extract a competitor record from a profile page.
///
/// The display name is the text of the first `<h2>`, NFC-normalized so
/// Czech diacritics have one canonical byte form. A page without an `<h2>`
/// means no competitor exists at this id.
pub fn parse_competitor(html: &str, id: u32) -> Option<(String, Competitor)> {
    let document = Html::parse_document(html);
    let h2_sel = Selector::parse("h2").expect("valid selector");

    let heading = document.select(&h2_sel).next()?;
    let full_name: String = heading.text().collect::<String>().trim().nfc().collect();
    if full_name.is_empty() {
        return None;
    }

    let (first_name, last_name) = match full_name.split_once(' ') {
        Some((first, rest)) => (first.trim().to_string(), rest.trim().to_string()),
        None => (full_name.clone(), String::new()),
    };

    Some((
        full_name,
        Competitor {
            id,
            first_name,
            last_name,
        },
    ))
}

/// Probe every id in `[start_id, end_id]` and build the competitor
/// directory.
///
/// Dispatch is admission-controlled by a counting semaphore: a new probe is
/// spawned only once fewer than `max_concurrency` are live. Probes return
/// their result through the join set and a single collector loop inserts
/// into the directory in completion order, so no shared map or lock exists;
/// when two ids carry the same display name, the later-completing probe
/// wins. Per-id failures never abort the crawl.
pub async fn crawl(options: &CrawlOptions) -> Result<CompetitorDirectory> {
    options.validate()?;

    let client = client::build_client()?;
    run_probes(
        options.start_id..=options.end_id,
        options.max_concurrency,
        options.delay,
        move |id| {
            let client = client.clone();
            async move { probe(&client, id).await }
        },
    )
    .await
}

/// Dispatch one probe per id under the admission gate and collect results.
///
/// The owned permit is acquired BEFORE spawning, so the dispatch loop
/// itself stalls while `max_concurrency` probes are live; the permit is
/// released only after the probe's politeness pause.
async fn run_probes<F, Fut>(
    ids: std::ops::RangeInclusive<u32>,
    max_concurrency: usize,
    delay: Duration,
    probe_fn: F,
) -> Result<CompetitorDirectory>
where
    F: Fn(u32) -> Fut,
    Fut: std::future::Future<Output = Option<(String, Competitor)>> + Send + 'static,
{
    let gate = Arc::new(Semaphore::new(max_concurrency));
    let mut probes: JoinSet<Option<(String, Competitor)>> = JoinSet::new();

    for id in ids {
        let permit = gate
            .clone()
            .acquire_owned()
            .await
            .context("admission gate closed")?;
        let fut = probe_fn(id);

        probes.spawn(async move {
            let found = fut.await;
            // Fixed politeness pause, counted against the concurrency
            // bound so it also spaces out dispatch.
            tokio::time::sleep(delay).await;
            drop(permit);
            found
        });
    }

    // Join barrier: every probe completes before the directory is final.
    let mut directory = CompetitorDirectory::new();
    while let Some(joined) = probes.join_next().await {
        let found = joined.context("probe task panicked")?;
        if let Some((full_name, competitor)) = found {
            tracing::info!(name = %full_name, id = competitor.id, "Found competitor");
            directory.insert(full_name, competitor);
        }
    }

    Ok(directory)
}

async fn probe(client: &reqwest::Client, id: u32) -> Option<(String, Competitor)> {
    let url = client::profile_url(id);

    let html = match client::fetch_page(client, &url).await {
        Ok(html) => html,
        Err(FetchError::Status(status)) => {
            tracing::debug!(id, %status, "Skipping id: HTTP error");
            return None;
        }
        Err(FetchError::Transport(e)) => {
            tracing::debug!(id, error = %e, "Skipping id: no response");
            return None;
        }
    };

    let found = parse_competitor(&html, id);
    if found.is_none() {
        tracing::debug!(id, "Skipping id: no competitor on page");
    }
    found
}
