pub mod error;
pub mod history;
pub mod output;
pub mod season_handler;
pub mod table;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================
pub use error::ScrapeError;
pub use history::{HistoryBuilder, RankMode};
pub use output::{print_history_summary, write_history_csv};
pub use season_handler::{parse_season_page, ADVANCED_CAPTION, PER_GAME_CAPTION, TEAMS_PER_SEASON};
pub use table::StatTable;

// ============================================================================
// SEASON PAGES
// ============================================================================

const STATS_SITE: &str = "https://www.basketball-reference.com";

/// First season of the covered era (the 1979-80 season, when the
/// three-point line arrived).
pub const DEFAULT_FIRST_SEASON: u16 = 1980;

/// Last season collected by default.
pub const DEFAULT_LAST_SEASON: u16 = 2022;

/// URL of the summary page for a season, named by the year it ends in.
pub fn season_url(year: u16) -> String {
    format!("{STATS_SITE}/leagues/NBA_{year}.html")
}

// ============================================================================
// UTILITIES
// ============================================================================

/// Fetch HTML content from a URL, treating error statuses as failures
pub async fn fetch_html(url: &str) -> Result<String, ScrapeError> {
    let response = reqwest::get(url)
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|source| ScrapeError::Fetch {
            url: url.to_string(),
            source,
        })?;

    response.text().await.map_err(|source| ScrapeError::Fetch {
        url: url.to_string(),
        source,
    })
}

// ============================================================================
// MAIN ENTRY POINT
// ============================================================================

/// Collects every requested season into one historical table.
///
/// Seasons are fetched and parsed strictly in order; the first failure
/// aborts the whole run and no partial table is returned. The finished
/// table carries `index` and `season_rank` columns numbered per
/// `rank_mode`.
pub async fn collect_seasons(years: &[u16], rank_mode: RankMode) -> Result<StatTable, ScrapeError> {
    let mut builder = HistoryBuilder::new();

    for &year in years {
        println!("Collecting {} season...", year);
        let html = fetch_html(&season_url(year)).await?;
        let season = parse_season_page(&html, year)?;
        builder.push_season(season)?;

        // Add a small delay between requests to be nice to the server
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
    }

    Ok(builder.finish(rank_mode))
}
