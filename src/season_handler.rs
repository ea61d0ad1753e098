use std::ops::Range;

use scraper::{ElementRef, Html, Selector};

use crate::error::ScrapeError;
use crate::table::StatTable;

// ============================================================================
// PAGE LAYOUT CONSTANTS
// ============================================================================

/// Caption of the team per-game table on a season page.
pub const PER_GAME_CAPTION: &str = "Per Game Stats Table";

/// Caption of the advanced stats table on a season page.
pub const ADVANCED_CAPTION: &str = "Advanced Stats Table";

/// Teams in the league for every covered season; any rows past this point
/// are summary rows (league average).
pub const TEAMS_PER_SEASON: usize = 30;

// Header cells kept from each table. The per-game tables lead with a row
// index column; the advanced table leads with grouping headers and a row
// index before the 30 stat columns.
const BASIC_STAT_SPAN: Range<usize> = 1..25;
const ADVANCED_STAT_SPAN: Range<usize> = 6..36;

/// Columns removed from the joined table; duplicated across the three
/// source tables or irrelevant downstream.
const REDUNDANT_COLUMNS: &[&str] = &["G", "opp_G", "PW", "PL", "SRS", "Arena", "Attend."];

// ============================================================================
// SEASON PAGE PARSING
// ============================================================================

/// Parses one season summary page into a single wide per-team table.
///
/// Joins the per-game team table, the opponent table directly after it, and
/// the advanced stats table on the `Team` column, keeps the 30 team rows,
/// and tags every row with the season year.
pub fn parse_season_page(html: &str, year: u16) -> Result<StatTable, ScrapeError> {
    let document = Html::parse_document(html);
    let tables = captioned_tables(&document);

    let per_game_pos = caption_position(&tables, PER_GAME_CAPTION)?;
    let adv_stat_pos = caption_position(&tables, ADVANCED_CAPTION)?;

    let team_stats = extract_per_game_table(tables[per_game_pos].0, "")?;

    // The opponent table sits directly after the team table on the page.
    let (opp_element, _) =
        tables
            .get(per_game_pos + 1)
            .ok_or_else(|| ScrapeError::TableNotFound {
                caption: format!("opponent table directly after '{}'", PER_GAME_CAPTION),
            })?;
    let mut opp_stats = extract_per_game_table(*opp_element, "opp_")?;

    let adv_stats = extract_advanced_table(tables[adv_stat_pos].0)?;

    // Restore the opponent team column to act as the join key.
    // TODO: strip the trailing playoff asterisk from team names once its
    // consistency across all three tables is confirmed for every season.
    opp_stats.rename_column("opp_Team", "Team");

    let mut season = team_stats.inner_join(&opp_stats)?;
    season = season.inner_join(&adv_stats)?;

    season.drop_columns(REDUNDANT_COLUMNS);
    season.truncate(TEAMS_PER_SEASON);

    let seasons = vec![year.to_string(); season.len()];
    season.push_column("season", seasons)?;

    Ok(season)
}

// ============================================================================
// TABLE LOCATION
// ============================================================================

type CaptionedTable<'a> = (ElementRef<'a>, Option<String>);

/// All table elements in document order, each paired with its own caption.
fn captioned_tables(document: &Html) -> Vec<CaptionedTable<'_>> {
    let table_selector = Selector::parse("table").unwrap();
    let caption_selector = Selector::parse("caption").unwrap();

    document
        .select(&table_selector)
        .map(|table| {
            let caption = table
                .select(&caption_selector)
                .next()
                .map(|c| c.text().collect::<String>().trim().to_string());
            (table, caption)
        })
        .collect()
}

/// Position of the table whose caption matches exactly.
fn caption_position(tables: &[CaptionedTable], caption: &str) -> Result<usize, ScrapeError> {
    tables
        .iter()
        .position(|(_, c)| c.as_deref() == Some(caption))
        .ok_or_else(|| ScrapeError::TableNotFound {
            caption: caption.to_string(),
        })
}

// ============================================================================
// TABLE EXTRACTION
// ============================================================================

/// Extracts a per-game stats table (team or opponent flavor).
///
/// Keeps the 24 stat columns after the leading row-index header; data rows
/// are everything after the single header row. Column names get the given
/// prefix ("opp_" for the opponent table).
fn extract_per_game_table(table: ElementRef, prefix: &str) -> Result<StatTable, ScrapeError> {
    let headers = header_cells(table);
    let kept = headers
        .get(BASIC_STAT_SPAN)
        .ok_or_else(|| ScrapeError::ColumnMismatch {
            context: "per game table header".to_string(),
            expected: BASIC_STAT_SPAN.end,
            found: headers.len(),
        })?;

    let columns = kept.iter().map(|name| format!("{prefix}{name}")).collect();
    StatTable::new(columns, body_rows(table, 1))
}

/// Extracts the advanced stats table.
///
/// The stat columns sit at flat header positions 6..36, and the table
/// carries two header rows. Spacer columns with blank names are dropped.
fn extract_advanced_table(table: ElementRef) -> Result<StatTable, ScrapeError> {
    let headers = header_cells(table);
    let kept = headers
        .get(ADVANCED_STAT_SPAN)
        .ok_or_else(|| ScrapeError::ColumnMismatch {
            context: "advanced table header".to_string(),
            expected: ADVANCED_STAT_SPAN.end,
            found: headers.len(),
        })?;

    let mut stats = StatTable::new(kept.to_vec(), body_rows(table, 2))?;
    stats.drop_blank_columns();
    Ok(stats)
}

/// Text of every header cell in the table, in document order.
fn header_cells(table: ElementRef) -> Vec<String> {
    let th_selector = Selector::parse("th").unwrap();
    table.select(&th_selector).map(cell_text).collect()
}

/// Data cells of every row past the header rows. Rows without data cells
/// (header-only rows) are skipped.
fn body_rows(table: ElementRef, header_rows: usize) -> Vec<Vec<String>> {
    let tr_selector = Selector::parse("tr").unwrap();
    let td_selector = Selector::parse("td").unwrap();

    table
        .select(&tr_selector)
        .skip(header_rows)
        .map(|row| row.select(&td_selector).map(cell_text).collect::<Vec<_>>())
        .filter(|cells| !cells.is_empty())
        .collect()
}

fn cell_text(cell: ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // A cut-down season page: three teams plus a league-average row, with
    // the real page's table ordering and header layout.
    fn sample_page() -> String {
        let mut page = String::from("<html><body>");

        // Standings table before the stats tables, to keep positions honest.
        page.push_str(
            "<table><caption>Division Standings Table</caption>\
             <tr><th>Team</th><th>W</th></tr>\
             <tr><td>Team A</td><td>50</td></tr></table>",
        );

        page.push_str(&per_game_table(PER_GAME_CAPTION));
        page.push_str(&per_game_table("Per Game Stats (Opponent) Table"));
        page.push_str(&advanced_table());

        page.push_str("</body></html>");
        page
    }

    fn per_game_table(caption: &str) -> String {
        let mut t = format!("<table><caption>{caption}</caption><tr><th>Rk</th>");
        for name in ["Team", "G", "MP", "FG", "PTS"] {
            t.push_str(&format!("<th>{name}</th>"));
        }
        // Pad the header out to the 24 kept columns.
        for i in 0..19 {
            t.push_str(&format!("<th>B{i}</th>"));
        }
        t.push_str("</tr>");
        for (rk, team) in ["Team A", "Team B", "Team C", "League Average"]
            .iter()
            .enumerate()
        {
            t.push_str(&format!("<tr><th>{}</th><td>{team}</td>", rk + 1));
            for i in 0..23 {
                t.push_str(&format!("<td>{i}</td>"));
            }
            t.push_str("</tr>");
        }
        t.push_str("</table>");
        t
    }

    fn advanced_table() -> String {
        let mut t = format!(
            "<table><caption>{ADVANCED_CAPTION}</caption>\
             <tr><th></th><th></th><th></th><th>Offense</th><th>Defense</th></tr><tr><th>Rk</th>"
        );
        let mut names: Vec<String> = vec![
            "Team".into(),
            "Age".into(),
            "W".into(),
            "PW".into(),
            "PL".into(),
            "SRS".into(),
            "ORtg".into(),
            "\u{a0}".into(),
            "eFG%".into(),
            "\u{a0}".into(),
            "Arena".into(),
            "Attend.".into(),
        ];
        while names.len() < 30 {
            names.push(format!("A{}", names.len()));
        }
        for name in &names {
            t.push_str(&format!("<th>{name}</th>"));
        }
        t.push_str("</tr>");
        for (rk, team) in ["Team A", "Team B", "Team C", "League Average"]
            .iter()
            .enumerate()
        {
            t.push_str(&format!("<tr><th>{}</th><td>{team}</td>", rk + 1));
            for i in 0..29 {
                t.push_str(&format!("<td>a{i}</td>"));
            }
            t.push_str("</tr>");
        }
        t.push_str("</table>");
        t
    }

    #[test]
    fn test_parse_season_page_shape() {
        let season = parse_season_page(&sample_page(), 1980).unwrap();

        // Three teams plus the league-average row survive the join; the
        // 30-row cut only matters for full-size pages.
        assert_eq!(season.len(), 4);
        assert_eq!(season.get(0, "Team"), Some("Team A"));
        assert_eq!(season.get(0, "season"), Some("1980"));

        // Exactly one Team column, no residual opp_Team.
        let team_columns = season.columns.iter().filter(|c| *c == "Team").count();
        assert_eq!(team_columns, 1);
        assert_eq!(season.column_index("opp_Team"), None);

        // Opponent columns carry the prefix.
        assert!(season.column_index("opp_PTS").is_some());
        assert!(season.column_index("opp_MP").is_some());
    }

    #[test]
    fn test_redundant_and_blank_columns_dropped() {
        let season = parse_season_page(&sample_page(), 1980).unwrap();

        for name in ["G", "opp_G", "PW", "PL", "SRS", "Arena", "Attend."] {
            assert_eq!(season.column_index(name), None, "column {name} survived");
        }
        assert!(season.columns.iter().all(|c| !c.trim().is_empty()));

        // Advanced stats made it through the join.
        assert!(season.column_index("Age").is_some());
        assert!(season.column_index("eFG%").is_some());
    }

    #[test]
    fn test_missing_caption_is_an_error() {
        let page = sample_page().replace(ADVANCED_CAPTION, "Advanced stats table");
        let err = parse_season_page(&page, 1980).unwrap_err();
        match err {
            ScrapeError::TableNotFound { caption } => assert_eq!(caption, ADVANCED_CAPTION),
            other => panic!("expected TableNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_caption_match_is_exact() {
        let page = sample_page().replace(PER_GAME_CAPTION, "Per Game  Stats Table");
        assert!(matches!(
            parse_season_page(&page, 1980),
            Err(ScrapeError::TableNotFound { .. })
        ));
    }
}
