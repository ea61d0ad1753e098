use std::fs::File;
use std::path::Path;

use crate::error::ScrapeError;
use crate::table::StatTable;

// ============================================================================
// CSV OUTPUT
// ============================================================================

/// Writes the historical table to a CSV file.
pub fn write_history_csv(history: &StatTable, path: &Path) -> Result<(), ScrapeError> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);

    writer.write_record(&history.columns)?;
    for row in &history.rows {
        writer.write_record(row)?;
    }

    writer.flush()?;
    println!("History written to {}", path.display());
    Ok(())
}

// ============================================================================
// OUTPUT FORMATTING
// ============================================================================

/// Prints a per-season breakdown of the collected table to stdout.
pub fn print_history_summary(history: &StatTable) {
    println!(
        "\nCollected {} team rows across {} columns",
        history.len(),
        history.columns.len()
    );
    println!("{:-<80}", "");

    let Some(season_col) = history.column_index("season") else {
        return;
    };

    let mut current: Option<&str> = None;
    let mut count = 0;
    for row in &history.rows {
        let season = row[season_col].as_str();
        if current != Some(season) {
            if let Some(previous) = current {
                println!("{:>6}: {} teams", previous, count);
            }
            current = Some(season);
            count = 0;
        }
        count += 1;
    }
    if let Some(previous) = current {
        println!("{:>6}: {} teams", previous, count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_history_csv() {
        let history = StatTable::new(
            vec!["Team".to_string(), "season".to_string()],
            vec![
                vec!["Team A".to_string(), "1980".to_string()],
                vec!["Team B".to_string(), "1980".to_string()],
            ],
        )
        .unwrap();

        let path = std::env::temp_dir().join("season_stats_scraper_test_history.csv");
        write_history_csv(&history, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "Team,season\nTeam A,1980\nTeam B,1980\n");
        std::fs::remove_file(&path).unwrap();
    }
}
