use crate::error::ScrapeError;
use crate::table::StatTable;

/// How the finished table numbers its `index` and `season_rank` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankMode {
    /// Number rows straight through the concatenated table, continuing
    /// across season boundaries. This reproduces the collector's
    /// historical output, where the rank column is really a row counter.
    #[default]
    Running,
    /// Restart the numbering at 1 for each season, ranking teams 1..30
    /// in page order within their own season.
    PerSeason,
}

/// Accumulates per-season tables into one historical table.
///
/// The builder owns the growing table; seasons are appended in call order
/// and every season must produce the same column layout as the first.
#[derive(Debug, Default)]
pub struct HistoryBuilder {
    history: StatTable,
}

impl HistoryBuilder {
    pub fn new() -> HistoryBuilder {
        HistoryBuilder::default()
    }

    /// Appends one season's rows, preserving row order.
    pub fn push_season(&mut self, season: StatTable) -> Result<(), ScrapeError> {
        if self.history.columns.is_empty() {
            self.history = season;
            return Ok(());
        }
        if season.columns != self.history.columns {
            return Err(ScrapeError::ColumnMismatch {
                context: "season column layout differs from earlier seasons".to_string(),
                expected: self.history.columns.len(),
                found: season.columns.len(),
            });
        }
        self.history.rows.extend(season.rows);
        Ok(())
    }

    /// Finishes the table, adding the leading `index` column and the
    /// trailing `season_rank` column in the requested mode.
    pub fn finish(self, rank_mode: RankMode) -> StatTable {
        let mut history = self.history;
        if history.rows.is_empty() {
            return history;
        }

        let positions = row_positions(&history, rank_mode);

        history.columns.insert(0, "index".to_string());
        history.columns.push("season_rank".to_string());
        for (row, pos) in history.rows.iter_mut().zip(positions) {
            row.insert(0, pos.to_string());
            row.push((pos + 1).to_string());
        }
        history
    }
}

/// Zero-based position of every row: global for `Running`, restarting at
/// each change of the `season` column for `PerSeason`.
fn row_positions(history: &StatTable, rank_mode: RankMode) -> Vec<usize> {
    match rank_mode {
        RankMode::Running => (0..history.len()).collect(),
        RankMode::PerSeason => {
            let season_col = history.column_index("season");
            let mut positions = Vec::with_capacity(history.len());
            let mut previous: Option<&str> = None;
            let mut within = 0;
            for row in &history.rows {
                let season = season_col.map(|c| row[c].as_str());
                if season != previous {
                    within = 0;
                    previous = season;
                }
                positions.push(within);
                within += 1;
            }
            positions
        }
    }
}
