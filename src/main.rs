use std::path::PathBuf;
use std::process;

use clap::Parser;

use season_stats_scraper::{
    collect_seasons, print_history_summary, write_history_csv, RankMode, DEFAULT_FIRST_SEASON,
    DEFAULT_LAST_SEASON,
};

/// Scrapes NBA season statistics into one historical CSV table.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// First season to collect (a season is named by the year it ends in)
    #[arg(long, default_value_t = DEFAULT_FIRST_SEASON)]
    first_season: u16,

    /// Last season to collect, inclusive
    #[arg(long, default_value_t = DEFAULT_LAST_SEASON)]
    last_season: u16,

    /// Where to write the combined CSV
    #[arg(long, default_value = "history.csv")]
    output: PathBuf,

    /// Rank teams 1-30 within each season instead of numbering rows
    /// straight through the whole table
    #[arg(long)]
    per_season_rank: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if args.first_season > args.last_season {
        eprintln!(
            "First season {} is after last season {}",
            args.first_season, args.last_season
        );
        process::exit(1);
    }

    let years: Vec<u16> = (args.first_season..=args.last_season).collect();
    let rank_mode = if args.per_season_rank {
        RankMode::PerSeason
    } else {
        RankMode::Running
    };

    println!(
        "Collecting {} seasons ({}-{})...",
        years.len(),
        args.first_season,
        args.last_season
    );

    let history = match collect_seasons(&years, rank_mode).await {
        Ok(history) => history,
        Err(e) => {
            eprintln!("Error collecting seasons: {}", e);
            process::exit(1);
        }
    };

    print_history_summary(&history);

    if let Err(e) = write_history_csv(&history, &args.output) {
        eprintln!("Error writing output: {}", e);
        process::exit(1);
    }
}
