use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use market_data::{
    config::{Config, read_config},
    io::{csv::CsvFileSink, sink::DataSink},
    loader::Loader,
    models::query::BarsQuery,
    providers::yahoo::YahooProvider,
};

#[derive(Parser)]
#[command(version, about = "Price dashboard CLI")]
struct Cli {
    /// Path to an optional TOML config file
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Fetch daily bars, print the summary metrics, and write the CSV export
    Fetch {
        /// Ticker symbol (e.g. "AAPL", "BTC-USD")
        #[arg(long)]
        symbol: String,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,

        /// End date (YYYY-MM-DD), inclusive
        #[arg(long)]
        end: NaiveDate,

        /// Moving-average window in trading days
        #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u16).range(10..=200))]
        window: u16,

        /// Directory the CSV export is written into
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => read_config(path)?,
        None => Config::default(),
    };

    match cli.cmd {
        Cmd::Fetch {
            symbol,
            start,
            end,
            window,
            out,
        } => {
            let provider = YahooProvider::with_config(&config)?;
            let loader = Loader::new(Box::new(provider));

            let query = BarsQuery::new(symbol, start, end);
            let series = loader.load(&query).await?;

            if series.is_empty() {
                println!("No data available for this selection.");
                return Ok(());
            }

            let window = NonZeroUsize::new(usize::from(window))
                .context("window must be at least one day")?;
            let (averages, snapshot) = indicators::derive(&series, window);

            match snapshot {
                Some(s) => {
                    println!(
                        "Current Price: {:.2} ({:+.2}% / {:+.2})",
                        s.current_price, s.change_pct, s.change_abs
                    );
                    println!("Day High:      {:.2}", s.day_high);
                    println!("Day Low:       {:.2}", s.day_low);
                    println!("Total Volume:  {}", s.day_volume);
                }
                None => println!("Not enough history to compute a daily change."),
            }

            let sink = CsvFileSink::new(out);
            let path = sink.write(&series, averages.values(), window.get()).await?;
            println!("{}", path.display());
        }
    }

    Ok(())
}
