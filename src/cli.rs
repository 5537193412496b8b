use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use stock_insight::{
    analysis::StockAnalyzer, config::AnalysisConfig, loader::FileDataLoader, model::Lookback,
    symbol::Exchange,
};

#[derive(Parser)]
#[command(name = "stock-insight")]
#[command(about = "Price indicators and news sentiment for NSE/BSE tickers", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Derive indicators and news sentiment, optionally against a second symbol
    Analyze {
        symbol: String,

        /// Second symbol for a side-by-side comparison
        #[arg(short, long)]
        compare: Option<String>,

        /// Lookback window: 1mo, 3mo, 6mo, 1y or 2y
        #[arg(short, long, env = "STOCK_INSIGHT_PERIOD", default_value = "3mo")]
        period: Lookback,

        /// Directory holding prices/<SYMBOL>.csv and news/<SYMBOL>.json
        #[arg(short, long, env = "STOCK_INSIGHT_DATA_DIR", default_value = "./data")]
        data_dir: PathBuf,

        /// Only aggregate the first N articles [default: 8]
        #[arg(long)]
        max_articles: Option<usize>,

        /// Aggregate every article instead of the first N
        #[arg(long, conflicts_with = "max_articles")]
        all_articles: bool,

        /// Resolve bare tickers on the BSE instead of the NSE
        #[arg(long)]
        bse: bool,
    },
    /// Print the normalized form of a symbol
    Normalize {
        symbol: String,

        #[arg(long)]
        bse: bool,
    },
}

fn exchange(bse: bool) -> Exchange {
    if bse {
        Exchange::Bse
    } else {
        Exchange::Nse
    }
}

pub fn run() -> eyre::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            symbol,
            compare,
            period,
            data_dir,
            max_articles,
            all_articles,
            bse,
        } => {
            let mut config = AnalysisConfig::default()
                .with_lookback(period)
                .with_default_exchange(exchange(bse));
            if all_articles {
                config = config.with_max_articles(None);
            } else if max_articles.is_some() {
                config = config.with_max_articles(max_articles);
            }
            info!(?config, data_dir = %data_dir.display(), "analyzing");

            let analyzer = StockAnalyzer::new(
                config,
                FileDataLoader::new(&data_dir),
                FileDataLoader::new(&data_dir),
            );
            let dashboard = analyzer.dashboard(&symbol, compare.as_deref())?;

            println!("{}", serde_json::to_string_pretty(&dashboard)?);
        }
        Commands::Normalize { symbol, bse } => {
            let symbol = stock_insight::symbol::normalize(&symbol, exchange(bse))?;
            println!("{symbol}");
        }
    }

    Ok(())
}
