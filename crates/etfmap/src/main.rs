mod cli;
mod fetcher;

// remote imports
use clap::Parser;
use cli::{Cli, TraceLevel};
use tracing::{subscriber, trace, Level};
use tracing_subscriber::FmtSubscriber;

////////////////////////////////////////////////////////////////////////////

// preproccess the trace level, and open the .env file
fn preprocess(trace_level: Level) {
    dotenv::dotenv().ok();
    let my_subscriber = FmtSubscriber::builder()
        .with_max_level(trace_level)
        .finish();
    subscriber::set_global_default(my_subscriber).expect("Set subscriber");
}

////////////////////////////////////////////////////////////////////////////

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // set the trace level
    if let Some(trace_level) = cli.trace {
        preprocess(match trace_level {
            TraceLevel::DEBUG => Level::DEBUG,
            TraceLevel::ERROR => Level::ERROR,
            TraceLevel::INFO => Level::INFO,
            TraceLevel::TRACE => Level::TRACE,
            TraceLevel::WARN => Level::WARN,
        });
    } else {
        dotenv::dotenv().ok();
    }
    trace!("command line input recorded: {cli:?}");

    // if no trace level provided, use tui
    let tui = match cli.trace {
        Some(_) => false,
        None => true,
    };

    // read cli inputs
    use cli::Commands::*;
    match cli.command {
        // `etfmap fetch <Option<Vec<String>>>`: download composition files
        Fetch { countries } => {
            // if no countries provided, fetch the us screener only
            match countries {
                Some(countries) => fetcher::run(countries, tui).await?,
                None => fetcher::run(vec!["us".to_string()], tui).await?,
            }
        }

        // `etfmap iso`: print the country code reference table
        Iso => {
            let mapping = etfmap_spider::iso::load_iso_mapping()?;
            for country in &mapping {
                println!("{:<40} {:<4} {}", country.name, country.alpha2, country.alpha3);
            }
            println!("{} countries loaded", mapping.len());
        }
    }

    Ok(())
}
