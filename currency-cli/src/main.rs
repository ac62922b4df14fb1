//! Currency CLI
//!
//! Command-line interface for the Currency API.

use std::collections::BTreeMap;
use std::str::FromStr;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use currency_client::CurrencyClient;
use currency_types::CurrencyId;

#[derive(Parser)]
#[command(name = "currency")]
#[command(author, version, about = "Currency API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Currency API
    #[arg(
        long,
        env = "CURRENCY_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check API health
    Health,
    /// List registered currencies
    List,
    /// Register a currency with its fixed exchange rates
    Create {
        /// Currency name (e.g. BRL)
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Exchange rate as CODE=RATE, repeatable
        #[arg(long = "rate", value_parser = parse_rate)]
        rates: Vec<(String, Decimal)>,
    },
    /// Delete a currency by id
    Delete {
        /// Currency id
        id: CurrencyId,
    },
    /// Convert an amount between two currencies
    Convert {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        amount: Decimal,
        /// Use the live quote instead of the stored rate
        #[arg(long)]
        live: bool,
    },
}

fn parse_rate(s: &str) -> Result<(String, Decimal), String> {
    let (code, rate) = s
        .split_once('=')
        .ok_or_else(|| format!("expected CODE=RATE, got '{}'", s))?;
    let code = code.trim();
    if code.is_empty() {
        return Err(format!("missing currency code in '{}'", s));
    }
    let rate = Decimal::from_str(rate.trim()).map_err(|e| format!("invalid rate '{}': {}", rate, e))?;
    Ok((code.to_string(), rate))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = CurrencyClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::List => {
            for label in client.list_currencies().await? {
                println!("{}", label);
            }
        }

        Commands::Create {
            name,
            description,
            rates,
        } => {
            let exchanges: BTreeMap<String, Decimal> = rates.into_iter().collect();
            let id = client.create_currency(&name, &description, exchanges).await?;
            println!("{}", id);
        }

        Commands::Delete { id } => {
            client.delete_currency(id).await?;
            println!("✓ Currency {} deleted", id);
        }

        Commands::Convert {
            from,
            to,
            amount,
            live,
        } => {
            let converted = if live {
                client.convert_live(&from, &to, amount).await?
            } else {
                client.convert(&from, &to, amount).await?
            };
            println!("{}", converted);
        }
    }

    Ok(())
}
