use cbr::{Client, Decimal};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
pub struct Cli {
	/// The date to query, `YYYY-MM-DD`. Defaults to today.
	#[clap(long)]
	date: Option<NaiveDate>,
	/// An alternative base URL for a compatible API.
	#[clap(long)]
	base_url: Option<String>,
	#[clap(subcommand)]
	command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
	Rate {
		currency: String,
		/// Prints the published string instead of the per-unit decimal.
		#[clap(long)]
		raw: bool,
	},
	Info {
		currency: String,
	},
	Table,
	Convert {
		amount: Decimal,
		from: String,
		to: String,
	},
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::init();
	let cli = Cli::parse();

	let mut builder = Client::builder().log_level(log::max_level());
	if let Some(base_url) = cli.base_url {
		builder = builder.base_url(base_url);
	}
	let client = builder.build()?;
	let date = cli.date.unwrap_or_else(|| Local::now().date_naive());

	match cli.command {
		CliCommand::Rate { currency, raw: false } => {
			println!("{currency} {}", client.rate_decimal(&currency, date)?);
		}
		CliCommand::Rate { currency, raw: true } => {
			println!("{currency} {}", client.rate_string(&currency, date)?);
		}
		CliCommand::Info { currency } => {
			let info = client.currency_info(&currency, date)?;
			println!("{}", serde_json::to_string_pretty(&info)?);
		}
		CliCommand::Table => {
			let rates = client.rates_on(date)?;
			println!("Fetched {} rates as of {}", rates.len(), rates.date());
			for currency in rates.iter() {
				println!("{} {} {}", currency.nominal(), currency.char_code(), currency.value_string());
			}
		}
		CliCommand::Convert { amount, from, to } => {
			let rates = client.rates_on(date)?;
			println!("{amount} {from} = {} {to}", rates.convert(amount, &from, &to)?);
		}
	}
	Ok(())
}
