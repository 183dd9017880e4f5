use std::error::Error;

use tfl_client::client::{FixtureTransport, Transport};
use tfl_client::{ApiResponse, ClientConfig, Direction, Record, TflClient};
use tracing_subscriber::EnvFilter;

/// Directory of recorded responses to serve instead of the live API.
const FIXTURES_DIR_VAR: &str = "TFL_FIXTURES_DIR";

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match std::env::var(FIXTURES_DIR_VAR) {
        Ok(dir) => {
            eprintln!("Serving fixtures from {dir}");
            run(TflClient::with_transport(FixtureTransport::from_dir(&dir)?))
        }
        Err(_) => {
            let config = ClientConfig::from_env();
            if config.credentials.is_none() {
                eprintln!("Warning: TFL_APP_KEY not set. Requests are limited to about one per second.");
            }
            run(TflClient::new(config)?)
        }
    }
}

fn run<T: Transport>(client: TflClient<T>) -> Result<(), Box<dyn Error>> {
    println!("Line modes:");
    for mode in client.get_line_meta_modes()?.into_records()? {
        println!("  {}", mode.mode_name);
    }

    println!();
    println!("First bus line:");
    print_first(client.get_lines(None, Some("bus"))?)?;

    println!();
    println!("Victoria line:");
    print_first(client.get_lines(Some("victoria"), None)?)?;

    println!();
    println!("Northern line route sequence:");
    print_first(client.get_route_by_line_id_with_direction("northern", Direction::All)?)?;

    Ok(())
}

fn print_first<R: Record>(response: ApiResponse<R>) -> Result<(), Box<dyn Error>> {
    match response.records().first() {
        Some(record) => println!("{}", record.to_json()?),
        None => match response.error() {
            Some(error) => println!("{}", error.to_json()?),
            None => println!("(no records)"),
        },
    }
    Ok(())
}
