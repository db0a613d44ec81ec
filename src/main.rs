mod booking;
mod models;
mod registration;
mod request;
mod ui;

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::models::Config;

/// Hemora — blood donation registration, booking and requests
#[derive(Parser, Debug)]
#[command(name = "hemora", version, about)]
struct Cli {
    /// Override how many days ahead appointments can be booked
    #[arg(long)]
    booking_window_days: Option<i64>,
}

fn main() -> Result<()> {
    // Initialize logging - suppress most logs for TUI
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::ERROR)
        .with_env_filter("hemora=error")
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(window) = cli.booking_window_days {
        config.booking_window_days = window;
    }

    match ui::app::run_app(config) {
        Ok(_) => {
            println!("Thank you for supporting Hemora!");
        }
        Err(e) => {
            eprintln!("TUI Error: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
