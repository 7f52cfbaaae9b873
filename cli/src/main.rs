mod cli;
mod render;
mod session;

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use cli::{Cli, Command, Context};
use pickup_core::{ClientConfig, Outcome, PickupApi, PickupFilter};

use crate::session::Session;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let json = cli.json;
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if json {
                let failure = Outcome::<()>::failure(format!("{err:#}"));
                match serde_json::to_string_pretty(&failure) {
                    Ok(text) => println!("{text}"),
                    Err(_) => eprintln!("Error: {err:#}"),
                }
            } else {
                eprintln!("Error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = ClientConfig::from_env()?;
    if let Some(api_url) = &cli.api_url {
        config = ClientConfig {
            base_url: api_url.clone(),
            ..config
        };
    }
    if let Some(secs) = cli.timeout {
        config = config.with_request_timeout(Duration::from_secs(secs));
    }
    tracing::debug!(base_url = %config.base_url, "using pickup API");

    let ctx = Context {
        api: PickupApi::new(config),
        session: Session::start(cli.user.as_deref()),
        json: cli.json,
    };

    match cli.command {
        Command::Ping => cli::ping::ping(&ctx)?,
        Command::Request {
            waste_type,
            location,
            date,
            time,
            note,
        } => cli::request::request(&ctx, waste_type, &location, date, time, note.as_deref())?,
        Command::Track { id } => cli::track::track(&ctx, &id)?,
        Command::List { status, waste_type, by } => {
            let filter = PickupFilter {
                status,
                waste_type,
                user: by,
            };
            cli::list::list(&ctx, &filter)?
        }
        Command::SetStatus { id, status } => cli::lifecycle::set_status(&ctx, &id, status)?,
        Command::Reschedule { id, date, time } => cli::lifecycle::reschedule(&ctx, &id, date, time)?,
        Command::Cancel { id } => cli::lifecycle::cancel(&ctx, &id)?,
        Command::Delete { id } => cli::lifecycle::delete(&ctx, &id)?,
        Command::Impact => cli::impact::impact(&ctx)?,
    }

    Ok(())
}
