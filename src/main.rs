use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use finhealth::api::{ProfileArgs, run_assess_command, run_http_server};

#[derive(Parser, Debug)]
#[command(
    name = "finhealth",
    about = "Financial health score, FIRE projection and quick wins"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the JSON API.
    Serve {
        #[arg(long, env = "FINHEALTH_PORT", default_value_t = 8080)]
        port: u16,
    },
    /// Assess one profile and print the report.
    Assess {
        #[command(flatten)]
        profile: ProfileArgs,
        #[arg(long, help = "Projection start date (YYYY-MM-DD); defaults to today")]
        as_of: Option<NaiveDate>,
        #[arg(long, help = "Print the full report as JSON")]
        json: bool,
    },
}

fn init_tracing() {
    let log_format = std::env::var("FINHEALTH_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false).with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { port } => {
            if let Err(e) = run_http_server(port).await {
                tracing::error!(error = %e, "server error");
                std::process::exit(1);
            }
        }
        Command::Assess {
            profile,
            as_of,
            json,
        } => match run_assess_command(&profile, as_of, json) {
            Ok(output) => print!("{output}"),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(2);
            }
        },
    }
}
