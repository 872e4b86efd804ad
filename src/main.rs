use anyhow::Result;

use movie_rating_stats::cli::Command;
use movie_rating_stats::{handle_init, handle_report, handle_serve, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(*port),
        Command::Init => handle_init(),
        Command::Report {
            movie_id,
            dimension,
            raw,
        } => handle_report(movie_id, dimension.as_deref(), *raw),
    }
}
