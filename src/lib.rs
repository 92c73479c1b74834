pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod models;

use std::time::Duration;

use cli::output::print_error;
use config::{OutputMode, RuntimeConfig};
use error::AppError;

pub async fn run(cli_args: cli::Cli) -> i32 {
    let config = RuntimeConfig {
        output_mode: if cli_args.table {
            OutputMode::Table
        } else {
            OutputMode::Json
        },
        verbose: cli_args.verbose,
        dry_run: cli_args.dry_run,
        gateway: cli_args.ip,
        timeout: Duration::from_secs(cli_args.timeout),
    };

    let result = dispatch(cli_args.command, &config).await;

    match result {
        Ok(()) => 0,
        Err(err) => {
            print_error(&err);
            err.exit_code()
        }
    }
}

async fn dispatch(command: cli::Commands, config: &RuntimeConfig) -> Result<(), AppError> {
    match command {
        cli::Commands::GetDevice { target, id } => {
            cli::device::handle_get(&target, id.as_deref(), config).await
        }
        cli::Commands::SetDevice { target, id, value } => {
            cli::device::handle_set(&target, id.as_deref(), value.as_deref(), config).await
        }
        cli::Commands::SetLevel { target, percent } => {
            cli::device::handle_level(&target, percent.as_deref(), config).await
        }
        cli::Commands::SetColour {
            target,
            cid,
            ctype,
            values,
        } => cli::colour::handle_set(&target, cid.as_deref(), ctype, &values, config).await,
        cli::Commands::GetControl {
            channel,
            index,
            field,
        } => cli::control::handle_get(channel, index, field.as_deref(), config).await,
        cli::Commands::Variables => cli::catalog::handle_variables(config),
        cli::Commands::Colours => cli::catalog::handle_colours(config),
    }
}
