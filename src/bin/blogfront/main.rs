//! blogfront: command-line front end for the blog posts API.
//! Prints every result as a `{data, error}` envelope on stdout.
#![deny(clippy::all, clippy::pedantic)]

mod handlers;
mod io;
mod print;

use std::process::ExitCode;

use blogfront::{
    application::{AppError, build_actions},
    config::{self, Command},
    infra::telemetry,
};
use tracing::{Dispatch, Level, dispatcher, error};
use tracing_subscriber::fmt as tracing_fmt;

use handlers::Outcome;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(Outcome::Data) => ExitCode::SUCCESS,
        Ok(Outcome::Error) => ExitCode::FAILURE,
        Err(error) => {
            report_application_error(&error);
            ExitCode::FAILURE
        }
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_writer(std::io::stderr)
        .with_max_level(Level::ERROR)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<Outcome, AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    telemetry::init(&settings.logging)?;
    let actions = build_actions(&settings)?;

    match cli_args.command {
        Command::Posts(cmd) => handlers::posts(&actions, cmd.action).await,
    }
}
