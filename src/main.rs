mod batch;
mod config;
mod http;
mod ip;
mod logging;
mod secret;
mod update;

#[cfg(test)]
mod test_support;

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{ArgAction, Parser};

use batch::Outcome;
use config::{Config, ConfigError};
use http::Transport;
use logging::{Format, LogSettings};
use secret::{CommandSecret, SecretError, SecretProvider};
use update::{Endpoints, Updater};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Print debug information. Given twice, Duck DNS is also asked for
    /// verbose responses
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Configuration file [default: <config dir>/dduckdns/config.toml]
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Give up on an HTTP request after this many seconds
    #[arg(
        long,
        value_name = "SECONDS",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: u64,
}

impl Args {
    fn provider_verbose(&self) -> bool {
        self.verbose >= 2
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let settings = LogSettings::new(args.verbose, Format::detect());
    let dispatch = logging::dispatch(&settings, std::io::stderr);

    tracing::dispatcher::with_default(&dispatch, || run(&args))
}

fn run(args: &Args) -> ExitCode {
    let config = match load_config(args.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(
                error = &e as &(dyn Error + 'static),
                "Unable to load configuration"
            );
            return ExitCode::FAILURE;
        }
    };

    let secret = CommandSecret::new(&config.token_command);
    let connect = || http::Client::new(Duration::from_secs(args.timeout));
    let verbose = args.provider_verbose();

    match update_all(&config, &secret, connect, Endpoints::default(), verbose) {
        Ok(outcome) if outcome.is_success() => ExitCode::SUCCESS,

        Ok(_) => ExitCode::FAILURE,

        Err(e) => {
            tracing::error!(
                error = &e as &(dyn Error + 'static),
                "Unable to obtain the Duck DNS token"
            );
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Config, ConfigError> {
    let path = match path {
        Some(path) => path.clone(),
        None => config::default_path()?,
    };

    tracing::debug!(path = %path.display(), "Loading configuration");

    Config::load(&path)
}

/// Obtains the token once, then connects and updates every domain with it.
/// The transport is not even built if the token cannot be obtained.
fn update_all<T: Transport>(
    config: &Config,
    secret: &dyn SecretProvider,
    connect: impl FnOnce() -> T,
    endpoints: Endpoints,
    provider_verbose: bool,
) -> Result<Outcome, SecretError> {
    let token = secret.resolve()?;
    let transport = connect();
    let updater = Updater::new(&transport, endpoints, provider_verbose);

    Ok(batch::run(&updater, config, &token))
}
