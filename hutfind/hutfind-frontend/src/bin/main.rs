extern crate clap;
extern crate hutfind_frontend;
extern crate tracing;
extern crate tracing_subscriber;

use clap::ErrorKind;
use hutfind_frontend::options::{usage, ConfigError, Options};
use hutfind_frontend::{run, RunError};
use std::env;
use std::process;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.with_writer(std::io::stderr)
		.init();

	let options = match Options::parse(env::args_os()) {
		Ok(options) => options,
		Err(ConfigError::Arguments(error)) if error.kind == ErrorKind::HelpDisplayed || error.kind == ErrorKind::VersionDisplayed => {
			error.exit()
		}
		Err(error) => config_failure(error),
	};

	match run(&options) {
		Ok(outcome) => if !outcome.complete {
			error!("scan did not complete");
			process::exit(1);
		},
		Err(RunError::Config(error)) => config_failure(error),
		Err(error) => {
			error!("{}", error);
			process::exit(1);
		}
	}
}

fn config_failure(error: ConfigError) -> ! {
	eprintln!("{}", error);

	if !matches!(error, ConfigError::Arguments(_)) {
		eprintln!("{}", usage());
	}

	process::exit(1)
}
