//! CLI entrypoint for `bootconf`.

mod cli;
mod error;
mod fetch;
mod logging;
mod resolve;

use bootconf::{EngineSettings, Resolver};
use camino::Utf8Path;
use clap::Parser;

use crate::cli::{Args, Command};
use crate::error::CliError;
use crate::fetch::LocalFetcher;

fn main() -> Result<(), CliError> {
    run()
}

fn run() -> Result<(), CliError> {
    let args = Args::parse();
    logging::init(args.is_verbose)?;

    let settings = args
        .settings
        .as_deref()
        .map_or_else(EngineSettings::load, |path| {
            EngineSettings::load_from(path.as_std_path())
        })?;
    let resolver = Resolver::new(settings);

    match &args.command {
        Command::Resolve(resolve_args) => {
            let fetcher = LocalFetcher::open(Utf8Path::new("."))?;
            let mut stdout = std::io::stdout().lock();
            resolve::run(&resolver, &fetcher, resolve_args, &mut stdout)
        }
    }
}
