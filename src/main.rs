use anyhow::{bail, Result};
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

mod aggregate;
mod cli;
mod driver;
mod error;
mod ext;
mod identity;
mod model;
mod paginate;
mod period;
mod render;
mod space;
mod util;

use crate::cli::{normalize, Cli, ReportKind};
use crate::error::ReportError;
use crate::space::api::{build_api, get_space_token};

fn init_tracing(verbose: u8) {
  let level = match verbose {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  let Some(command) = cli.command else {
    eprintln!("{}", Cli::command().render_help());
    bail!("Report kind should be one of: committers");
  };

  match command {
    ReportKind::Committers(args) => {
      // Phase 1: normalize CLI
      let cfg = normalize(args)?;

      // Phase 2: credentials, before any request goes out
      let token = get_space_token().ok_or(ReportError::MissingToken)?;
      let api = build_api(token)?;

      // Phase 3: collect, render, publish
      driver::run_committers(&cfg, api.as_ref())
    }
  }
}
