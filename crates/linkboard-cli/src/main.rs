mod cli;
mod commands;
mod http;

use std::ffi::OsString;

use anyhow::Context;
use clap::Parser;
use linkboard_core::{
  BoardClient,
  CatalogApi,
  ClientConfig,
  TextRenderer
};
use tracing::{
  debug,
  info
};

fn main() {
  let args: Vec<OsString> =
    std::env::args_os().collect();
  if let Err(err) = run(args) {
    eprintln!("error: {err:#}");
    std::process::exit(1);
  }
}

#[tracing::instrument(skip_all)]
fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<()> {
  let cli =
    cli::GlobalCli::parse_from(raw_args);

  let mut cfg = ClientConfig::load(
    cli.config.as_deref()
  )?;
  cfg.apply_api_base(cli.api_base.clone());

  cli::init_tracing(
    cli.verbose,
    cli.quiet,
    &cfg.log_filter
  )?;

  info!(
    api_base = %cfg.api_base,
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting linkboard CLI"
  );
  debug!(config = ?cfg.loaded_from, "resolved config");

  let runtime =
    tokio::runtime::Builder::new_current_thread()
      .enable_all()
      .build()
      .context(
        "failed to start async runtime"
      )?;

  let remote = http::HttpClient::new()?;
  let board = BoardClient::new(
    CatalogApi::new(
      remote,
      cfg.api_base.clone()
    )
  );
  let renderer = TextRenderer::new(&cfg);

  runtime.block_on(commands::dispatch(
    &board,
    &renderer,
    cli.command.unwrap_or_default()
  ))?;

  info!("done");
  Ok(())
}
