use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};

use crate::model::RepoTarget;
use crate::period::{parse_start_month, ReportWindow, DEFAULT_MONTHS, DEFAULT_START};
use crate::space::api::DocumentTarget;
use crate::util;

#[derive(Parser, Debug)]
#[command(
    name = "space-git-report",
    version,
    about = "Publish per-month committer reports for JetBrains Space repositories",
    long_about = None
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Option<ReportKind>,

  /// More log output on stderr (-v info, -vv debug, -vvv trace); RUST_LOG takes precedence
  #[arg(short, long, action = clap::ArgAction::Count, global = true)]
  pub verbose: u8,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,
}

#[derive(Subcommand, Debug)]
pub enum ReportKind {
  /// Commits per member per month, published as a Markdown document
  Committers(CommittersArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CommittersArgs {
  /// Space instance URL, e.g. https://acme.jetbrains.space
  pub space_url: String,

  /// Project key, e.g. ABC
  pub project_key: String,

  /// Repository name inside the project
  pub repo_name: String,

  /// Name of the document to create
  pub document_name: String,

  /// Id of the documents folder to create it in
  pub folder_id: String,

  /// First month of the report, YYYY-MM
  #[arg(long, default_value = DEFAULT_START)]
  pub start: String,

  /// Number of months to cover
  #[arg(long, default_value_t = DEFAULT_MONTHS)]
  pub months: u32,

  /// Append a CSV block with the raw counts
  #[arg(long)]
  pub csv: bool,

  /// Ignore commits Space could not match to a member profile
  #[arg(long)]
  pub resolved_only: bool,

  /// Print the document to stdout instead of publishing it
  #[arg(long)]
  pub dry_run: bool,
}

#[derive(Debug)]
pub struct EffectiveConfig {
  pub target: RepoTarget,
  pub document: DocumentTarget,
  pub window: ReportWindow,
  pub include_csv: bool,
  pub resolved_only: bool,
  pub dry_run: bool,
}

fn required(value: &str, what: &str) -> Result<String> {
  let v = value.trim();
  if v.is_empty() {
    bail!("{} must not be empty", what);
  }
  Ok(v.to_string())
}

pub fn normalize(args: CommittersArgs) -> Result<EffectiveConfig> {
  let target = RepoTarget {
    base_url: util::normalize_base_url(&args.space_url)?,
    project_key: required(&args.project_key, "project key")?,
    repo_name: required(&args.repo_name, "repository name")?,
  };

  let document = DocumentTarget {
    folder_id: required(&args.folder_id, "folder id")?,
    name: required(&args.document_name, "document name")?,
  };

  let anchor = parse_start_month(&args.start)?;
  let window = ReportWindow::new(anchor, args.months)?;

  Ok(EffectiveConfig {
    target,
    document,
    window,
    include_csv: args.csv,
    resolved_only: args.resolved_only,
    dry_run: args.dry_run,
  })
}
