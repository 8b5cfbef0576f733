// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Orchestrate a committers report: fetch each month, attribute commits, aggregate, render, publish
// role: processing/orchestrator
// inputs: EffectiveConfig, a SpaceApi backend
// outputs: Markdown document published to Space (or printed on --dry-run)
// side_effects: Network calls through SpaceApi; stdout on --dry-run
// invariants:
// - periods are processed strictly in window order, one at a time
// - each (contributor, period) pair reaches the store at most once
// - nothing is published unless every period was fetched successfully
// errors: First failing period or publish aborts the run with period/document context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::aggregate::AggregateStore;
use crate::cli::EffectiveConfig;
use crate::identity::{self, group_period};
use crate::model::RepoTarget;
use crate::paginate::fetch_period_commits;
use crate::period::ReportWindow;
use crate::render::render_document;
use crate::space::api::SpaceApi;

/// Fetch and attribute every period of `window` into a fresh store.
pub fn collect_committers(
  api: &dyn SpaceApi,
  target: &RepoTarget,
  window: &ReportWindow,
  resolved_only: bool,
) -> Result<AggregateStore> {
  let mut store = AggregateStore::new();

  for period in window.periods() {
    let mut commits = fetch_period_commits(api, target, period)
      .with_context(|| format!("fetching commits for {} ({})", period, period.query_range()))?;

    let fetched = commits.len();
    if resolved_only {
      commits = identity::resolved_only(commits);
    }

    let groups = group_period(&commits);
    info!(
      period = %period,
      fetched,
      counted = commits.len(),
      contributors = groups.len(),
      "period collected"
    );

    for group in groups {
      store
        .record_period(group.key, *period, group.count)
        .with_context(|| format!("recording {}", period))?;
    }
  }

  Ok(store)
}

/// Collect and render; returns the document body.
pub fn build_report(cfg: &EffectiveConfig, api: &dyn SpaceApi) -> Result<String> {
  let store = collect_committers(api, &cfg.target, &cfg.window, cfg.resolved_only)?;
  if store.is_empty() {
    warn!(repo = %cfg.target.repo_name, "no commits in the whole window; the table will have no rows");
  }
  info!(contributors = store.len(), months = cfg.window.month_count(), "aggregation complete");

  Ok(render_document(&store, &cfg.window, &cfg.target, cfg.include_csv))
}

pub fn run_committers(cfg: &EffectiveConfig, api: &dyn SpaceApi) -> Result<()> {
  let body = build_report(cfg, api)?;

  if cfg.dry_run {
    print!("{}", body);
    return Ok(());
  }

  api
    .create_document(&cfg.target, &cfg.document, &body)
    .with_context(|| format!("publishing document '{}' to folder {}", cfg.document.name, cfg.document.folder_id))?;
  info!(name = %cfg.document.name, folder = %cfg.document.folder_id, "document published");

  Ok(())
}
