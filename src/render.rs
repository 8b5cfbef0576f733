// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Turn the aggregate into the published Markdown table and the copy-paste CSV block
// role: rendering/markdown+csv
// inputs: AggregateStore (read-only), ReportWindow, RepoTarget
// outputs: Markdown and CSV text
// invariants:
// - rows ordered by descending total, ties in insertion order
// - one column per window period, in window order; zero months render as [0](link)
// - member cell: profile link when resolved, raw name<email> otherwise (no Markdown escaping)
// - commit links filter by author (username, else display name), date range and no-merges
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use crate::aggregate::AggregateStore;
use crate::model::{ContributorKey, RepoTarget};
use crate::period::{format_query_date, Period, ReportWindow};
use crate::util::encode_query_value;

const SEPARATOR_CELL: &str = "------";

/// Deep link into the repository's commit list, filtered to one author and month.
pub fn commits_link(target: &RepoTarget, key: &ContributorKey, period: &Period) -> String {
  format!(
    "{}/p/{}/repositories/{}/commits?query=author%3A{}%20date%3A{}..{}%20no-merges%3Atrue&tab=changes",
    target.base_url,
    target.project_key,
    target.repo_name,
    encode_query_value(key.author_filter()),
    format_query_date(period.first_day()),
    format_query_date(period.last_day()),
  )
}

fn month_headers(window: &ReportWindow) -> Vec<String> {
  window.periods().iter().map(Period::short_name).collect()
}

pub fn markdown_table(store: &AggregateStore, window: &ReportWindow, target: &RepoTarget) -> String {
  let periods = window.periods();
  let mut out = String::new();

  out.push_str(&format!("| Member | {} |\n", month_headers(window).join(" | ")));
  out.push_str(&format!(
    "| {} | {} |\n",
    SEPARATOR_CELL,
    vec![SEPARATOR_CELL; periods.len()].join(" | ")
  ));

  for entry in store.entries_by_total_desc() {
    let cells: Vec<String> = periods
      .iter()
      .map(|p| format!("[{}]({})", entry.count_for(p), commits_link(target, entry.key(), p)))
      .collect();

    out.push_str(&format!(
      "| {} | {} |\n",
      entry.key().member_label(&target.base_url),
      cells.join(" | ")
    ));
  }

  out
}

/// Quote a CSV field when it would otherwise break the row.
fn csv_field(raw: &str) -> String {
  if raw.contains([',', '"', '\n', '\r']) {
    format!("\"{}\"", raw.replace('"', "\"\""))
  } else {
    raw.to_string()
  }
}

pub fn csv_block(store: &AggregateStore, window: &ReportWindow, target: &RepoTarget) -> String {
  let periods = window.periods();
  let mut out = String::from("```csv\n");

  out.push_str(&format!("Member,{}\n", month_headers(window).join(",")));

  for entry in store.entries_by_total_desc() {
    let mut fields = Vec::with_capacity(periods.len() + 1);
    fields.push(csv_field(&entry.key().member_label(&target.base_url)));
    fields.extend(periods.iter().map(|p| entry.count_for(p).to_string()));
    out.push_str(&fields.join(","));
    out.push('\n');
  }

  out.push_str("```\n");
  out
}

/// The document body that gets published: the table, optionally followed by the CSV block.
pub fn render_document(store: &AggregateStore, window: &ReportWindow, target: &RepoTarget, include_csv: bool) -> String {
  let mut doc = markdown_table(store, window, target);
  if include_csv {
    doc.push('\n');
    doc.push_str(&csv_block(store, window, target));
  }
  doc
}
