use predicates::prelude::*;
use test_support::{committers_args, read_fixture_text, space_cmd};

fn dry_run(extra: &[&str]) -> assert_cmd::assert::Assert {
  space_cmd()
    .args(committers_args("Committers"))
    .args(["--months", "2", "--dry-run"])
    .args(extra)
    .env("SPACE_TOKEN", "t")
    .env("SPACE_TEST_COMMITS_JSON", read_fixture_text("commits_two_months.json"))
    .assert()
}

#[test]
fn prints_table_for_two_months() {
  let expected = read_fixture_text("expected/two_months.md");
  dry_run(&[]).success().stdout(predicate::eq(expected));
}

#[test]
fn csv_block_follows_table() {
  let expected = read_fixture_text("expected/two_months_csv.md");
  dry_run(&["--csv"]).success().stdout(predicate::eq(expected));
}

#[test]
fn resolved_only_hides_unmatched_authors() {
  let out = dry_run(&["--resolved-only"]).success().get_output().stdout.clone();
  let table = String::from_utf8(out).unwrap();

  assert_eq!(table.lines().count(), 4);
  assert!(table.contains("| https://acme.jetbrains.space/m/alice | [3]("));
  assert!(table.contains("| https://acme.jetbrains.space/m/carol | [0]("));
  assert!(!table.contains("Bob<bob@x.com>"));
  assert!(!table.contains("Dave Jones"));
}

#[test]
fn months_without_fixtures_render_zero_columns() {
  let out = space_cmd()
    .args(committers_args("Committers"))
    .args(["--start", "2022-12", "--months", "3", "--dry-run"])
    .env("SPACE_TOKEN", "t")
    .env("SPACE_TEST_COMMITS_JSON", read_fixture_text("commits_two_months.json"))
    .assert()
    .success()
    .get_output()
    .stdout
    .clone();
  let table = String::from_utf8(out).unwrap();

  let lines: Vec<&str> = table.lines().collect();
  assert_eq!(lines[0], "| Member | Dec | Jan | Feb |");
  assert_eq!(lines[1], "| ------ | ------ | ------ | ------ |");
  assert!(lines[2].starts_with("| https://acme.jetbrains.space/m/alice | [0]("));
  assert!(lines[2].contains("date%3A1-Dec-2022..31-Dec-2022"));
}

#[test]
fn verbose_logs_each_period_on_stderr() {
  dry_run(&["-v"])
    .success()
    .stderr(predicate::str::contains("period collected").count(2))
    .stderr(predicate::str::contains("2023-02"));
}

#[test]
fn quiet_by_default() {
  dry_run(&[]).success().stderr(predicate::str::is_empty());
}

#[test]
fn every_cell_links_to_filtered_commits() {
  let out = dry_run(&[]).success().get_output().stdout.clone();
  let table = String::from_utf8(out).unwrap();
  let cell = regex::Regex::new(
    r"^\[\d+\]\(https://acme\.jetbrains\.space/p/ABC/repositories/backend/commits\?query=author%3A\S+%20date%3A\d{1,2}-[A-Z][a-z]{2}-\d{4}\.\.\d{1,2}-[A-Z][a-z]{2}-\d{4}%20no-merges%3Atrue&tab=changes\)$",
  )
  .unwrap();

  for row in table.lines().skip(2) {
    let cells: Vec<&str> = row.trim_start_matches("| ").trim_end_matches(" |").split(" | ").collect();
    assert_eq!(cells.len(), 3, "{}", row);
    for c in &cells[1..] {
      assert!(cell.is_match(c), "{}", c);
    }
  }
}
