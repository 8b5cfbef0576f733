use predicates::prelude::*;
use test_support::{committers_args, read_fixture_text, space_cmd};

#[test]
fn publishes_document_into_folder() {
  let td = test_support::tempdir();

  space_cmd()
    .args(committers_args("Committers H1"))
    .args(["--months", "2"])
    .env("JB_SPACE_CLIENT_TOKEN", "t")
    .env("SPACE_TEST_COMMITS_JSON", read_fixture_text("commits_two_months.json"))
    .env("SPACE_TEST_PUBLISH_DIR", td.path())
    .assert()
    .success()
    .stdout(predicate::str::is_empty());

  let published = std::fs::read_to_string(td.path().join("Committers H1.md")).unwrap();
  assert_eq!(published, read_fixture_text("expected/two_months.md"));
}

#[test]
fn malformed_fixture_fails_without_publishing() {
  let td = test_support::tempdir();

  space_cmd()
    .args(committers_args("Committers"))
    .env("SPACE_TOKEN", "t")
    .env("SPACE_TEST_COMMITS_JSON", "[not json")
    .env("SPACE_TEST_PUBLISH_DIR", td.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("SPACE_TEST_COMMITS_JSON"));

  assert_eq!(std::fs::read_dir(td.path()).unwrap().count(), 0);
}

#[test]
fn empty_repository_publishes_header_only() {
  let td = test_support::tempdir();

  space_cmd()
    .args(committers_args("Empty"))
    .args(["--months", "1"])
    .env("SPACE_TOKEN", "t")
    .env("SPACE_TEST_COMMITS_JSON", "{}")
    .env("SPACE_TEST_PUBLISH_DIR", td.path())
    .assert()
    .success();

  let published = std::fs::read_to_string(td.path().join("Empty.md")).unwrap();
  assert_eq!(published, "| Member | Jan |\n| ------ | ------ |\n");
}
