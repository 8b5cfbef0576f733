#[test]
fn cli_generates_man_page() {
  let out = test_support::space_cmd().args(["--gen-man"]).output().unwrap();
  assert!(out.status.success());
  let s = String::from_utf8_lossy(&out.stdout);
  // clap_mangen emits a roff manpage starting with .TH and mentions the binary name
  assert!(s.contains(".TH") || s.contains(".Nm"));
  assert!(s.contains("space-git-report"));
}

#[test]
fn gen_man_needs_no_token() {
  test_support::space_cmd().args(["--gen-man"]).assert().success();
}
