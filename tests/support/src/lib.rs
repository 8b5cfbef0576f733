//! test-support: helpers for robust, nextest-friendly tests.
//!
//! Add as a dev-dependency in your top-level `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test_support = { path = "tests/support", features = ["serde"] }
//! ```
//!
//! Then in tests:
//! ```rust
//! use test_support::{init_tracing, read_fixture_text, space_cmd};
//!
//! #[test]
//! fn example() {
//!     init_tracing();
//!     let commits = read_fixture_text("commits_two_months.json");
//!     let mut cmd = space_cmd();
//!     cmd.env("SPACE_TEST_COMMITS_JSON", commits);
//! }
//! ```

use once_cell::sync::Lazy;
use tracing_subscriber::{fmt, EnvFilter};

use std::path::{Path, PathBuf};

pub const BIN: &str = "space-git-report";

/// Environment the binary reads; scrubbed from every spawned command.
pub const SPACE_ENV_VARS: [&str; 5] = [
    "SPACE_TOKEN",
    "JB_SPACE_CLIENT_TOKEN",
    "SPACE_TEST_COMMITS_JSON",
    "SPACE_TEST_PUBLISH_DIR",
    "RUST_LOG",
];

/// Initialize `tracing` once, honoring `RUST_LOG` and writing via the test writer.
///
/// Safe to call from multiple tests; only the first call configures the global subscriber.
pub fn init_tracing() {
    static INIT: Lazy<()> = Lazy::new(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("warn,test=info"))
            .unwrap();
        // with_test_writer() causes logs to appear alongside failing tests only (cargo/nextest)
        let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
    });
    Lazy::force(&INIT);
}

/// Return the path to the repository's `tests/fixtures` directory.
///
/// `CARGO_MANIFEST_DIR` here is `tests/support`, so go one level up.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests/support has a parent")
        .join("fixtures")
}

/// Read a UTF-8 text fixture into a string.
pub fn read_fixture_text<P: AsRef<Path>>(rel_path: P) -> String {
    let path = fixtures_dir().join(rel_path);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
}

/// Deserialize a JSON fixture into `T` (enable `serde` feature).
#[cfg(feature = "serde")]
pub fn read_fixture_json<T, P>(rel_path: P) -> T
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = fixtures_dir().join(rel_path);
    let file = std::fs::File::open(&path)
        .unwrap_or_else(|e| panic!("failed to open fixture {}: {e}", path.display()));
    serde_json::from_reader::<_, T>(file)
        .unwrap_or_else(|e| panic!("failed to parse JSON fixture {}: {e}", path.display()))
}

/// `count` minimal unresolved commits by one author, shaped like the commit listing's `data`.
///
/// Kept small on purpose: the whole fixture travels through one environment variable.
#[cfg(feature = "serde")]
pub fn synthetic_commits(name: &str, email: &str, count: usize) -> Vec<serde_json::Value> {
    (0..count)
        .map(|_| serde_json::json!({ "author": { "name": name, "email": email } }))
        .collect()
}

/// Create a temp directory that deletes on drop.
pub fn tempdir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create tempdir")
}

/// Run a binary target with `assert_cmd`, returning the ready-to-run `Command`.
pub fn cmd_bin(bin: &str) -> assert_cmd::Command {
    init_tracing();
    assert_cmd::Command::cargo_bin(bin).expect("binary target not found")
}

/// The report binary with a clean Space environment, so the developer's own token never leaks in.
pub fn space_cmd() -> assert_cmd::Command {
    let mut cmd = cmd_bin(BIN);
    for name in SPACE_ENV_VARS {
        cmd.env_remove(name);
    }
    cmd
}

/// Positional arguments for a committers run against the fixture repository.
pub fn committers_args(document: &str) -> Vec<String> {
    [
        "committers",
        "https://acme.jetbrains.space/",
        "ABC",
        "backend",
        document,
        "f1",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
