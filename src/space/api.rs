// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: JetBrains Space HTTP API access: batched commit search, document creation, token discovery
// role: integration/space-api
// inputs: RepoTarget; env SPACE_TOKEN / JB_SPACE_CLIENT_TOKEN; env SPACE_TEST_COMMITS_JSON / SPACE_TEST_PUBLISH_DIR for fixtures
// outputs: CommitBatch pages of CommitRecord; created documents
// side_effects: Network calls to the Space instance; the fixture backend writes published documents to disk
// invariants:
// - Token discovery takes the first non-empty of SPACE_TOKEN, JB_SPACE_CLIENT_TOKEN
// - One request per call; no retries, no caching
// - The fixture backend is chosen whenever SPACE_TEST_COMMITS_JSON is set
// errors: Every failure is returned as ReportError; callers abort the run
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::PathBuf;

use serde_json::Value;
use tracing::{debug, info};

use crate::error::ReportError;
use crate::ext::serde_json::JsonFetch;
use crate::model::{CommitAuthor, CommitRecord, MemberProfile, RepoTarget};

pub const TOKEN_ENV_VARS: [&str; 2] = ["SPACE_TOKEN", "JB_SPACE_CLIENT_TOKEN"];
pub const TEST_COMMITS_ENV: &str = "SPACE_TEST_COMMITS_JSON";
pub const TEST_PUBLISH_DIR_ENV: &str = "SPACE_TEST_PUBLISH_DIR";

const COMMIT_FIELDS: &str = "next,data(id,author(name,email),authorProfile(id,username))";

/// Cursor and page size for one request of a batched listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchInfo {
  pub next: Option<String>,
  pub batch_size: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitBatch {
  pub data: Vec<CommitRecord>,
  pub next: Option<String>,
}

/// Destination of a published report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentTarget {
  pub folder_id: String,
  pub name: String,
}

// --- Trait seam for the Space API ---
pub trait SpaceApi {
  fn list_commits(&self, target: &RepoTarget, query: &str, batch: &BatchInfo) -> Result<CommitBatch, ReportError>;
  fn create_document(&self, target: &RepoTarget, document: &DocumentTarget, markdown: &str) -> Result<(), ReportError>;
}

/// Discover a Space token: first non-empty of `SPACE_TOKEN`, `JB_SPACE_CLIENT_TOKEN`.
pub fn get_space_token() -> Option<String> {
  TOKEN_ENV_VARS.iter().find_map(|name| {
    std::env::var(name)
      .ok()
      .map(|t| t.trim().to_string())
      .filter(|t| !t.is_empty())
  })
}

/// Map one element of a commit listing's `data` array.
pub fn commit_from_json(v: &Value) -> Option<CommitRecord> {
  let name = v.fetch("author.name").to::<String>()?;
  let email = v.fetch("author.email").to_or_default::<String>();
  let author_profile = v
    .fetch("authorProfile.username")
    .to::<String>()
    .map(|username| MemberProfile { username });

  Some(CommitRecord {
    id: v.fetch("id").to::<String>(),
    author: CommitAuthor { name, email },
    author_profile,
  })
}

/// Map a whole `{ next, data: [...] }` page.
pub fn batch_from_json(source: &str, v: &Value) -> Result<CommitBatch, ReportError> {
  let decode = |reason: &str| ReportError::Decode {
    url: source.to_string(),
    reason: reason.to_string(),
  };

  if v.fetch("data").value().and_then(Value::as_array).is_none() {
    return Err(decode("missing `data` array"));
  }

  let data = v
    .fetch("data")
    .items()
    .iter()
    .map(|item| commit_from_json(item).ok_or_else(|| decode("commit without author name")))
    .collect::<Result<Vec<_>, _>>()?;

  let next = v.fetch("next").to::<String>().filter(|n| !n.is_empty());

  Ok(CommitBatch { data, next })
}

fn project_url(target: &RepoTarget) -> String {
  format!("{}/api/http/projects/key:{}", target.base_url, target.project_key)
}

/// Query parameters of one commit-listing request. `$skip` is only sent once a cursor exists.
fn commit_query_params(query: &str, batch: &BatchInfo) -> Vec<(&'static str, String)> {
  let mut params = vec![
    ("query", query.to_string()),
    ("$top", batch.batch_size.to_string()),
    ("$fields", COMMIT_FIELDS.to_string()),
  ];
  if let Some(next) = &batch.next {
    params.push(("$skip", next.clone()));
  }
  params
}

/// JSON body for creating a Markdown document in a folder.
fn document_body(document: &DocumentTarget, markdown: &str) -> Value {
  serde_json::json!({
    "folder": format!("id:{}", document.folder_id),
    "name": document.name,
    "bodyIn": {
      "className": "TextDocumentBodyCreateTypedIn",
      "docContent": {
        "className": "MdTextDocumentContent",
        "markdown": markdown,
      },
    },
  })
}

struct SpaceHttpApi {
  agent: ureq::Agent,
  token: String,
}

impl SpaceHttpApi {
  fn new(token: String) -> Self {
    let agent = ureq::AgentBuilder::new().user_agent("space-git-report").build();
    Self { agent, token }
  }

  fn authorized(&self, req: ureq::Request) -> ureq::Request {
    req
      .set("Accept", "application/json")
      .set("Authorization", &format!("Bearer {}", self.token))
  }
}

impl SpaceApi for SpaceHttpApi {
  fn list_commits(&self, target: &RepoTarget, query: &str, batch: &BatchInfo) -> Result<CommitBatch, ReportError> {
    let url = format!("{}/repositories/{}/commits", project_url(target), target.repo_name);

    let req = commit_query_params(query, batch)
      .iter()
      .fold(self.authorized(self.agent.get(&url)), |req, (name, value)| req.query(name, value));

    debug!(%url, query, cursor = ?batch.next, "listing commits");

    let resp = req.call().map_err(|e| ReportError::from_ureq(&url, e))?;
    let body: Value = resp.into_json().map_err(|e| ReportError::Decode {
      url: url.clone(),
      reason: e.to_string(),
    })?;

    batch_from_json(&url, &body)
  }

  fn create_document(&self, target: &RepoTarget, document: &DocumentTarget, markdown: &str) -> Result<(), ReportError> {
    let url = format!("{}/documents", project_url(target));
    let body = document_body(document, markdown);

    debug!(%url, name = %document.name, "creating document");

    self
      .authorized(self.agent.post(&url))
      .send_json(body)
      .map_err(|e| ReportError::from_ureq(&url, e))?;

    Ok(())
  }
}

/// Fixture backend: serves commits from `SPACE_TEST_COMMITS_JSON` and "publishes" into
/// `SPACE_TEST_PUBLISH_DIR`.
///
/// The commits variable holds an object keyed by the query's date range
/// (`1-Jan-2023..31-Jan-2023`), each value an array of commit objects shaped like the API's.
/// Pages are sliced with the cursor as an offset, the way Space's `$skip` works.
struct SpaceEnvApi {
  commits: Value,
  publish_dir: Option<PathBuf>,
}

impl SpaceEnvApi {
  fn from_env() -> Result<Self, ReportError> {
    let raw = std::env::var(TEST_COMMITS_ENV).unwrap_or_default();
    let commits = serde_json::from_str::<Value>(&raw).map_err(|e| ReportError::Decode {
      url: format!("env:{}", TEST_COMMITS_ENV),
      reason: e.to_string(),
    })?;
    let publish_dir = std::env::var_os(TEST_PUBLISH_DIR_ENV).map(PathBuf::from);

    Ok(Self { commits, publish_dir })
  }
}

impl SpaceApi for SpaceEnvApi {
  fn list_commits(&self, _target: &RepoTarget, query: &str, batch: &BatchInfo) -> Result<CommitBatch, ReportError> {
    let source = format!("env:{}", TEST_COMMITS_ENV);
    let range = query
      .split_whitespace()
      .find_map(|t| t.strip_prefix("date:"))
      .unwrap_or_default();

    // Range keys contain dots, so no dotted-path lookup here.
    let all = self
      .commits
      .get(range)
      .and_then(Value::as_array)
      .map(Vec::as_slice)
      .unwrap_or(&[]);

    let skip = match batch.next.as_deref() {
      Some(cursor) => cursor.parse::<usize>().map_err(|_| ReportError::Decode {
        url: source.clone(),
        reason: format!("cursor '{}' is not an offset", cursor),
      })?,
      None => 0,
    };

    let page: Vec<Value> = all.iter().skip(skip).take(batch.batch_size).cloned().collect();
    let mut out = batch_from_json(&source, &serde_json::json!({ "data": page }))?;
    out.next = Some((skip + out.data.len()).to_string());

    Ok(out)
  }

  fn create_document(&self, _target: &RepoTarget, document: &DocumentTarget, markdown: &str) -> Result<(), ReportError> {
    let Some(dir) = &self.publish_dir else {
      info!(name = %document.name, "fixture backend: no publish dir, document dropped");
      return Ok(());
    };

    let path = dir.join(format!("{}.md", document.name));
    std::fs::write(&path, markdown).map_err(|e| ReportError::Transport {
      url: path.display().to_string(),
      reason: e.to_string(),
    })
  }
}

fn env_wants_mock() -> bool {
  std::env::var_os(TEST_COMMITS_ENV).is_some()
}

/// Pick the backend for this run: fixtures when requested, HTTP otherwise.
pub fn build_api(token: String) -> Result<Box<dyn SpaceApi>, ReportError> {
  if env_wants_mock() {
    debug!("using fixture Space backend from {}", TEST_COMMITS_ENV);
    return Ok(Box::new(SpaceEnvApi::from_env()?));
  }

  Ok(Box::new(SpaceHttpApi::new(token)))
}
