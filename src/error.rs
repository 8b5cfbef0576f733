// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Typed failures for configuration, transport and aggregation
// role: errors/taxonomy
// outputs: ReportError returned by the API client, paginator, store and driver
// invariants: Every variant is fatal for the run; nothing here is retried or swallowed
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
  /// Neither SPACE_TOKEN nor JB_SPACE_CLIENT_TOKEN holds a non-empty value.
  #[error("No Space token, set SPACE_TOKEN (or JB_SPACE_CLIENT_TOKEN)")]
  MissingToken,

  #[error("invalid configuration: {0}")]
  InvalidConfig(String),

  /// The request never produced an HTTP response (DNS, connect, TLS, IO).
  #[error("request to {url} failed: {reason}")]
  Transport { url: String, reason: String },

  #[error("request to {url} returned HTTP {code}: {body}")]
  Status { url: String, code: u16, body: String },

  #[error("unexpected response from {url}: {reason}")]
  Decode { url: String, reason: String },

  #[error("commits for {contributor} in {period} were already recorded")]
  DuplicatePeriod { contributor: String, period: String },
}

impl ReportError {
  pub fn from_ureq(url: &str, err: ureq::Error) -> Self {
    match err {
      ureq::Error::Status(code, resp) => ReportError::Status {
        url: url.to_string(),
        code,
        body: resp.into_string().unwrap_or_default(),
      },
      ureq::Error::Transport(t) => ReportError::Transport {
        url: url.to_string(),
        reason: t.to_string(),
      },
    }
  }
}
