// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Small helpers: URL normalization, query-value encoding, man page rendering
// role: utilities/helpers
// inputs: Strings; clap CommandFactory
// outputs: Normalized base URLs, encoded query values, man page text
// side_effects: None
// invariants:
// - normalized base URLs are http(s) and carry no trailing slash
// - encode_query_value follows application/x-www-form-urlencoded (space becomes '+')
// errors: normalize_base_url rejects non-http(s) input
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use clap::CommandFactory;

use crate::error::ReportError;

/// Trim whitespace and trailing slashes; require an http(s) scheme.
pub fn normalize_base_url(raw: &str) -> Result<String, ReportError> {
  let trimmed = raw.trim().trim_end_matches('/');

  let has_scheme = trimmed.starts_with("https://") || trimmed.starts_with("http://");
  let has_host = trimmed.split_once("://").is_some_and(|(_, rest)| !rest.is_empty());

  if !has_scheme || !has_host {
    return Err(ReportError::InvalidConfig(format!(
      "Space URL must look like https://<org>.jetbrains.space, got '{}'",
      raw
    )));
  }

  Ok(trimmed.to_string())
}

pub fn encode_query_value(value: &str) -> String {
  url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
/// Returns the troff content as a UTF-8 string.
pub fn render_man_page<T: CommandFactory>() -> anyhow::Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
