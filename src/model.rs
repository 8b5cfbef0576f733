// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Commit records as fetched from Space, contributor identities, and the repository coordinates of a report
// role: model/types
// outputs: CommitRecord, ContributorKey, RepoTarget
// invariants: CommitRecord is immutable once fetched; ContributorKey equality is the only grouping identity across periods
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitAuthor {
  pub name: String,
  pub email: String,
}

/// Member account Space matched to the raw git author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberProfile {
  pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
  pub id: Option<String>,
  pub author: CommitAuthor,
  pub author_profile: Option<MemberProfile>,
}

impl CommitRecord {
  pub fn is_resolved(&self) -> bool {
    self.author_profile.is_some()
  }
}

/// Canonical identity commits are grouped under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContributorKey {
  /// Backed by a Space member profile.
  Resolved { username: String },
  /// No profile: the raw `name<email>` pair is all we have.
  Unresolved { name: String, email: String },
}

impl ContributorKey {
  pub fn of(commit: &CommitRecord) -> Self {
    match &commit.author_profile {
      Some(profile) => ContributorKey::Resolved {
        username: profile.username.clone(),
      },
      None => ContributorKey::Unresolved {
        name: commit.author.name.clone(),
        email: commit.author.email.clone(),
      },
    }
  }

  /// Value for the `author:` filter of the commit search (never the email).
  pub fn author_filter(&self) -> &str {
    match self {
      ContributorKey::Resolved { username } => username,
      ContributorKey::Unresolved { name, .. } => name,
    }
  }

  /// Member column text: profile link when resolved, `name<email>` otherwise.
  pub fn member_label(&self, base_url: &str) -> String {
    match self {
      ContributorKey::Resolved { username } => format!("{}/m/{}", base_url, username),
      ContributorKey::Unresolved { .. } => self.to_string(),
    }
  }
}

impl fmt::Display for ContributorKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ContributorKey::Resolved { username } => write!(f, "{}", username),
      ContributorKey::Unresolved { name, email } => write!(f, "{}<{}>", name, email),
    }
  }
}

/// Where the commits live. `base_url` carries no trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoTarget {
  pub base_url: String,
  pub project_key: String,
  pub repo_name: String,
}
