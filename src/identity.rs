// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Collapse one period's commits into per-contributor counts
// role: aggregation/identity
// inputs: The full commit list of one period, in fetch order
// outputs: PeriodGroup list (contributor key + commit count), most prolific first
// invariants:
// - commits are grouped by author display name; the group's key comes from its representative
// - the representative is the first commit of the group in fetch order (see `representative`)
// - groups resolving to the same key are merged, so each key appears at most once per period
// - the sum of group counts equals the number of input commits
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::HashMap;

use crate::model::{CommitRecord, ContributorKey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodGroup {
  pub key: ContributorKey,
  pub count: usize,
}

/// The commit whose identity speaks for a same-name group.
///
/// First in fetch order wins, even when a later commit of the group has a resolved profile
/// and this one does not. The fetch order is whatever the service returned.
pub fn representative<'a>(group: &[&'a CommitRecord]) -> Option<&'a CommitRecord> {
  group.first().copied()
}

/// Group a period's commits and attribute each group to one contributor.
pub fn group_period(commits: &[CommitRecord]) -> Vec<PeriodGroup> {
  let mut by_name: Vec<Vec<&CommitRecord>> = Vec::new();
  let mut name_index: HashMap<&str, usize> = HashMap::new();

  for commit in commits {
    let idx = *name_index.entry(commit.author.name.as_str()).or_insert_with(|| {
      by_name.push(Vec::new());
      by_name.len() - 1
    });
    by_name[idx].push(commit);
  }

  // Most prolific name first; ties keep first-appearance order.
  by_name.sort_by(|a, b| b.len().cmp(&a.len()));

  let mut out: Vec<PeriodGroup> = Vec::with_capacity(by_name.len());
  let mut key_index: HashMap<ContributorKey, usize> = HashMap::new();

  for members in &by_name {
    let Some(rep) = representative(members) else { continue };
    let key = ContributorKey::of(rep);
    let count = members.len();

    match key_index.get(&key) {
      Some(&idx) => out[idx].count += count,
      None => {
        key_index.insert(key.clone(), out.len());
        out.push(PeriodGroup { key, count });
      }
    }
  }

  out
}

/// Commits Space could match to a member profile; everything else is dropped.
pub fn resolved_only(commits: Vec<CommitRecord>) -> Vec<CommitRecord> {
  commits.into_iter().filter(CommitRecord::is_resolved).collect()
}
