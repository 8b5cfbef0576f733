// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Owned per-contributor, per-month commit counts accumulated across a report run
// role: aggregation/store
// inputs: (ContributorKey, Period, count) triples from the period driver
// outputs: Per-key totals and counts; entries ordered by descending total
// invariants:
// - each (key, period) pair is recorded at most once; a repeat is rejected and changes nothing
// - zero counts are never stored; an absent period reads as 0
// - ties in total keep insertion order
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::{BTreeMap, HashMap};

use crate::error::ReportError;
use crate::model::ContributorKey;
use crate::period::Period;

#[derive(Debug, Clone)]
pub struct AggregateEntry {
  key: ContributorKey,
  counts: BTreeMap<Period, usize>,
}

impl AggregateEntry {
  pub fn key(&self) -> &ContributorKey {
    &self.key
  }

  pub fn count_for(&self, period: &Period) -> usize {
    self.counts.get(period).copied().unwrap_or(0)
  }

  pub fn total(&self) -> usize {
    self.counts.values().sum()
  }
}

#[derive(Debug, Default)]
pub struct AggregateStore {
  entries: Vec<AggregateEntry>,
  index: HashMap<ContributorKey, usize>,
}

impl AggregateStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Record `count` commits by `key` in `period`.
  ///
  /// Errors with [`ReportError::DuplicatePeriod`] if the pair was already recorded; the
  /// existing count is left untouched.
  pub fn record_period(&mut self, key: ContributorKey, period: Period, count: usize) -> Result<(), ReportError> {
    if let Some(&idx) = self.index.get(&key) {
      let entry = &mut self.entries[idx];
      if entry.counts.contains_key(&period) {
        return Err(ReportError::DuplicatePeriod {
          contributor: key.to_string(),
          period: period.to_string(),
        });
      }
      if count > 0 {
        entry.counts.insert(period, count);
      }
      return Ok(());
    }

    if count == 0 {
      return Ok(());
    }

    self.index.insert(key.clone(), self.entries.len());
    self.entries.push(AggregateEntry {
      key,
      counts: BTreeMap::from([(period, count)]),
    });
    Ok(())
  }

  pub fn total_for(&self, key: &ContributorKey) -> usize {
    self.entry(key).map(AggregateEntry::total).unwrap_or(0)
  }

  pub fn count_for(&self, key: &ContributorKey, period: &Period) -> usize {
    self.entry(key).map(|e| e.count_for(period)).unwrap_or(0)
  }

  /// All entries, highest total first; equal totals stay in insertion order.
  pub fn entries_by_total_desc(&self) -> Vec<&AggregateEntry> {
    let mut out: Vec<&AggregateEntry> = self.entries.iter().collect();
    // sort_by_key is stable
    out.sort_by_key(|e| std::cmp::Reverse(e.total()));
    out
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  fn entry(&self, key: &ContributorKey) -> Option<&AggregateEntry> {
    self.index.get(key).map(|&idx| &self.entries[idx])
  }
}
