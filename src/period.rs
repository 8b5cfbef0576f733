// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Calendar-month reporting periods and the fixed window of months a report covers
// role: time/windowing
// inputs: anchor month (YYYY-MM or a date) and window length
// outputs: Ordered Period list; Space query date ranges; short month headers
// invariants:
// - periods are consecutive calendar months starting at the anchor's first day
// - last_day is the day before the next month's first day (calendar arithmetic, never 30-day steps)
// - query dates use the d-MMM-yyyy pattern (1-Jan-2023)
// errors: InvalidConfig for malformed anchors or out-of-range window lengths
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{Datelike, Months, NaiveDate};
use std::fmt;

use crate::error::ReportError;

pub const DEFAULT_START: &str = "2023-01";
pub const DEFAULT_MONTHS: u32 = 6;
pub const MAX_MONTHS: u32 = 120;

/// One calendar month, ordered by its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
  first_day: NaiveDate,
  last_day: NaiveDate,
}

impl Period {
  /// Month starting at `first_day`; `None` unless it is the 1st of a month.
  pub fn starting(first_day: NaiveDate) -> Option<Period> {
    if first_day.day() != 1 {
      return None;
    }
    let last_day = first_day.checked_add_months(Months::new(1))?.pred_opt()?;
    Some(Period { first_day, last_day })
  }

  pub fn first_day(&self) -> NaiveDate {
    self.first_day
  }

  pub fn last_day(&self) -> NaiveDate {
    self.last_day
  }

  /// Column header, e.g. `Jan`.
  pub fn short_name(&self) -> String {
    self.first_day.format("%b").to_string()
  }

  /// `from..to` as understood by the commit search, e.g. `1-Feb-2023..28-Feb-2023`.
  pub fn query_range(&self) -> String {
    format!(
      "{}..{}",
      format_query_date(self.first_day),
      format_query_date(self.last_day)
    )
  }
}

impl fmt::Display for Period {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.first_day.format("%Y-%m"))
  }
}

pub fn format_query_date(date: NaiveDate) -> String {
  date.format("%-d-%b-%Y").to_string()
}

/// Parse `YYYY-MM` into the first day of that month.
pub fn parse_start_month(year_month: &str) -> Result<NaiveDate, ReportError> {
  let invalid = || ReportError::InvalidConfig(format!("invalid --start '{}', expected YYYY-MM", year_month));

  let (y, m) = year_month.trim().split_once('-').ok_or_else(invalid)?;
  let y: i32 = y.parse().map_err(|_| invalid())?;
  let m: u32 = m.parse().map_err(|_| invalid())?;

  if !(1..=12).contains(&m) {
    return Err(invalid());
  }

  NaiveDate::from_ymd_opt(y, m, 1).ok_or_else(invalid)
}

/// The consecutive months one report covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportWindow {
  periods: Vec<Period>,
}

impl ReportWindow {
  /// `months` periods starting at the month containing `anchor`.
  pub fn new(anchor: NaiveDate, months: u32) -> Result<Self, ReportError> {
    if months == 0 || months > MAX_MONTHS {
      return Err(ReportError::InvalidConfig(format!(
        "--months must be between 1 and {}, got {}",
        MAX_MONTHS, months
      )));
    }

    let out_of_range = || ReportError::InvalidConfig(format!("window starting {} is out of range", anchor));
    let first = anchor.with_day(1).ok_or_else(out_of_range)?;

    let mut periods = Vec::with_capacity(months as usize);
    for offset in 0..months {
      let first_day = first
        .checked_add_months(Months::new(offset))
        .ok_or_else(out_of_range)?;
      periods.push(Period::starting(first_day).ok_or_else(out_of_range)?);
    }

    Ok(Self { periods })
  }

  pub fn periods(&self) -> &[Period] {
    &self.periods
  }

  pub fn month_count(&self) -> usize {
    self.periods.len()
  }
}
