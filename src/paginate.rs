use tracing::{debug, warn};

use crate::error::ReportError;
use crate::model::{CommitRecord, RepoTarget};
use crate::period::Period;
use crate::space::api::{BatchInfo, SpaceApi};

/// Page size for commit listings; a shorter page ends the listing.
pub const PAGE_SIZE: usize = 1000;

pub fn commit_query(period: &Period) -> String {
  format!("date:{} no-merges:true", period.query_range())
}

/// Every non-merge commit in `period`, in the order the service returned them.
pub fn fetch_period_commits(
  api: &dyn SpaceApi,
  target: &RepoTarget,
  period: &Period,
) -> Result<Vec<CommitRecord>, ReportError> {
  fetch_all(api, target, &commit_query(period), PAGE_SIZE)
}

pub(crate) fn fetch_all(
  api: &dyn SpaceApi,
  target: &RepoTarget,
  query: &str,
  page_size: usize,
) -> Result<Vec<CommitRecord>, ReportError> {
  let mut batch = BatchInfo {
    next: None,
    batch_size: page_size,
  };
  let mut all = Vec::new();
  let mut pages = 0usize;

  loop {
    let page = api.list_commits(target, query, &batch)?;
    pages += 1;
    let received = page.data.len();
    debug!(page = pages, received, total = all.len() + received, "fetched commit page");

    all.extend(page.data);

    if received < page_size {
      break;
    }

    match page.next {
      Some(next) => batch.next = Some(next),
      None => {
        warn!(query, "full page without a cursor; stopping pagination");
        break;
      }
    }
  }

  Ok(all)
}
