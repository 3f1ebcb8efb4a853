pub mod bulk;
pub mod config;
pub mod conflicts;
pub mod employee;
pub mod export;
pub mod grid;
pub mod init;
pub mod log;
pub mod shift;
pub mod snapshot;

use crate::config::Config;
use crate::core::view::{LoadStatus, ScheduleView};
use crate::db::pool::DbPool;
use crate::db::repo::SqliteStore;
use crate::errors::{AppError, AppResult, RepositoryError};
use crate::models::Capability;
use crate::utils::date::{current_month, parse_month};
use chrono::NaiveDate;

pub(crate) fn open_store(cfg: &Config) -> AppResult<SqliteStore> {
    Ok(SqliteStore::new(DbPool::open(&cfg.database)?))
}

/// Fail with `PermissionDenied` unless the configured capabilities
/// include `cap`.
pub(crate) fn require(cfg: &Config, cap: Capability) -> AppResult<()> {
    if cfg.capability_set().has(cap) {
        Ok(())
    } else {
        Err(AppError::PermissionDenied(format!(
            "this command requires the '{}' capability",
            cap.as_str()
        )))
    }
}

/// `--month YYYY-MM`, defaulting to the current month.
pub(crate) fn month_arg(month: &Option<String>) -> AppResult<NaiveDate> {
    match month {
        Some(m) => parse_month(m).ok_or_else(|| AppError::InvalidMonth(m.clone())),
        None => Ok(current_month()),
    }
}

/// Load roster and shifts of `month` into a fresh view.
pub(crate) fn load_view(store: &mut SqliteStore, month: NaiveDate) -> AppResult<ScheduleView> {
    let mut view = ScheduleView::new(month);
    match view.load(month, store) {
        LoadStatus::Applied => Ok(view),
        LoadStatus::Failed(e) => Err(RepositoryError::new(e.message()).into()),
        LoadStatus::Stale => Err(AppError::Other("schedule load was superseded".into())),
    }
}
