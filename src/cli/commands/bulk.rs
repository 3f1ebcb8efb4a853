use crate::cli::commands::{load_view, open_store, require};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::bulk::{BulkOutcome, BulkTarget, SharedFields};
use crate::db::log::ttlog_quiet;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::{Capability, ShiftTemplate};
use crate::ui::messages::{error, success, warning};
use crate::utils::date::{first_of_month, parse_date_list, today};
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Bulk {
        employee,
        template,
        dates,
        notes,
        text,
    } = cmd
    else {
        return Ok(());
    };

    require(cfg, Capability::SchedulingEdit)?;

    let template =
        ShiftTemplate::from_code(template).ok_or_else(|| AppError::InvalidTemplate(template.clone()))?;
    let dates = parse_date_list(dates).map_err(AppError::InvalidDate)?;

    let mut store = open_store(cfg)?;
    if !queries::employee_exists(&store.pool().conn, *employee)? {
        return Err(AppError::EmployeeNotFound(*employee));
    }

    let shared = SharedFields {
        notes: notes.clone(),
        cell_text: text.clone(),
    };
    let caps = cfg.capability_set();

    // one view per month so existing shifts are updated, not duplicated
    let mut by_month: BTreeMap<NaiveDate, Vec<BulkTarget>> = BTreeMap::new();
    for d in &dates {
        by_month
            .entry(first_of_month(*d))
            .or_default()
            .push(BulkTarget::for_selected(*d));
    }
    if by_month.is_empty() {
        // surfaces the empty-selection validation error
        by_month.insert(first_of_month(today()), Vec::new());
    }

    let mut total = BulkOutcome::default();
    for (month, targets) in &by_month {
        let mut view = load_view(&mut store, *month)?;
        let outcome = view.apply_bulk(
            &mut store,
            &caps,
            template,
            targets,
            Some(*employee),
            &shared,
        )?;

        total.succeeded += outcome.succeeded;
        total.failed += outcome.failed;
        total.errors.extend(outcome.errors);
        total.written.extend(outcome.written);
        if let Some(e) = outcome.refresh_error {
            warning(format!(
                "Schedule for {} could not be reloaded: {}",
                month.format("%Y-%m"),
                e
            ));
            total.refresh_error = Some(e);
        }
    }

    let summary = format!(
        "{} template for employee {}: {} succeeded, {} failed",
        template.as_str(),
        employee,
        total.succeeded,
        total.failed
    );
    ttlog_quiet(&store.pool().conn, "bulk", &employee.to_string(), &summary);

    if total.is_complete_success() {
        success(format!("Bulk apply done. {}", summary));
        return Ok(());
    }

    for e in &total.errors {
        error(format!("{} (employee {}): {}", e.date, e.employee_id, e.message));
    }

    if total.should_close_editor() {
        warning(format!("Bulk apply partially failed. {}", summary));
        Ok(())
    } else {
        Err(AppError::Other(format!("bulk apply failed. {}", summary)))
    }
}
