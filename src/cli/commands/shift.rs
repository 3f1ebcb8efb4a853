use crate::cli::commands::{open_store, require};
use crate::cli::parser::{Commands, ShiftCommand};
use crate::config::Config;
use crate::core::editor::{EditForm, ShiftEditor};
use crate::db::log::ttlog_quiet;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::export::ask_confirmation;
use crate::models::{Capability, Shift, ShiftTemplate, ShiftTiming};
use crate::ui::messages::{info, success};
use crate::utils::date::parse_date;
use crate::utils::time::{format_datetime, parse_optional_time, shift_window};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Shift { action } = cmd else {
        return Ok(());
    };

    require(cfg, Capability::SchedulingEdit)?;
    let mut store = open_store(cfg)?;

    match action {
        ShiftCommand::Add {
            employee,
            date,
            start,
            end,
            next_day,
            template,
            notes,
            text,
        } => {
            let day = parse_date(date).ok_or_else(|| AppError::InvalidDate(date.clone()))?;

            if !queries::employee_exists(&store.pool().conn, *employee)? {
                return Err(AppError::EmployeeNotFound(*employee));
            }

            let mut editor = ShiftEditor::new(Some(*employee), day);
            editor.open(None);

            if let Some(code) = template {
                let t = ShiftTemplate::from_code(code)
                    .ok_or_else(|| AppError::InvalidTemplate(code.clone()))?;
                editor.apply_template(t);
            }

            if let Some(form) = editor.form_mut() {
                apply_times(form, start, end, *next_day)?;
                form.notes = notes.clone();
                form.cell_text = text.clone();
            }

            let shift = editor.submit(&mut store)?;
            let msg = describe(&shift, cfg);

            ttlog_quiet(&store.pool().conn, "shift_add", &shift.id.to_string(), &msg);
            success(format!("Shift {} added: {}", shift.id, msg));
        }

        ShiftCommand::Edit {
            id,
            start,
            end,
            next_day,
            notes,
            text,
        } => {
            let existing = queries::load_shift(&store.pool().conn, *id)?
                .ok_or(AppError::ShiftNotFound(*id))?;

            if matches!(existing.timing, ShiftTiming::FreeForm) {
                return Err(AppError::Other(format!(
                    "shift {} has no start/end time and cannot be edited; delete it and add a new one",
                    id
                )));
            }

            let mut editor = ShiftEditor::for_shift(&existing);
            if let Some(form) = editor.form_mut() {
                apply_times(form, start, end, *next_day)?;
                if notes.is_some() {
                    form.notes = notes.clone();
                }
                if text.is_some() {
                    form.cell_text = text.clone();
                }
            }

            let shift = editor.submit(&mut store)?;
            let msg = describe(&shift, cfg);

            ttlog_quiet(&store.pool().conn, "shift_edit", &shift.id.to_string(), &msg);
            success(format!("Shift {} updated: {}", shift.id, msg));
        }

        ShiftCommand::Del { id, force } => {
            let existing = queries::load_shift(&store.pool().conn, *id)?
                .ok_or(AppError::ShiftNotFound(*id))?;

            if !*force && !ask_confirmation(&format!("Delete shift {}?", id))? {
                info("Deletion cancelled.");
                return Ok(());
            }

            let mut editor = ShiftEditor::for_shift(&existing);
            editor.delete(&mut store)?;

            ttlog_quiet(
                &store.pool().conn,
                "shift_del",
                &id.to_string(),
                &format!("Deleted shift of employee {:?}", existing.employee_id),
            );
            success(format!("Shift {} deleted.", id));
        }
    }

    Ok(())
}

/// Overlay `--start/--end/--next-day` on the form. Times left out keep the
/// form's current value; `--next-day` moves the end to the following day.
fn apply_times(
    form: &mut EditForm,
    start: &Option<String>,
    end: &Option<String>,
    next_day: bool,
) -> AppResult<()> {
    if start.is_none() && end.is_none() && !next_day {
        return Ok(());
    }

    let date = form.start.date();
    let start_t = parse_optional_time(start.as_ref())?.unwrap_or(form.start.time());
    let end_t = parse_optional_time(end.as_ref())?.unwrap_or(form.end.time());
    let rolls = next_day || (end.is_none() && form.end.date() > date);

    let (s, e) = shift_window(date, start_t, end_t, rolls);
    form.start = s;
    form.end = e;
    Ok(())
}

fn describe(shift: &Shift, cfg: &Config) -> String {
    let label = cfg.classifier().classify(Some(shift));
    let window = match (shift.start(), shift.end()) {
        (Some(s), Some(e)) => format!("{} → {}", format_datetime(&s), format_datetime(&e)),
        _ => "no times".to_string(),
    };

    format!(
        "employee {} {} [{}]",
        shift
            .employee_id
            .map_or_else(|| "-".to_string(), |id| id.to_string()),
        window,
        label
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn form() -> EditForm {
        let (start, end) = ShiftTemplate::Morning.window(NaiveDate::from_ymd_opt(2025, 5, 2).unwrap());
        EditForm {
            shift_id: None,
            employee_id: Some(1),
            start,
            end,
            notes: None,
            cell_text: None,
            error: None,
        }
    }

    #[test]
    fn next_day_moves_end_forward() {
        let mut f = form();
        apply_times(&mut f, &Some("23:00".into()), &Some("07:00".into()), true).unwrap();
        assert_eq!(format_datetime(&f.start), "2025-05-02 23:00");
        assert_eq!(format_datetime(&f.end), "2025-05-03 07:00");
    }

    #[test]
    fn only_start_keeps_end() {
        let mut f = form();
        apply_times(&mut f, &Some("08:30".into()), &None, false).unwrap();
        assert_eq!(format_datetime(&f.start), "2025-05-02 08:30");
        assert_eq!(format_datetime(&f.end), "2025-05-02 15:00");
    }

    #[test]
    fn bad_time_is_rejected() {
        let mut f = form();
        assert!(apply_times(&mut f, &Some("25:99".into()), &None, false).is_err());
    }
}
