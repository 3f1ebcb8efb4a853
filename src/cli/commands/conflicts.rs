use crate::cli::commands::{load_view, month_arg, open_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::view::ScheduleSettings;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::Table;
use crate::utils::date::weekday_abbrev;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Conflicts { month } = cmd else {
        return Ok(());
    };

    let month = month_arg(month)?;
    let mut store = open_store(cfg)?;
    let view = load_view(&mut store, month)?;

    let settings = ScheduleSettings::from(cfg);
    let conflicts = view.conflicts(&settings);

    if conflicts.total() == 0 {
        success(format!(
            "Every slot of {} is covered by role '{}'.",
            month.format("%Y-%m"),
            settings.covering_role
        ));
        return Ok(());
    }

    let mut table = Table::new(["Date", "Day", "Slot"]);
    for (date, slot) in conflicts.iter() {
        table.add_row(vec![
            date.format("%Y-%m-%d").to_string(),
            weekday_abbrev(date).to_string(),
            slot.to_string(),
        ]);
    }
    print!("{}", table.render());

    warning(format!(
        "{} uncovered slot(s) for role '{}' in {}",
        conflicts.total(),
        settings.covering_role,
        month.format("%Y-%m")
    ));
    Ok(())
}
