use crate::cli::commands::{load_view, month_arg, open_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::view::ScheduleSettings;
use crate::errors::AppResult;
use crate::ui::messages::{header, warning};
use crate::ui::render_grid;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Grid { month } = cmd else {
        return Ok(());
    };

    let month = month_arg(month)?;
    let mut store = open_store(cfg)?;
    let view = load_view(&mut store, month)?;

    header(format!("Schedule {}", month.format("%B %Y")));

    if view.employees().is_empty() {
        warning("No employees on the schedule. Add one with `employee add`.");
        return Ok(());
    }

    let settings = ScheduleSettings::from(cfg);
    let grid = view.grid(&settings, &cfg.capability_set());
    let separator = cfg.separator_char.chars().next().unwrap_or('-');

    println!("{}", render_grid(&grid, separator));

    if view.lookup().dropped() > 0 {
        warning(format!(
            "{} shift(s) without employee or start time are not shown",
            view.lookup().dropped()
        ));
    }

    Ok(())
}
