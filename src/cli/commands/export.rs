use crate::cli::commands::{load_view, month_arg, open_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::view::ScheduleSettings;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        month,
        force,
    } = cmd
    {
        let month = month_arg(month)?;
        let mut store = open_store(cfg)?;
        let view = load_view(&mut store, month)?;

        let grid = view.grid(&ScheduleSettings::from(cfg), &cfg.capability_set());
        ExportLogic::export(&grid, *format, file, *force)?;
    }
    Ok(())
}
