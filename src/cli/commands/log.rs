use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::errors::AppResult;
use crate::ui::messages::warning;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print } = cmd {
        if *print {
            let mut store = open_store(cfg)?;
            LogLogic::print_log(store.pool())?;
        } else {
            warning("Nothing to do: use --print");
        }
    }
    Ok(())
}
