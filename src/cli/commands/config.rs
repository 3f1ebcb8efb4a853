use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::config::ConfigLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            println!("📄 Current configuration:\n");
            ConfigLogic::print(&path, cfg)?;

            let roles: Vec<String> = cfg.role_order.iter().map(|r| r.to_string()).collect();
            info(format!(
                "Role order: {} | covering role: {} | capabilities: {}",
                roles.join(" > "),
                cfg.covering_role,
                if cfg.capabilities.is_empty() {
                    "none".to_string()
                } else {
                    cfg.capabilities.join(", ")
                }
            ));
        }

        if *edit_config {
            ConfigLogic::edit(&path, editor)?;
            success(format!("Configuration file {} updated", path.display()));
        }

        if !*print_config && !*edit_config {
            warning("Nothing to do: use --print or --edit");
        }
    }

    Ok(())
}
