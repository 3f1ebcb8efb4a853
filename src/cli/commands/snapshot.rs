use crate::cli::commands::{open_store, require};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::db::snapshots::{list_snapshots, restore_snapshot, save_snapshot};
use crate::errors::AppResult;
use crate::models::Capability;
use crate::ui::messages::{success, warning};
use crate::utils::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Snapshot {
        save,
        list,
        restore,
    } = cmd
    else {
        return Ok(());
    };

    let mut store = open_store(cfg)?;
    let pool = store.pool();

    if let Some(desc) = save {
        let id = save_snapshot(pool, desc)?;
        ttlog_quiet(&pool.conn, "snapshot_save", &id.to_string(), desc);
        success(format!("Snapshot {} saved.", id));
    }

    if *list {
        let snaps = list_snapshots(pool)?;
        if snaps.is_empty() {
            warning("No snapshots saved yet.");
        } else {
            let mut table = Table::new(["ID", "Created", "Shifts", "Description"]);
            for s in &snaps {
                table.add_row(vec![
                    s.id.to_string(),
                    s.created_at.clone(),
                    s.shift_count.to_string(),
                    s.description.clone(),
                ]);
            }
            print!("{}", table.render());
        }
    }

    if let Some(id) = restore {
        require(cfg, Capability::SchedulingEdit)?;
        let n = restore_snapshot(pool, *id)?;
        ttlog_quiet(
            &pool.conn,
            "snapshot_restore",
            &id.to_string(),
            &format!("Restored {} shift(s)", n),
        );
        success(format!("Snapshot {} restored ({} shifts).", id, n));
    }

    if save.is_none() && !*list && restore.is_none() {
        warning("Nothing to do: use --save, --list or --restore");
    }

    Ok(())
}
