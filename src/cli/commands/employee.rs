use crate::cli::commands::{open_store, require};
use crate::cli::parser::{Commands, EmployeeCommand};
use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::export::ask_confirmation;
use crate::models::{Capability, EmployeeChanges, Role};
use crate::ui::messages::{info, success, warning};
use crate::utils::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Employee { action } = cmd else {
        return Ok(());
    };

    match action {
        EmployeeCommand::Add {
            name,
            title,
            role,
            hidden,
        } => {
            require(cfg, Capability::EmployeeAdmin)?;

            let role = parse_role(role)?;

            if name.trim().is_empty() {
                return Err(AppError::Other("employee name cannot be empty".into()));
            }

            let mut store = open_store(cfg)?;
            let conn = &store.pool().conn;
            let emp = queries::add_employee(
                conn,
                name,
                title,
                role,
                &derivation_order(&cfg.role_order),
                !*hidden,
            )?;

            ttlog_quiet(
                conn,
                "employee_add",
                &emp.id.to_string(),
                &format!("Added {} ({}) as {}", emp.name, emp.job_title, emp.role),
            );

            success(format!(
                "Employee '{}' added with ID {} (role: {})",
                emp.name, emp.id, emp.role
            ));
        }

        EmployeeCommand::List { all } => {
            let mut store = open_store(cfg)?;
            let employees = queries::list_employees(&store.pool().conn, !*all)?;

            if employees.is_empty() {
                warning("No employees found.");
                return Ok(());
            }

            let mut table = Table::new(["ID", "Name", "Title", "Role", "Visible"]);
            for e in &employees {
                table.add_row(vec![
                    e.id.to_string(),
                    e.name.clone(),
                    e.job_title.clone(),
                    e.role.to_string(),
                    if e.show_on_schedule { "yes" } else { "no" }.to_string(),
                ]);
            }
            print!("{}", table.render());
        }

        EmployeeCommand::Edit {
            id,
            name,
            title,
            role,
            show,
            hide,
        } => {
            require(cfg, Capability::EmployeeAdmin)?;

            let changes = EmployeeChanges {
                name: name.clone(),
                job_title: title.clone(),
                role: parse_role(role)?,
                show_on_schedule: match (*show, *hide) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                },
            };
            if changes.is_empty() {
                warning("Nothing to do: use --name, --title, --role, --show or --hide");
                return Ok(());
            }

            let mut store = open_store(cfg)?;
            let conn = &store.pool().conn;
            let current =
                queries::load_employee(conn, *id)?.ok_or(AppError::EmployeeNotFound(*id))?;

            let updated = changes.apply(&current, &derivation_order(&cfg.role_order));
            queries::update_employee(conn, &updated)?;

            ttlog_quiet(
                conn,
                "employee_edit",
                &id.to_string(),
                &format!(
                    "{} ({}) as {}, visible: {}",
                    updated.name, updated.job_title, updated.role, updated.show_on_schedule
                ),
            );

            success(format!(
                "Employee {} updated: {} ({}) role: {}{}",
                id,
                updated.name,
                updated.job_title,
                updated.role,
                if updated.show_on_schedule { "" } else { ", hidden" }
            ));
        }

        EmployeeCommand::Del { id, force } => {
            require(cfg, Capability::EmployeeAdmin)?;

            let mut store = open_store(cfg)?;
            let conn = &store.pool().conn;
            let current =
                queries::load_employee(conn, *id)?.ok_or(AppError::EmployeeNotFound(*id))?;

            if !*force
                && !ask_confirmation(&format!(
                    "Delete employee {} ({}) and all of their shifts?",
                    id, current.name
                ))?
            {
                info("Deletion cancelled.");
                return Ok(());
            }

            let shifts =
                queries::delete_employee(conn, *id)?.ok_or(AppError::EmployeeNotFound(*id))?;

            ttlog_quiet(
                conn,
                "employee_del",
                &id.to_string(),
                &format!("Deleted {} with {} shift(s)", current.name, shifts),
            );
            success(format!(
                "Employee {} deleted ({} shift(s) removed).",
                id, shifts
            ));
        }
    }

    Ok(())
}

fn parse_role(role: &Option<String>) -> AppResult<Option<Role>> {
    role.as_deref()
        .map(|r| Role::from_code(r).ok_or_else(|| AppError::InvalidRole(r.to_string())))
        .transpose()
}

/// Roles tried when deriving from a title: the configured order first,
/// then every other named role.
fn derivation_order(configured: &[Role]) -> Vec<Role> {
    let mut order = configured.to_vec();
    for r in Role::NAMED {
        if !order.contains(&r) {
            order.push(r);
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_order_appends_missing_roles() {
        let order = derivation_order(&[Role::Police, Role::Supervisor]);
        assert_eq!(
            order,
            vec![
                Role::Police,
                Role::Supervisor,
                Role::Security,
                Role::Dispatcher
            ]
        );
    }
}
