use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rShiftboard
/// CLI application to plan monthly shift rosters with SQLite
#[derive(Parser)]
#[command(
    name = "rshiftboard",
    version = env!("CARGO_PKG_VERSION"),
    about = "A monthly shift roster CLI: classify shifts, spot coverage gaps and bulk-apply templates using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Drop the edit capabilities for this run
    #[arg(global = true, long = "read-only")]
    pub read_only: bool,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the roster
    Employee {
        #[command(subcommand)]
        action: EmployeeCommand,
    },

    /// Add, edit or delete a single shift
    Shift {
        #[command(subcommand)]
        action: ShiftCommand,
    },

    /// Apply a shift template to many dates of one employee
    Bulk {
        #[arg(long = "employee", help = "Employee ID the shifts are assigned to")]
        employee: i64,

        #[arg(long = "template", help = "morning (07-15), afternoon (15-23), night (23-07)")]
        template: String,

        #[arg(long = "dates", help = "Comma separated dates (YYYY-MM-DD,YYYY-MM-DD,...)")]
        dates: String,

        #[arg(long = "notes", help = "Notes written to every shift")]
        notes: Option<String>,

        #[arg(long = "text", help = "Cell text written to every shift")]
        text: Option<String>,
    },

    /// Show the monthly roster grid
    Grid {
        #[arg(long, short, help = "Month to show (YYYY-MM, default: current)")]
        month: Option<String>,
    },

    /// List (date, slot) pairs without covering-role coverage
    Conflicts {
        #[arg(long, short, help = "Month to check (YYYY-MM, default: current)")]
        month: Option<String>,
    },

    /// Save, list or restore schedule snapshots
    Snapshot {
        #[arg(long = "save", value_name = "DESC", help = "Save all shifts with a description")]
        save: Option<String>,

        #[arg(long = "list", help = "List snapshots, newest first")]
        list: bool,

        #[arg(long = "restore", value_name = "ID", help = "Replace all shifts with a snapshot")]
        restore: Option<i64>,
    },

    /// Export the monthly grid
    Export {
        #[arg(long, value_enum, help = "Export format: csv or json")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Absolute output file path")]
        file: String,

        #[arg(long, short, help = "Month to export (YYYY-MM, default: current)")]
        month: Option<String>,

        #[arg(long, help = "Overwrite an existing file without asking")]
        force: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum EmployeeCommand {
    /// Add an employee
    Add {
        name: String,

        #[arg(long = "title", help = "Job title (free text)")]
        title: String,

        #[arg(
            long = "role",
            help = "supervisor, police, security, dispatcher or other (default: derived from the title)"
        )]
        role: Option<String>,

        #[arg(long = "hidden", help = "Do not show the employee on the schedule")]
        hidden: bool,
    },

    /// List employees
    List {
        #[arg(long = "all", help = "Include employees hidden from the schedule")]
        all: bool,
    },

    /// Change name, title, role or visibility of an employee
    Edit {
        id: i64,

        #[arg(long = "name")]
        name: Option<String>,

        #[arg(long = "title", help = "New job title (re-derives the role unless --role is given)")]
        title: Option<String>,

        #[arg(long = "role", help = "supervisor, police, security, dispatcher or other")]
        role: Option<String>,

        #[arg(long = "show", conflicts_with = "hide", help = "Show the employee on the schedule")]
        show: bool,

        #[arg(long = "hide", help = "Hide the employee from the schedule")]
        hide: bool,
    },

    /// Delete an employee and all of their shifts
    Del {
        id: i64,

        #[arg(long, help = "Do not ask for confirmation")]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum ShiftCommand {
    /// Add a shift (default window: 07:00-15:00)
    Add {
        employee: i64,

        /// Start date (YYYY-MM-DD)
        date: String,

        #[arg(long = "start", help = "Start time (HH:MM)")]
        start: Option<String>,

        #[arg(long = "end", help = "End time (HH:MM)")]
        end: Option<String>,

        #[arg(long = "next-day", help = "The shift ends on the following day")]
        next_day: bool,

        #[arg(long = "template", help = "Use a canonical window: morning, afternoon, night")]
        template: Option<String>,

        #[arg(long = "notes")]
        notes: Option<String>,

        #[arg(long = "text", help = "Literal cell text")]
        text: Option<String>,
    },

    /// Edit an existing shift
    Edit {
        id: i64,

        #[arg(long = "start", help = "New start time (HH:MM)")]
        start: Option<String>,

        #[arg(long = "end", help = "New end time (HH:MM)")]
        end: Option<String>,

        #[arg(long = "next-day", help = "The shift ends on the following day")]
        next_day: bool,

        #[arg(long = "notes")]
        notes: Option<String>,

        #[arg(long = "text", help = "Literal cell text")]
        text: Option<String>,
    },

    /// Delete a shift
    Del {
        id: i64,

        #[arg(long, help = "Do not ask for confirmation")]
        force: bool,
    },
}
