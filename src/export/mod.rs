mod fs_utils;
mod json_csv;
pub mod logic;
mod model;

pub use fs_utils::ask_confirmation;
pub use logic::ExportLogic;
pub use model::{CellExport, cells_from_grid};

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}
