use crate::core::grid::GridDescriptor;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::cells_from_grid;
use crate::ui::messages::warning;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Write `grid` to `file`.
    ///
    /// - `csv`: one row per filled cell
    /// - `json`: the full grid descriptor (days, separators, cells)
    ///
    /// The path must be absolute; an existing file is only replaced with
    /// `force` or after confirmation.
    pub fn export(
        grid: &GridDescriptor,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<()> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => {
                let cells = cells_from_grid(grid);
                if cells.is_empty() {
                    warning("No shifts found for the selected month.");
                }
                export_csv(&cells, path)?
            }
            ExportFormat::Json => export_json(grid, path)?,
        }

        Ok(())
    }
}
