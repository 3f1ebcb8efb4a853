use crate::core::grid::GridDescriptor;
use serde::Serialize;

/// One grid cell as a flat record (CSV rows).
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct CellExport {
    pub employee_id: i64,
    pub employee: String,
    pub role: String,
    pub date: String,
    pub shift_id: Option<i64>,
    pub label: String,
    pub text: String,
    pub tooltip: String,
    pub parity: String,
    pub conflict: bool,
}

/// Flatten the grid in display order; cells without a shift are skipped.
pub fn cells_from_grid(grid: &GridDescriptor) -> Vec<CellExport> {
    grid.employee_blocks()
        .flat_map(|block| {
            block
                .cells
                .iter()
                .filter(|c| c.shift_id.is_some())
                .map(move |c| CellExport {
                    employee_id: block.employee_id,
                    employee: block.name.clone(),
                    role: block.group.to_db_str().to_string(),
                    date: c.date.format("%Y-%m-%d").to_string(),
                    shift_id: c.shift_id,
                    label: c.label.text().to_string(),
                    text: c.text.clone(),
                    tooltip: c.tooltip.clone(),
                    parity: c.parity.class().to_string(),
                    conflict: c.conflict,
                })
        })
        .collect()
}
