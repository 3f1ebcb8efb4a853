//! Terminal rendering of a `GridDescriptor`.

use crate::core::classifier::CoverageSlot;
use crate::core::grid::{DayHeader, GridDescriptor, GridRow, RowBlock};
use crate::utils::colors::{GREY, RED, color_for_label, color_for_parity, paint};
use crate::utils::formatting::{bold, pad_left, pad_right, visible_width};
use unicode_width::UnicodeWidthChar;

const MIN_DAY_WIDTH: usize = 2;
const MAX_DAY_WIDTH: usize = 6;

pub struct GridRenderer<'a> {
    grid: &'a GridDescriptor,
    separator: char,
    name_w: usize,
    day_w: usize,
}

impl<'a> GridRenderer<'a> {
    pub fn new(grid: &'a GridDescriptor, separator: char) -> Self {
        let name_w = grid
            .employee_blocks()
            .flat_map(|b| [visible_width(&b.name), visible_width(&b.job_title)])
            .chain(std::iter::once("Employee".len()))
            .max()
            .unwrap_or(8);

        let day_w = grid
            .employee_blocks()
            .flat_map(|b| b.cells.iter().map(|c| visible_width(c.label.text())))
            .max()
            .unwrap_or(0)
            .clamp(MIN_DAY_WIDTH, MAX_DAY_WIDTH);

        Self {
            grid,
            separator,
            name_w,
            day_w,
        }
    }

    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.grid.row_count + 1);

        lines.push(self.header(|d| d.day.to_string(), "Employee"));
        lines.push(self.header(|d| d.weekday.to_string(), ""));

        if self.grid.days.iter().any(|d| !d.conflicts.is_empty()) {
            lines.push(self.conflict_line());
        }

        for row in &self.grid.rows {
            match row {
                GridRow::Separator { .. } => lines.push(self.separator_line()),
                GridRow::Employee(block) => {
                    lines.push(self.label_line(block));
                    lines.push(self.text_line(block));
                }
            }
        }

        lines.join("\n")
    }

    fn header<F>(&self, value: F, title: &str) -> String
    where
        F: Fn(&DayHeader) -> String,
    {
        let mut line = pad_right(&bold(title), self.name_w);
        for day in &self.grid.days {
            let v = pad_left(&value(day), self.day_w);
            line.push(' ');
            line.push_str(&paint(&v, color_for_parity(day.parity)));
        }
        line
    }

    fn conflict_line(&self) -> String {
        let mut line = pad_right(&paint("Uncovered", RED), self.name_w);
        for day in &self.grid.days {
            let slots: String = day.conflicts.iter().map(CoverageSlot::id).collect();
            line.push(' ');
            line.push_str(&pad_left(&paint(&slots, RED), self.day_w));
        }
        line
    }

    fn separator_line(&self) -> String {
        let width = self.name_w + self.grid.days.len() * (self.day_w + 1);
        self.separator.to_string().repeat(width)
    }

    fn label_line(&self, block: &RowBlock) -> String {
        let mut line = pad_right(&block.name, self.name_w);
        for cell in &block.cells {
            let text = clip(cell.label.text(), self.day_w);
            let mut colored = paint(&text, color_for_label(&cell.label));
            if cell.conflict && text.is_empty() {
                colored = paint("!", RED);
            }
            line.push(' ');
            line.push_str(&pad_left(&colored, self.day_w));
        }
        line
    }

    fn text_line(&self, block: &RowBlock) -> String {
        let mut line = pad_right(&paint(&block.job_title, GREY), self.name_w);
        for cell in &block.cells {
            let text = clip(&cell.text, self.day_w);
            line.push(' ');
            line.push_str(&pad_left(&paint(&text, GREY), self.day_w));
        }
        line
    }
}

/// Keep at most `width` terminal columns of `s`.
fn clip(s: &str, width: usize) -> String {
    let mut used = 0;
    s.chars()
        .take_while(|ch| {
            used += ch.width().unwrap_or(0);
            used <= width
        })
        .collect()
}

pub fn render_grid(grid: &GridDescriptor, separator: char) -> String {
    GridRenderer::new(grid, separator).render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::Classifier;
    use crate::core::grid::GridBuilder;
    use crate::core::lookup::ShiftLookup;
    use crate::models::{CapabilitySet, Employee, Role, Shift};
    use crate::utils::date::month_dates;
    use crate::utils::formatting::strip_ansi;
    use chrono::NaiveDate;

    #[test]
    fn renders_two_lines_per_employee_and_separators() {
        let month = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let day = month.and_hms_opt(7, 0, 0).unwrap();
        let employees = vec![
            Employee::new(1, "Ann", "Supervisor", Role::Supervisor),
            Employee::new(2, "Bob", "Police Officer", Role::Police),
        ];
        let shifts = vec![
            Shift::timed(10, Some(2), day, day + chrono::Duration::hours(8)).with_cell_text("desk"),
        ];
        let lookup = ShiftLookup::build(&shifts);
        let classifier = Classifier::default();
        let order = [Role::Supervisor, Role::Police];
        let grid = GridBuilder::new(&classifier, &order).build(
            &employees,
            &month_dates(month),
            &lookup,
            &CapabilitySet::none(),
        );

        let out = strip_ansi(&render_grid(&grid, '='));
        let lines: Vec<&str> = out.lines().collect();

        // 2 headers + 2 employees * 2 + 1 separator
        assert_eq!(lines.len(), 7);
        assert!(lines[0].starts_with("Employee"));
        assert!(lines[4].starts_with("=="));
        assert!(lines[5].starts_with("Bob"));
        assert!(lines[5].contains(" 1"));
        assert!(lines[6].contains("de"));
    }

    #[test]
    fn clip_respects_width() {
        assert_eq!(clip("abcdef", 4), "abcd");
        assert_eq!(clip("ab", 4), "ab");
        assert_eq!(clip("", 4), "");
    }
}
