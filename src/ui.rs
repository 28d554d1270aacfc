//! Terminal UI utilities.
//!
//! A width-aware table with Unicode box-drawing characters, used by the
//! list and report commands.

use colored::*;
use std::cmp;

pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        if row.len() == self.headers.len() {
            self.rows.push(row);
        }
    }

    pub fn print(&self) {
        if self.headers.is_empty() {
            return;
        }

        let widths = self.column_widths();

        let border = |left: &str, mid: &str, right: &str| {
            let spans: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("  {}{}{}", left, spans.join(mid), right)
        };

        println!("{}", border("┌", "┬", "┐"));

        print!("  │");
        for (header, width) in self.headers.iter().zip(&widths) {
            print!(" {} │", pad(&header.bold().to_string(), *width));
        }
        println!();
        println!("{}", border("├", "┼", "┤"));

        for row in &self.rows {
            print!("  │");
            for (cell, width) in row.iter().zip(&widths) {
                let shown = console::truncate_str(cell, *width, "...");
                print!(" {} │", pad(shown.as_ref(), *width));
            }
            println!();
        }

        println!("{}", border("└", "┴", "┘"));
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self
            .headers
            .iter()
            .map(|h| console::measure_text_width(h))
            .collect();

        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = cmp::max(widths[i], console::measure_text_width(cell));
            }
        }

        // Shrink the widest columns until the frame fits the terminal.
        let max_width = console::Term::stdout().size().1 as usize;
        let overhead = 3 + 3 * widths.len();
        loop {
            let total: usize = overhead + widths.iter().sum::<usize>();
            if total <= max_width {
                break;
            }
            let Some((idx, widest)) = widths
                .iter()
                .copied()
                .enumerate()
                .max_by_key(|&(_, w)| w)
            else {
                break;
            };
            if widest <= 8 {
                break;
            }
            widths[idx] = widest - 1;
        }

        widths
    }
}

fn pad(cell: &str, width: usize) -> String {
    let visible = console::measure_text_width(cell);
    format!("{}{}", cell, " ".repeat(width.saturating_sub(visible)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatched_row_is_dropped() {
        let mut table = Table::new(&["A", "B"]);
        table.add_row(vec!["only-one".to_string()]);
        table.add_row(vec!["x".to_string(), "y".to_string()]);
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn test_column_widths_track_longest_cell() {
        let mut table = Table::new(&["Name", "Value"]);
        table.add_row(vec!["a-long-name".to_string(), "v".to_string()]);
        let widths = table.column_widths();
        assert!(widths[0] >= "a-long-name".len());
        assert!(widths[1] >= "Value".len());
    }
}
