//! Table rendering: a row per state, a column per action

use clap::ValueEnum;

use jobmatch_core::Result;
use jobmatch_rl::QTable;

/// Output format for tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text grid
    #[default]
    Table,
    /// JSON snapshot
    Json,
}

/// Decimal places shown for Q-values in the grid
pub const PRECISION: usize = 4;

/// Render `table` as an aligned text grid
pub fn render_grid(table: &QTable) -> String {
    let state_width = table
        .states()
        .iter()
        .map(|state| state.chars().count())
        .chain(std::iter::once("State".len()))
        .max()
        .unwrap_or(0);

    let cells: Vec<Vec<String>> = table
        .states()
        .iter()
        .map(|state| {
            table
                .actions()
                .iter()
                .map(|action| {
                    let value = table.get(state, action).unwrap_or(f64::NAN);
                    format!("{value:.prec$}", prec = PRECISION)
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = table
        .actions()
        .iter()
        .enumerate()
        .map(|(col, action)| {
            cells
                .iter()
                .map(|row| row[col].len())
                .chain(std::iter::once(action.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();

    out.push_str(&format!("{:<state_width$}", "State"));
    for (action, &width) in table.actions().iter().zip(&widths) {
        out.push_str(&format!("  {action:>width$}"));
    }
    out.push('\n');

    out.push_str(&"-".repeat(state_width));
    for width in &widths {
        out.push_str("  ");
        out.push_str(&"-".repeat(*width));
    }
    out.push('\n');

    for (state, row) in table.states().iter().zip(&cells) {
        out.push_str(&format!("{state:<state_width$}"));
        for (cell, &width) in row.iter().zip(&widths) {
            out.push_str(&format!("  {cell:>width$}"));
        }
        out.push('\n');
    }

    out
}

/// Render `table` in the requested format
pub fn render(table: &QTable, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_grid(table)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&table.snapshot())?),
    }
}
