//! CLI tool for colsize - auto-sizes the columns of a CSV/TSV file and
//! outputs the widths as JSON
//!
//! Usage:
//!   colsize_cli <input.csv>                        # Output JSON to stdout
//!   colsize_cli <input.tsv> --headers              # First line is the header row
//!   colsize_cli <input.csv> --settings grid.json   # Grid settings (autoColumnSize, colWidths)
//!   colsize_cli <input.csv> -o out.json            # Output JSON to file

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};
use std::rc::Rc;

use serde::Serialize;

use colsize::{
    AutoColumnSize, Delimiter, GridHost, GridSettings, ManualScheduler, TableGrid,
    DEFAULT_COL_WIDTH,
};

/// JSON document written by the CLI.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    rows: u32,
    cols: u32,
    auto_size_enabled: bool,
    frames: usize,
    total_width: f32,
    columns: Vec<ColumnReport>,
}

#[derive(Serialize)]
struct ColumnReport {
    col: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    header: Option<String>,
    /// Measured width, `null` if the column was not auto-sized.
    measured: Option<f32>,
    /// Width the grid lays the column out with.
    width: f32,
}

fn usage() -> ! {
    eprintln!(
        "Usage: colsize_cli <input.csv|tsv> [--headers] [--settings settings.json] [-o output.json]"
    );
    std::process::exit(1);
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        usage();
    }

    let input_path = &args[1];
    let mut has_header = false;
    let mut settings_path = None;
    let mut output_path = None;
    let mut rest = args[2..].iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--headers" => has_header = true,
            "--settings" => settings_path = Some(rest.next().unwrap_or_else(|| usage())),
            "-o" => output_path = Some(rest.next().unwrap_or_else(|| usage())),
            _ => usage(),
        }
    }

    // Read input file
    let data = match fs::read(input_path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    let settings = match settings_path {
        Some(path) => {
            let parsed = fs::read_to_string(path)
                .map_err(colsize::ColsizeError::from)
                .and_then(|json| GridSettings::from_json(&json));
            match parsed {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Error loading settings {}: {}", path, e);
                    std::process::exit(1);
                }
            }
        }
        None => GridSettings::default(),
    };

    let grid = match TableGrid::from_delimited(&data, Delimiter::from_path(input_path), has_header)
    {
        Ok(g) => Rc::new(g.with_settings(settings.clone())),
        Err(e) => {
            eprintln!("Error parsing {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    // Full recalculation, pumping frames until the run completes
    let scheduler = Rc::new(ManualScheduler::new());
    let frames: Rc<ManualScheduler> = Rc::clone(&scheduler);
    let plugin = AutoColumnSize::new(&grid, frames, settings.options());
    plugin.calculate_all_columns_width(None);
    let frames = scheduler.run_until_idle();

    let static_widths = settings.col_widths.clone();
    let width_of = |col: u32| {
        let default = grid
            .user_width_override(col)
            .or_else(|| static_widths.as_ref().and_then(|w| w.width_of(col)));
        plugin.on_modify_column_width(col, default)
    };
    grid.relayout(&width_of);
    let layout = grid.layout();

    let report = Report {
        rows: grid.count_rows(),
        cols: grid.count_cols(),
        auto_size_enabled: plugin.is_enabled(),
        frames,
        total_width: layout.total_width(),
        columns: (0..grid.count_cols())
            .map(|col| ColumnReport {
                col,
                header: grid.column_header(col),
                measured: plugin.cached_width(col),
                width: width_of(col).unwrap_or(DEFAULT_COL_WIDTH),
            })
            .collect(),
    };

    // Serialize to JSON
    let json = match serde_json::to_string_pretty(&report) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}
