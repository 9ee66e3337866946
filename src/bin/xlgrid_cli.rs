//! CLI tool for xlgrid - loads a grid description, applies filters and
//! prints the rendered rows
//!
//! Usage:
//!   xlgrid_cli <grid.json>                          # All rows as TSV
//!   xlgrid_cli <grid.json> --filter Dept=Eng,Sales  # Filtered rows
//!   xlgrid_cli <grid.json> --filter 1=30 -o out.tsv # Column by index, to file
//!
//! Summary rows (total / subtotal per summarized column) follow the data.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};
use xlgrid::GridDescription;

const USAGE: &str = "Usage: xlgrid_cli <grid.json> [--filter column=v1,v2]... [-o output.tsv]";

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("{USAGE}");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let mut filters: Vec<(String, Vec<String>)> = Vec::new();
    let mut output_path = None;
    let mut rest = args[2..].iter();
    while let Some(arg) = rest.next() {
        match (arg.as_str(), rest.next()) {
            ("--filter", Some(spec)) => {
                let Some((column, values)) = spec.split_once('=') else {
                    eprintln!("Bad filter {spec:?}, expected column=v1,v2");
                    std::process::exit(1);
                };
                filters.push((
                    column.to_string(),
                    values.split(',').map(str::to_string).collect(),
                ));
            }
            ("-o", Some(path)) => output_path = Some(path.clone()),
            _ => {
                eprintln!("{USAGE}");
                std::process::exit(1);
            }
        }
    }

    // Read input file
    let text = match fs::read_to_string(input_path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    // Build grid
    let description = match GridDescription::from_json(&text) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error parsing grid description: {}", e);
            std::process::exit(1);
        }
    };
    let (mut grid, rejected) = match description.build() {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Error building grid: {}", e);
            std::process::exit(1);
        }
    };
    if rejected > 0 {
        eprintln!("Skipped {} invalid rows", rejected);
    }

    // Filters
    for (column, values) in &filters {
        let Some(index) = grid.find_column(column) else {
            eprintln!("No such column: {}", column);
            std::process::exit(1);
        };
        if let Err(e) = grid.apply_filter(index, values) {
            eprintln!("Error filtering {}: {}", column, e);
            std::process::exit(1);
        }
    }

    let tsv = grid.rendered_text();

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &tsv) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(tsv.as_bytes()).unwrap();
        }
    }

    for summary in grid.summaries() {
        let name = grid
            .column(summary.column)
            .map_or("?", |c| c.name.as_str());
        println!(
            "{}: total {} subtotal {}",
            name, summary.total, summary.subtotal
        );
    }
}
