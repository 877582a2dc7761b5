//! gridcalc - a reactive spreadsheet calculator for the command line

mod config;
mod error;

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use error::CliError;
use gridcalc_core::{CellError, CellRef, Color, Sheet};
use gridcalc_engine::ExprError;
use gridcalc_engine::engine::{ExpressionTree, format_number};

fn print_usage() {
    eprintln!("Usage: gridcalc [OPTIONS] [FILE]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [FILE]                    Sheet file to load (.gcs)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --command <EXPR>      Evaluate an expression and print the result");
    eprintln!("  --var <NAME=VALUE>        Bind a variable for --command (can be repeated)");
    eprintln!("  -s, --set <CELL=TEXT>     Set a cell's text (can be repeated)");
    eprintln!("  --color <CELL=HEX>        Set a cell's background color (can be repeated)");
    eprintln!("  -o, --output <FILE>       Save the sheet to FILE");
    eprintln!("  --rows <N>                Number of rows (default: 50)");
    eprintln!("  --cols <N>                Number of columns (default: 26)");
    eprintln!("  --config <FILE>           Load settings from a TOML file");
    eprintln!("  -h, --help                Print help");
}

/// A cell edit requested on the command line, applied in order.
#[derive(Debug, Clone, PartialEq)]
enum Edit {
    Text(CellRef, String),
    Color(CellRef, Color),
}

#[derive(Debug, Default)]
struct Options {
    file: Option<PathBuf>,
    command: Option<String>,
    vars: Vec<(String, f64)>,
    edits: Vec<Edit>,
    output: Option<PathBuf>,
    rows: Option<usize>,
    cols: Option<usize>,
    config_file: Option<PathBuf>,
}

fn next_value<'a>(
    args: &mut impl Iterator<Item = &'a String>,
    option: &'static str,
) -> error::Result<&'a str> {
    args.next()
        .map(String::as_str)
        .ok_or(CliError::MissingValue(option))
}

fn split_assignment<'a>(option: &'static str, value: &'a str) -> error::Result<(&'a str, &'a str)> {
    match value.split_once('=') {
        Some((name, rest)) if !name.trim().is_empty() => Ok((name.trim(), rest)),
        _ => Err(CliError::InvalidAssignment {
            option,
            value: value.to_string(),
        }),
    }
}

fn parse_cell(name: &str) -> error::Result<CellRef> {
    CellRef::from_str(name).ok_or_else(|| CliError::InvalidCell(name.to_string()))
}

fn parse_size(option: &'static str, value: &str) -> error::Result<usize> {
    value
        .parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| CliError::InvalidNumber {
            option,
            value: value.to_string(),
        })
}

/// Parse arguments (without the program name). `None` means help was asked for.
fn parse_args(args: &[String]) -> error::Result<Option<Options>> {
    let mut options = Options::default();
    let mut args = args.iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "-c" | "--command" => {
                options.command = Some(next_value(&mut args, "--command")?.to_string());
            }
            "--var" => {
                let value = next_value(&mut args, "--var")?;
                let (name, number) = split_assignment("--var", value)?;
                let number = number.trim().parse::<f64>().map_err(|_| CliError::InvalidNumber {
                    option: "--var",
                    value: number.to_string(),
                })?;
                options.vars.push((name.to_string(), number));
            }
            "-s" | "--set" => {
                let value = next_value(&mut args, "--set")?;
                let (name, text) = split_assignment("--set", value)?;
                options.edits.push(Edit::Text(parse_cell(name)?, text.to_string()));
            }
            "--color" => {
                let value = next_value(&mut args, "--color")?;
                let (name, hex) = split_assignment("--color", value)?;
                let color = hex.parse::<Color>().map_err(|message| CliError::InvalidColor {
                    cell: name.to_string(),
                    message,
                })?;
                options.edits.push(Edit::Color(parse_cell(name)?, color));
            }
            "-o" | "--output" => {
                options.output = Some(PathBuf::from(next_value(&mut args, "--output")?));
            }
            "--rows" => options.rows = Some(parse_size("--rows", next_value(&mut args, "--rows")?)?),
            "--cols" => options.cols = Some(parse_size("--cols", next_value(&mut args, "--cols")?)?),
            "--config" => {
                options.config_file = Some(PathBuf::from(next_value(&mut args, "--config")?));
            }
            other if other.starts_with('-') && other.len() > 1 => {
                return Err(CliError::UnknownOption(other.to_string()));
            }
            other => {
                if options.file.is_some() {
                    return Err(CliError::UnexpectedArgument(other.to_string()));
                }
                options.file = Some(PathBuf::from(other));
            }
        }
    }

    Ok(Some(options))
}

/// Evaluate a standalone expression. Returns whether it produced a number.
fn run_command(expression: &str, vars: &[(String, f64)]) -> bool {
    let expression = expression.trim();
    let expression = expression.strip_prefix('=').unwrap_or(expression);

    let result = ExpressionTree::new(expression).and_then(|mut tree| {
        for (name, value) in vars {
            tree.set_variable(name, *value);
        }
        tree.evaluate()
    });

    match result {
        Ok(n) => {
            println!("{}", format_number(n));
            true
        }
        Err(e) => {
            println!("{}", error_marker(e));
            false
        }
    }
}

/// Display marker for a failed standalone expression.
fn error_marker(err: ExprError) -> String {
    match err {
        ExprError::UnboundVariable(name) => format!("!(unbound variable {})", name),
        other => CellError::from(other).to_string(),
    }
}

/// Build the sheet, apply edits, optionally save, and print every value.
fn run_sheet(options: &Options) -> anyhow::Result<()> {
    let (mut config, warnings) = config::load_config(options.config_file.as_ref());
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }
    if let Some(rows) = options.rows {
        config.rows = rows;
    }
    if let Some(cols) = options.cols {
        config.cols = cols;
    }

    let mut sheet = Sheet::with_config(config)?;
    if let Some(path) = &options.file
        && path.exists()
    {
        sheet
            .load_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?;
    }

    for edit in &options.edits {
        match edit {
            Edit::Text(cell, text) => sheet.edit_cell_text(*cell, text)?,
            Edit::Color(cell, color) => sheet.edit_cell_color(vec![*cell], *color)?,
        }
    }

    if let Some(path) = &options.output {
        sheet
            .save_file(path)
            .with_context(|| format!("Failed to save {}", path.display()))?;
        eprintln!("Saved to {}", path.display());
    }

    for cell in sheet.cells().filter(|c| !c.value().is_empty()) {
        println!("{}\t{}", cell.cell_ref(), cell.value());
    }
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let options = match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(Some(options)) => options,
        Ok(None) => {
            print_usage();
            return;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(1);
        }
    };

    if let Some(expression) = &options.command {
        if !run_command(expression, &options.vars) {
            std::process::exit(1);
        }
        return;
    }

    if let Err(e) = run_sheet(&options) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
