//! Command line tool to compile and inspect region specifications
//!
//! Quick way of checking what a cell region actually compiles to without
//! setting up a whole geometry. Each region is tokenized, converted to
//! postfix, and checked for being a simple intersection.
//!
//! # Usage
//!
//! ```text
//! Usage: region2rpn [options] <region>...
//! ```
//!
//! Help is printed with the `-h` flag, and `--help` will show examples, default
//! values, examples, and any important behaviour.
//!
//! ## Options
//!
//! By default a summary of every region is logged.
//!
//! ```bash
//! # Compile two regions, numbered as cells 1 and 2
//! region2rpn "-1 2 -3" "(1 2) | ~3"
//! ```
//!
//! ### Restrict the known surfaces
//!
//! Any surface id is accepted unless a list of known surfaces is given, in
//! which case references to anything else are an error.
//!
//! ```bash
//! # Fails, surface 4 does not exist
//! region2rpn --surfaces 1,2,3 "1 -4"
//! ```
//!
//! ### Cell numbering
//!
//! Cells are numbered from 1 by default for the error messages and outputs.
//! Options always go before the regions, since everything after the first
//! region is read as another region.
//!
//! ```bash
//! # Regions become cells 100, 101, ...
//! region2rpn --first-id 100 "1 -2" "3"
//! ```
//!
//! ### Convert to JSON file
//!
//! The summary of every cell can be written to a JSON file.
//!
//! ```bash
//! # Output a file named 'regions.json'
//! region2rpn --json "1 -2" "~(3 | 4)"
//!
//! # Output a file named 'myfile.json'
//! region2rpn --json --output myfile "1 -2"
//! ```
//!

// standard libraries
use std::fs::File;
use std::io::BufWriter;

// crate modules
use halfspace::region::tokenize;
use halfspace::utils::f;
use halfspace::{Cell, CellSummary, SurfaceMap};

// external crates
use anyhow::{Context, Result};
use clap::{arg, Parser};
use log::*;

#[doc(hidden)]
fn main() -> Result<()> {
    // set up the command line interface and match arguments
    let cli: Cli = Cli::parse();

    // set up logging (+2 to make 'Info' the default)
    let verbosity = cli.verbose as usize + 2;
    logging_init(verbosity, cli.quiet);

    // either the surfaces given, or everything that is referenced
    let surfaces = match &cli.surfaces {
        Some(ids) => SurfaceMap::from_ids(ids.iter().copied())?,
        None => referenced_surfaces(&cli.regions)?,
    };
    debug!("{} surfaces known", surfaces.len());

    // compile every region as its own cell
    let mut cells = Vec::with_capacity(cli.regions.len());
    for (i, region) in cli.regions.iter().enumerate() {
        let id = cli.first_id + i as i32;
        let cell = Cell::new(id, None, None, region, &surfaces)
            .with_context(|| f!("Failed to compile \"{region}\""))?;
        cells.push(cell);
    }
    info!("Compiled {} regions", cells.len());

    let summaries: Vec<CellSummary> = cells.iter().map(|c| c.summary(&surfaces)).collect();

    if !cli.quiet {
        print_summary(&summaries);
    }

    if cli.json {
        write_json(&summaries, &cli)?;
    }

    Ok(())
}

/// Compile region specifications to postfix
///
/// Each region is tokenized, has the implicit intersections added, and is
/// converted to Reverse Polish Notation. The resulting infix and postfix
/// programs are printed along with whether the region is a simple
/// intersection.
///
/// Examples
/// --------
///
///  Compile two regions
///     $ region2rpn "-1 2 -3" "(1 2) | ~3"
///
///  Only allow surfaces 1, 2, and 3
///     $ region2rpn --surfaces 1,2,3 "1 -4"
///
///  Number the cells from 100
///     $ region2rpn --first-id 100 "1 -2" "3"
///
///  Write to JSON as "myfile.json"
///     $ region2rpn --json --output myfile "1 -2"
///
/// Notes
/// -----
///
/// Intersections are implicit in a region specification, and are shown as
/// '&' in the postfix output only.
///
/// Regions are read until the end of the command line, so any options
/// must come first.
#[doc(hidden)]
#[derive(Parser)]
#[command(
    verbatim_doc_comment,
    arg_required_else_help(true),
    before_help(banner()),
    after_help(
        "Typical use: region2rpn \"-1 2 (3 | ~4)\"\n\nNOTE: --help shows more detail and examples"
    ),
    term_width(70),
    hide_possible_values(true),
    override_usage("region2rpn [options] <region>...")
)]
struct Cli {
    // * Positional
    /// Region specifications, one per cell
    #[arg(name = "region", required = true, allow_hyphen_values = true)]
    regions: Vec<String>,

    /// Known surface ids, comma separated (default all referenced)
    ///
    /// If given, any region referring to a surface not in this list will
    /// fail to compile.
    #[arg(help_heading("Region options"))]
    #[arg(short, long, value_delimiter = ',')]
    #[arg(value_name = "id")]
    surfaces: Option<Vec<i32>>,

    /// Id given to the first cell ('1' default)
    #[arg(help_heading("Region options"))]
    #[arg(long, default_value_t = 1)]
    #[arg(value_name = "id")]
    first_id: i32,

    /// Generate a JSON file ('regions.json' default)
    #[arg(help_heading("Output options"))]
    #[arg(short, long)]
    json: bool,

    /// Name of output file (excl. extension)
    ///
    /// Defaults to `regions.json`, and will automatically set the relevant
    /// extension.
    #[arg(help_heading("Output options"))]
    #[arg(short, long)]
    #[arg(value_name = "path")]
    output: Option<String>,

    // * Flags
    /// Verbose logging (-v, -vv)
    ///
    /// If specified, the default log level of INFO is increased to DEBUG (-v)
    /// or TRACE (-vv). Errors and Warnings are always logged unless in quiet
    /// (-q) mode.
    #[arg(short, long)]
    #[arg(action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all log output (overrules --verbose)
    #[arg(short, long)]
    quiet: bool,
}

/// Sets up logging at runtime to allow for multiple verbosity levels
#[doc(hidden)]
fn logging_init(verbosity: usize, quiet: bool) {
    stderrlog::new()
        .modules(vec![module_path!(), "halfspace"])
        .quiet(quiet)
        .verbosity(verbosity)
        .show_level(false)
        .color(stderrlog::ColorChoice::Never)
        .timestamp(stderrlog::Timestamp::Off)
        .init()
        .unwrap();
}

/// Creates a banner for the command line
#[doc(hidden)]
fn banner() -> String {
    let mut s = f!("{:-<1$}\n", "", 70);
    s += &f!("{:^70}\n", "Halfspace :: Region2rpn");
    s += &f!("{:-<1$}", "", 70);
    s
}

#[doc(hidden)]
/// Every surface id mentioned in any of the regions, in order of appearance
fn referenced_surfaces(regions: &[String]) -> Result<SurfaceMap> {
    let mut surfaces = SurfaceMap::new();
    for region in regions {
        let tokens =
            tokenize(region).with_context(|| f!("Failed to tokenize \"{region}\""))?;
        for id in tokens.iter().filter_map(|t| t.operand()) {
            if surfaces.index(id.abs()).is_none() {
                surfaces.insert(id.abs())?;
            }
        }
    }
    Ok(surfaces)
}

#[doc(hidden)]
/// Write the cell summaries to json
fn write_json(summaries: &[CellSummary], cli: &Cli) -> Result<()> {
    let output = match &cli.output {
        Some(o) => f!("{o}.json"),
        None => "regions.json".to_string(),
    };

    debug!("Writing JSON format to {}", output);
    let file: File = File::create(&output)?;
    let writer = BufWriter::new(file);
    Ok(serde_json::to_writer_pretty(writer, summaries)?)
}

#[doc(hidden)]
/// Write summary to the terminal
fn print_summary(summaries: &[CellSummary]) {
    for summary in summaries {
        let mut s = f!("Cell {}\n", summary.id);
        s += &f!("  region : {}\n", summary.region);
        s += &f!(
            "{}\n",
            textwrap::fill(
                &summary.rpn,
                textwrap::Options::new(70)
                    .initial_indent("  rpn    : ")
                    .subsequent_indent("           ")
            )
        );
        s += &f!("  simple : {}", summary.simple);
        println!("{s}")
    }
}
