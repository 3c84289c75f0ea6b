use std::io;

use anyhow::{Context, Result, bail};
use tracing::{info_span, warn};

use ftab_cli::config::load_options;
use ftab_cli::output::{HeaderReport, limited_records, write_csv, write_json};
use ftab_core::{Table, TableOptions, open_table};

use crate::cli::{ExtractArgs, HeadersArgs, OutputFormatArg, TableArgs};
use crate::summary::{print_headers, print_records};

pub fn run_extract(args: &ExtractArgs) -> Result<()> {
    let table = load_table(&args.table)?;
    match args.format {
        OutputFormatArg::Table => print_records(&table, args.limit),
        OutputFormatArg::Json => {
            write_json(io::stdout().lock(), &limited_records(&table, args.limit))?;
        }
        OutputFormatArg::Csv => write_csv(io::stdout().lock(), &table, args.limit)?,
    }
    Ok(())
}

pub fn run_headers(args: &HeadersArgs) -> Result<()> {
    if args.format == OutputFormatArg::Csv {
        bail!("csv output is only available for `extract`");
    }
    let table = load_table(&args.table)?;
    match args.format {
        OutputFormatArg::Json => write_json(io::stdout().lock(), &HeaderReport::new(&table))?,
        _ => print_headers(&table),
    }
    Ok(())
}

/// Builds options from the fields file, then lets flags override it.
pub fn table_options(args: &TableArgs) -> Result<TableOptions> {
    let mut options = TableOptions::new();
    if let Some(path) = &args.fields_file {
        options = load_options(path, options)?;
    }
    options = options.fields(args.fields.iter().map(String::as_str));
    if let Some(row) = args.header_row {
        options = options.header_row(row);
    }
    if let Some(seek) = &args.seek {
        options = options.header_row_seek(seek.parse()?);
    }
    if let Some(mode) = &args.mode {
        options = options.mode(mode.parse()?);
    }
    if let Some(min_ratio) = args.min_ratio {
        options = options.min_ratio(min_ratio);
    }
    if args.case_insensitive {
        options = options.case_sensitive(false);
    }
    if args.strict {
        options = options.missing_fields_error(true);
    }
    if args.no_row_num {
        options = options.include_row_num(false);
    }
    Ok(options)
}

fn load_table(args: &TableArgs) -> Result<Table> {
    let span = info_span!("table", path = %args.path.display());
    let _guard = span.enter();

    let options = table_options(args)?;
    let table = open_table(&args.path, args.sheet.as_deref(), &options)
        .with_context(|| format!("extract table from {}", args.path.display()))?;
    for name in table.missing() {
        warn!(field = %name, "no matching column");
    }
    Ok(table)
}
