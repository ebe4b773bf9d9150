use std::{
    fs::File,
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use log::{debug, info};

use rh_export::{
    core::{
        document::Document,
        job::{FilterJobBuilder, RunStatus},
        table::Table,
    },
    item::{
        csv::{DEFAULT_EXPORT_FILE, csv_writer::CsvItemWriterBuilder},
        filter::{FilterSpecBuilder, Status, parse_date},
        xml::DEFAULT_TAG,
    },
};

/// Filter <RH> reservation records out of XML files and export them as CSV.
#[derive(Parser, Debug)]
#[command(name = "rh-export", version, about)]
struct Cli {
    /// XML files containing <RH> records
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Reservation status: "CHECKED OUT", "RESERVED", "CANCELLED" or "NO SHOW"
    #[arg(long, value_parser = parse_status)]
    status: Option<Status>,

    /// Reservation id (RID), matched exactly
    #[arg(long, default_value = "")]
    rid: String,

    /// Keep records checking in (BD) on or after this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_day)]
    begin_date: Option<NaiveDate>,

    /// Keep records checking out (ED) on or before this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_day)]
    end_date: Option<NaiveDate>,

    /// Keep records whose stay (BD to ED, inclusive) covers this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_day)]
    stay_date: Option<NaiveDate>,

    /// Tag of the record elements
    #[arg(long, default_value = DEFAULT_TAG)]
    tag: String,

    /// CSV destination, "-" for standard output
    #[arg(short, long, default_value = DEFAULT_EXPORT_FILE)]
    output: String,
}

fn parse_status(value: &str) -> Result<Status, String> {
    value.parse().map_err(|e: rh_export::RhError| e.to_string())
}

fn parse_day(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).ok_or_else(|| format!("'{}' is not a YYYY-MM-DD date", value))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    debug!("{:?}", cli);

    let (documents, unreadable) = Document::load_all(&cli.files);
    for error in &unreadable {
        eprintln!("warning: {}", error);
    }

    let spec = FilterSpecBuilder::new()
        .status(cli.status)
        .id(&cli.rid)
        .begin_date(cli.begin_date)
        .end_date(cli.end_date)
        .stay_date(cli.stay_date)
        .build();

    let job = FilterJobBuilder::new().filter(spec).tag(&cli.tag).build();
    let execution = job.run(&documents)?;

    for diagnostic in &execution.diagnostics {
        eprintln!("warning: {}", diagnostic);
    }

    match execution.status() {
        RunStatus::NoDocuments => eprintln!("No documents uploaded."),
        RunStatus::NoMatches => eprintln!("No matching entries found."),
        RunStatus::Matches(count) => {
            eprintln!("{} matching <{}> entries found.", count, cli.tag);
            export(&Table::from_records(&execution.results), &cli.output)?;
        }
    }

    Ok(())
}

fn export(table: &Table, output: &str) -> Result<()> {
    if output == "-" {
        let writer = CsvItemWriterBuilder::new().from_writer(io::stdout().lock());
        writer.write_table(table)?;
        writer.into_inner()?.flush()?;
    } else {
        let file = File::create(output).with_context(|| format!("cannot create {}", output))?;
        let writer = CsvItemWriterBuilder::new().from_writer(file);
        writer.write_table(table)?;
        writer.into_inner()?.sync_all()?;
        info!("{} rows written to {}", table.len(), output);
    }
    Ok(())
}
