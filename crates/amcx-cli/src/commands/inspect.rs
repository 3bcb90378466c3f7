//! Inspect command - show the loaded text, tables and extracted record of one document.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Serialize;

use amcx_core::{
    AmcRecord, ContractExtractor, ContractParser, DocumentContent, contract_number_from_filename,
    load_document,
};

/// Arguments for the inspect command.
#[derive(Args)]
pub struct InspectArgs {
    /// Document to inspect
    #[arg(required = true)]
    input: PathBuf,

    /// Print a single JSON object instead of sections
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Inspection<'a> {
    filename: &'a str,
    contract_no: &'a str,
    content: &'a DocumentContent,
    record: &'a AmcRecord,
    warnings: &'a [String],
}

pub fn run(args: InspectArgs) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let filename = args
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let data = fs::read(&args.input)?;

    let content = load_document(&filename, &data)
        .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", args.input.display(), e))?;
    let contract_no = contract_number_from_filename(&filename);
    let result = ContractParser::new().extract(&content, &contract_no);

    if args.json {
        let inspection = Inspection {
            filename: &filename,
            contract_no: &contract_no,
            content: &content,
            record: &result.record,
            warnings: &result.warnings,
        };
        println!("{}", serde_json::to_string_pretty(&inspection)?);
        return Ok(());
    }

    println!("{}", style(format!("== Text ({} chars)", content.text.chars().count())).bold());
    println!("{}", content.text);
    println!();

    println!("{}", style(format!("== Tables ({})", content.tables.len())).bold());
    for (index, table) in content.tables.iter().enumerate() {
        println!("{}", style(format!("-- Table {}", index)).cyan());
        for row in table {
            println!("{}", row.join(" | "));
        }
    }
    println!();

    println!("{}", style("== Record").bold());
    println!("{}", serde_json::to_string_pretty(&result.record)?);

    if !result.warnings.is_empty() {
        println!();
        for warning in &result.warnings {
            println!("{} {}", style("⚠").yellow(), warning);
        }
    }

    Ok(())
}
