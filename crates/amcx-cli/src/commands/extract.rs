//! Extract command - turn a batch of contract documents into one spreadsheet.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use console::{Alignment, pad_str, style};
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use amcx_core::models::InputConfig;
use amcx_core::{
    AmcRecord, ContractParser, ExportFormat, Exporter, FIELD_NAMES, Presenter, SourceDocument,
    run_session,
};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input files or glob patterns
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Directory the export is written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Export format
    #[arg(short, long, value_enum, default_value = "xlsx")]
    format: OutputFormat,

    /// Do not print the preview table
    #[arg(long)]
    no_preview: bool,

    /// Write the export to stdout instead of a file (csv and json only)
    #[arg(long)]
    stdout: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Excel workbook
    Xlsx,
    /// CSV with a header row
    Csv,
    /// JSON array of records
    Json,
}

impl From<OutputFormat> for ExportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Xlsx => ExportFormat::Xlsx,
            OutputFormat::Csv => ExportFormat::Csv,
            OutputFormat::Json => ExportFormat::Json,
        }
    }
}

/// Columns shown in the terminal preview, as indices into [`FIELD_NAMES`].
const PREVIEW_COLUMNS: [(usize, usize); 6] = [
    (1, 12),  // Contract No
    (2, 28),  // Customer Name
    (7, 12),  // Amount
    (8, 13),  // Contract Date
    (9, 14),  // Amc Start Date
    (10, 14), // Amc End Date
];

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let format = ExportFormat::from(args.format);

    if args.stdout && format == ExportFormat::Xlsx {
        anyhow::bail!("--stdout needs --format csv or --format json");
    }

    let files = expand_inputs(&args.inputs, &config.input)?;
    if files.is_empty() {
        anyhow::bail!("No matching files found for: {}", args.inputs.join(" "));
    }

    let mut presenter = TerminalPresenter::new(&args);
    presenter.status(&format!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    ));

    let mut documents = Vec::with_capacity(files.len());
    for path in &files {
        match fs::read(path) {
            Ok(data) => documents.push(SourceDocument::new(display_name(path), data)),
            Err(e) => presenter.warn(&format!("{}: {}", path.display(), e)),
        }
    }

    presenter.start_progress(documents.len())?;

    let parser = ContractParser::new();
    let exporter = Exporter::from_config(config.export.clone());
    let now = chrono::Local::now().naive_local();

    let outcome = run_session(&documents, &parser, &exporter, format, &mut presenter, now)?;
    presenter.clear_progress();

    let skipped = files.len() - outcome.records.len();
    if outcome.records.is_empty() {
        anyhow::bail!("No records extracted from {} files", files.len());
    }

    info!("Extracted {} records, skipped {}", outcome.records.len(), skipped);
    presenter.status(&format!(
        "{} Processed {} files: {} extracted, {} skipped",
        style("✓").green(),
        files.len(),
        style(outcome.records.len()).green(),
        style(skipped).yellow()
    ));

    Ok(())
}

/// Expand paths and glob patterns, keeping accepted extensions in match order.
fn expand_inputs(inputs: &[String], input_config: &InputConfig) -> anyhow::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();

    for input in inputs {
        let mut matched = false;

        for path in glob(input)?.filter_map(|r| r.ok()) {
            matched = true;
            if !path.is_file() {
                continue;
            }
            if !input_config.accepts(&path) {
                debug!("Ignoring {}: unsupported extension", path.display());
                continue;
            }
            if !files.contains(&path) {
                files.push(path);
            }
        }

        if !matched {
            warn!("Nothing matches {}", input);
        }
    }

    Ok(files)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Terminal front end: preview on stdout, export to a file or stdout.
struct TerminalPresenter {
    output_dir: PathBuf,
    to_stdout: bool,
    preview: bool,
    progress: Option<ProgressBar>,
}

impl TerminalPresenter {
    fn new(args: &ExtractArgs) -> Self {
        Self {
            output_dir: args.output_dir.clone(),
            to_stdout: args.stdout,
            preview: !args.no_preview && !args.stdout,
            progress: None,
        }
    }

    fn start_progress(&mut self, count: usize) -> anyhow::Result<()> {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
        );
        pb.set_message(format!("Extracting {} documents", count));
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        self.progress = Some(pb);
        Ok(())
    }

    fn clear_progress(&mut self) {
        if let Some(pb) = self.progress.take() {
            pb.finish_and_clear();
        }
    }

    /// Status lines go to stderr when stdout carries the export.
    fn status(&self, message: &str) {
        if self.to_stdout {
            eprintln!("{}", message);
        } else {
            println!("{}", message);
        }
    }

    fn print_preview(&self, records: &[AmcRecord]) {
        let header: Vec<String> = PREVIEW_COLUMNS
            .iter()
            .map(|&(col, width)| {
                pad_str(FIELD_NAMES[col], width, Alignment::Left, Some("…")).into_owned()
            })
            .collect();

        println!();
        println!("{}", style(header.join("  ")).bold());

        for record in records {
            let values = record.values();
            let cells: Vec<String> = PREVIEW_COLUMNS
                .iter()
                .map(|&(col, width)| {
                    let text = values[col].to_string().replace('\n', " / ");
                    pad_str(&text, width, Alignment::Left, Some("…")).into_owned()
                })
                .collect();
            println!("{}", cells.join("  "));
        }

        println!();
    }
}

impl Presenter for TerminalPresenter {
    fn render(&mut self, records: &[AmcRecord]) -> amcx_core::Result<()> {
        self.clear_progress();
        if self.preview {
            self.print_preview(records);
        }
        Ok(())
    }

    fn offer_download(&mut self, bytes: &[u8], filename: &str) -> amcx_core::Result<()> {
        if self.to_stdout {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
            return Ok(());
        }

        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(filename);
        fs::write(&path, bytes)?;
        debug!("Wrote {} bytes to {}", bytes.len(), path.display());

        println!("{} Output written to {}", style("✓").green(), path.display());
        Ok(())
    }

    fn warn(&mut self, message: &str) {
        self.clear_progress();
        eprintln!("{} {}", style("⚠").yellow(), message);
    }
}
