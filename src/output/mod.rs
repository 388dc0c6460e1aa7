// mod.rs - Report rendering and writers

use crate::core::{LoadedCombination, SynergyMatrices};
use crate::data::Dose;
use crate::error::{Result, SynergyError};
use serde::Serialize;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Tsv,
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = SynergyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "tsv" => Ok(OutputFormat::Tsv),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(SynergyError::InvalidArgument(format!(
                "Unsupported output format: {}. Use: tsv, csv, json",
                s
            ))),
        }
    }
}

impl OutputFormat {
    pub fn description(&self) -> &str {
        match self {
            OutputFormat::Tsv => "tab-separated combination table",
            OutputFormat::Csv => "comma-separated combination table",
            OutputFormat::Json => "JSON report with matrices",
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    version: &'a str,
    generated: String,
    command: &'a str,
    combination: &'a LoadedCombination,
    matrices: &'a SynergyMatrices,
}

fn generated_at() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn format_matrix(matrix: &[Vec<f64>]) -> String {
    let mut out = String::new();
    for row in matrix {
        let cells: Vec<String> = row.iter().map(|v| format!("{:>9.3}", v)).collect();
        out.push_str(&format!(" [{}]\n", cells.join(" ")));
    }
    out
}

fn format_doses(doses: &[Dose]) -> String {
    let items: Vec<String> = doses.iter().map(|d| d.to_string()).collect();
    format!("[{}]", items.join(", "))
}

/// Render the console report: combination table, growth/expected/score matrices and dose lists.
pub fn render_report(data: &LoadedCombination, matrices: &SynergyMatrices) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Sample {} | {} + {} | study {}{}\n",
        data.sample,
        data.drug1,
        data.drug2,
        data.study,
        if data.swapped { " (drug order swapped)" } else { "" }
    ));
    out.push_str(&format!(
        "{:>12} {:>12} {:>10} {:>15} {:>10}  {}\n",
        "Dose1", "Dose2", "Growth", "ExpectedGrowth", "Score", "Study"
    ));
    for row in &data.combo {
        out.push_str(&format!(
            "{:>12} {:>12} {:>10.3} {:>15.3} {:>10.3}  {}\n",
            row.dose1.to_string(),
            row.dose2.to_string(),
            row.growth,
            row.expected_growth,
            row.score,
            row.study
        ));
    }

    out.push_str("Experimental growth:\n");
    out.push_str(&format_matrix(&matrices.growth));
    out.push_str("Expected growth:\n");
    out.push_str(&format_matrix(&matrices.expected));
    out.push_str("Synergy score (expected - observed):\n");
    out.push_str(&format_matrix(&matrices.score));
    out.push_str(&format!("Drug1 doses: {}\n", format_doses(&matrices.drug1_doses)));
    out.push_str(&format!("Drug2 doses: {}\n", format_doses(&matrices.drug2_doses)));
    out
}

fn write_delimited(
    file_path: &Path,
    delimiter: u8,
    data: &LoadedCombination,
    command_line: &str,
) -> Result<()> {
    let file = File::create(file_path)?;
    let mut writer = BufWriter::new(file);

    // Write command header
    writeln!(writer, "# Command: {}", command_line)?;
    writeln!(writer, "# Generated: {}", generated_at())?;
    writeln!(writer, "# combosyn v{}", env!("CARGO_PKG_VERSION"))?;
    writeln!(
        writer,
        "# Sample: {} Drug1: {} Drug2: {} Study: {}",
        data.sample, data.drug1, data.drug2, data.study
    )?;

    let mut table = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);
    table.write_record(["Dose1", "Dose2", "Growth", "ExpectedGrowth", "Score", "Study"])?;
    for row in &data.combo {
        table.write_record([
            row.dose1.to_string(),
            row.dose2.to_string(),
            row.growth.to_string(),
            row.expected_growth.to_string(),
            row.score.to_string(),
            row.study.clone(),
        ])?;
    }
    table.flush()?;
    Ok(())
}

fn write_json(
    file_path: &Path,
    data: &LoadedCombination,
    matrices: &SynergyMatrices,
    command_line: &str,
) -> Result<()> {
    let file = File::create(file_path)?;
    let mut writer = BufWriter::new(file);
    let report = JsonReport {
        version: env!("CARGO_PKG_VERSION"),
        generated: generated_at(),
        command: command_line,
        combination: data,
        matrices,
    };
    serde_json::to_writer_pretty(&mut writer, &report)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Write the report in the specified format
pub fn write_report(
    file_path: &Path,
    format: OutputFormat,
    data: &LoadedCombination,
    matrices: &SynergyMatrices,
    command_line: &str,
) -> Result<()> {
    ensure_parent_dir(file_path)?;
    match format {
        OutputFormat::Tsv => write_delimited(file_path, b'\t', data, command_line)?,
        OutputFormat::Csv => write_delimited(file_path, b',', data, command_line)?,
        OutputFormat::Json => write_json(file_path, data, matrices, command_line)?,
    }
    tracing::info!(
        path = %file_path.display(),
        format = format.description(),
        rows = data.combo.len(),
        "report written"
    );
    Ok(())
}
