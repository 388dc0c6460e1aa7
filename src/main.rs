// main.rs - CLI entry point

use std::time::Instant;

use combosyn::core::{resolve_cell, resolve_drug, select};
use combosyn::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }
}

/// RUST_LOG wins; otherwise the configured level. Logs go to stderr.
fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| SynergyError::Logging(e.to_string()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| SynergyError::Logging(e.to_string()))
}

fn run_main() -> Result<()> {
    let mut args: Args = argh::from_env();
    let command_line = std::env::args().collect::<Vec<String>>().join(" ");

    // Handle generate config first
    if args.generate_config {
        println!("{}", Config::generate_sample());
        println!("# Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
    }

    init_logging(&args.log_level)?;
    tracing::info!("{}", combosyn::get_info());
    if let Some(config_path) = &args.config {
        tracing::info!(path = %config_path, "configuration applied");
    }

    let validation = validate_args(&args)?;
    let total_start = Instant::now();

    let response = DoseResponseTable::from_file(&validation.response)?;
    let cells = CellTable::from_file(&validation.cells)?;
    let drugs = DrugTable::from_file(&validation.drugs)?;

    if args.dry_run {
        let sample = resolve_cell(&validation.cell, &cells)?;
        let drug1 = resolve_drug(&validation.drug1, &drugs)?;
        let drug2 = resolve_drug(&validation.drug2, &drugs)?;
        let selection = select(&sample, &drug1, &drug2, &response)?;
        println!(
            "Dry run: {} -> {}, {} -> {}, {} -> {}",
            validation.cell, sample, validation.drug1, drug1, validation.drug2, drug2
        );
        println!(
            "{} combination records for {} + {} in study {}{}",
            selection.combo.len(),
            selection.drug1,
            selection.drug2,
            selection.study,
            if selection.swapped { " (drug order swapped)" } else { "" }
        );
        return Ok(());
    }

    let data = load_data(
        &validation.cell,
        &validation.drug1,
        &validation.drug2,
        &response,
        &cells,
        &drugs,
    )?;
    tracing::info!(
        sample = %data.sample,
        drug1 = %data.drug1,
        drug2 = %data.drug2,
        study = %data.study,
        swapped = data.swapped,
        pairs = data.combo.len(),
        "combination scored"
    );

    let matrices = SynergyMatrices::from_combination(&data)?;
    print!("{}", render_report(&data, &matrices));

    if let Some(output) = &validation.output {
        write_report(output, validation.format, &data, &matrices, &command_line)?;
    }

    tracing::info!(
        elapsed_secs = total_start.elapsed().as_secs_f64(),
        "done"
    );
    Ok(())
}
