use anyhow::{Context, Result};
use clap::Parser;
use quizblock_config::Config;
use quizblock_engine::{
    convert_csv_file, convert_directory, convert_text_file, io, parsing::TextOptions,
    resegment_file,
};
use std::path::Path;
use std::process;

mod args;
mod ui;

use args::{Cli, Commands};
use ui::FormMode;

fn main() {
    let cli = Cli::parse();

    // The form builders draw on the terminal, so they run without a logger
    if !matches!(cli.command, Commands::Form { .. } | Commands::Session { .. }) {
        let level = if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };
        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load_or_default()
        .with_context(|| format!("Using config path {}", Config::config_path().display()))?;

    match cli.command {
        Commands::Convert { input, output } => {
            let output = output.unwrap_or_else(|| io::converted_path(&input, &config.output_dir));
            let report = convert_csv_file(&input, &output)?;
            println!("{}: {}", output.display(), report.summary());
        }
        Commands::ConvertDir {
            input_dir,
            output_dir,
        } => {
            let output_dir = output_dir.unwrap_or(config.output_dir);
            let report = convert_directory(&input_dir, &output_dir)?;
            for (input, file_report) in &report.converted {
                println!("{}: {}", input.display(), file_report.summary());
            }
            for (input, e) in &report.failed {
                eprintln!("{}: failed: {e}", input.display());
            }
            if !report.is_success() {
                let total = report.converted.len() + report.failed.len();
                anyhow::bail!("{} of {total} files failed", report.failed.len());
            }
        }
        Commands::Text {
            input,
            output,
            prefix,
        } => {
            let options = TextOptions {
                id_prefix: prefix.unwrap_or(config.text_id_prefix),
                points: config.text_points,
                difficulty: config.text_difficulty,
            };
            let output = output.unwrap_or_else(|| io::converted_path(&input, &config.output_dir));
            let report = convert_text_file(&input, &output, &options)?;
            println!("{}: {}", output.display(), report.summary());
        }
        Commands::Resegment {
            input,
            output,
            marker,
        } => {
            let marker = marker.unwrap_or(config.block_marker);
            let blocks = resegment_file(&input, &output, &marker)?;
            println!("{}: {blocks} blocks", output.display());
        }
        Commands::Form { output_dir } => {
            run_form(FormMode::Single, &output_dir.unwrap_or(config.output_dir))?;
        }
        Commands::Session { output_dir } => {
            run_form(FormMode::Session, &output_dir.unwrap_or(config.output_dir))?;
        }
    }

    Ok(())
}

fn run_form(mode: FormMode, output_dir: &Path) -> Result<()> {
    let exports = ui::run(mode, output_dir.to_path_buf())?;
    for path in exports {
        println!("Exported {}", path.display());
    }
    Ok(())
}
