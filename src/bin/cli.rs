//! trackalign CLI - Convert band activity exports to GPX/TCX
//!
//! Usage:
//!   trackalign-cli gpx <summary> <detail> <output> [--fix-gaps]
//!   trackalign-cli tcx <summary> <detail> <output> [--fix-gaps]
//!
//! The summary and detail files are the two JSON documents produced by the
//! band sync service for one activity; they are merged (detail values win)
//! before conversion.

use clap::{Parser, Subcommand};
use log::{error, info};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use trackalign::{
    align_track, merge_documents, track_points, write_gpx, write_tcx, Activity, ExportConfig,
    Result,
};

#[derive(Parser)]
#[command(name = "trackalign-cli")]
#[command(about = "Convert band activity exports to GPX/TCX", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Redistribute spurious recording gaps to match the activity duration
    #[arg(long, global = true)]
    fix_gaps: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Export an activity as GPX 1.1
    Gpx {
        /// Summary JSON document (scalar stats)
        summary: PathBuf,
        /// Detail JSON document (raw channel strings)
        detail: PathBuf,
        /// Output file
        output: PathBuf,
    },
    /// Export an activity as TCX
    Tcx {
        /// Summary JSON document (scalar stats)
        summary: PathBuf,
        /// Detail JSON document (raw channel strings)
        detail: PathBuf,
        /// Output file
        output: PathBuf,
    },
}

enum Format {
    Gpx,
    Tcx,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();

    let cli = Cli::parse();
    let config = ExportConfig {
        fix_time_gaps: cli.fix_gaps,
    };

    let result = match cli.command {
        Commands::Gpx {
            summary,
            detail,
            output,
        } => run(&summary, &detail, &output, &config, Format::Gpx),
        Commands::Tcx {
            summary,
            detail,
            output,
        } => run(&summary, &detail, &output, &config, Format::Tcx),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("export failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(
    summary: &Path,
    detail: &Path,
    output: &Path,
    config: &ExportConfig,
    format: Format,
) -> Result<()> {
    let activity = load_activity(summary, detail)?;
    let aligned = align_track(&activity, config);
    let points = track_points(&aligned, activity.start_time);
    info!(
        "aligned {} trackpoints for activity {}",
        points.len(),
        activity.start_time
    );

    let mut writer = BufWriter::new(File::create(output)?);
    match format {
        Format::Gpx => write_gpx(&mut writer, &activity, &points)?,
        Format::Tcx => write_tcx(&mut writer, &activity, &points)?,
    }
    writer.flush()?;
    info!("wrote {}", output.display());
    Ok(())
}

fn load_activity(summary: &Path, detail: &Path) -> Result<Activity> {
    let mut document: serde_json::Value = serde_json::from_reader(BufReader::new(File::open(detail)?))?;
    let summary: serde_json::Value = serde_json::from_reader(BufReader::new(File::open(summary)?))?;
    merge_documents(&mut document, &summary);
    Activity::from_json(&document)
}
