mod bootstrap;
mod interactive;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use tally_core::settings::{ReportArgs, RunMode, Settings};
use tally_data::discovery::expand_archive_args;
use tally_runtime::pipeline::{PipelineConfig, TallyPipeline};

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("clicker-tally v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Format: {}, Separator: {:?}",
        settings.report().format,
        settings.report().separator
    );

    let cwd = std::env::current_dir()?;

    let config = match &settings.mode {
        RunMode::Interactive(report) => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut prompts = io::stderr();
            let selection = interactive::run_prompts(&cwd, &mut input, &mut prompts)?;
            pipeline_config(selection.roster, selection.archives, report)
        }

        RunMode::Standard(args) => {
            let archives = expand_archive_args(&args.clickerfiles, &cwd)?;
            tracing::info!(
                "Session files: {}",
                archives
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            pipeline_config(cwd.join(&args.roster), archives, &args.report)
        }
    };

    TallyPipeline::new(config).run()?;

    Ok(())
}

fn pipeline_config(roster: PathBuf, archives: Vec<PathBuf>, report: &ReportArgs) -> PipelineConfig {
    PipelineConfig {
        roster,
        archives,
        format: report.format,
        separator: report.separator.clone(),
        output: report.output.clone(),
        scratch_parent: None,
    }
}
