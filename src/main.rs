use bitbench::cli::{self, Args};
use bitbench::core::config::{self, CliOverrides, ResolvedConfig};
use bitbench::core::modules;
use bitbench::tui;
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::{self, OpenOptions};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("bitbench: {e}; using defaults");
            Default::default()
        }
    };
    let overrides = CliOverrides {
        log_level: args.log_level.clone(),
        strict_boolean: args.strict.then_some(true),
    };
    let resolved = config::resolve(&file_config, &overrides);

    match args.command {
        Some(command) => {
            // One-shot commands only record problems
            init_logging(&resolved, resolved.log_level.min(LevelFilter::Warn));
            match cli::execute(&command, &resolved) {
                Ok(output) => {
                    println!("{output}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    log::warn!("{:?} failed: {}", command, e);
                    eprintln!("bitbench: {e}");
                    ExitCode::FAILURE
                }
            }
        }
        None => {
            init_logging(&resolved, resolved.log_level);
            log::info!("bitbench starting up");
            let layout = modules::load_layout();
            match tui::run(resolved, layout) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("bitbench: {e}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}

/// Append to the configured log file. Logging is skipped when the file
/// cannot be opened.
fn init_logging(config: &ResolvedConfig, level: LevelFilter) {
    let Some(path) = config.log_file.as_ref() else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = OpenOptions::new().create(true).append(true).open(path) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }
}
