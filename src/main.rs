use anyhow::Result;
use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueEnum};
use log_tally::commands;
use log_tally::config::PipelineConfig;
use log_tally::logging;
use log_tally::pipeline::entry::Level;
use log_tally::pipeline::sink::Destination;
use log_tally::utils::parallel::DEFAULT_CHUNK_SIZE;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "log-tally")]
#[command(about = "Count log entries per timestamp, in parallel", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase diagnostic output (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count entries at one level, grouped by timestamp
    Count {
        /// Path to log file(s) - can specify multiple files (.gz and .zst supported)
        #[arg(required = true)]
        log_files: Vec<String>,

        /// Severity level to count
        #[arg(short, long, value_enum, default_value = "error")]
        level: LevelArg,

        /// Output file path (prints to stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Number of worker threads (defaults to one per core)
        #[arg(long)]
        threads: Option<usize>,

        /// Lines per parallel batch
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,

        /// Write a JSON run summary to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Count valid entries per severity level
    Levels {
        /// Path to log file(s) - can specify multiple files (.gz and .zst supported)
        #[arg(required = true)]
        log_files: Vec<String>,

        /// Output file path (prints to stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Number of worker threads (defaults to one per core)
        #[arg(long)]
        threads: Option<usize>,
    },

    /// Generate shell completion scripts
    GenerateCompletion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LevelArg {
    Info,
    Warn,
    Error,
    Unknown,
}

impl From<LevelArg> for Level {
    fn from(arg: LevelArg) -> Self {
        match arg {
            LevelArg::Info => Self::Info,
            LevelArg::Warn => Self::Warn,
            LevelArg::Error => Self::Error,
            LevelArg::Unknown => Self::Unknown,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match cli.command {
        Commands::Count {
            log_files,
            level,
            output,
            threads,
            chunk_size,
            report,
        } => {
            let mut config =
                PipelineConfig::new(level.into(), Destination::from_option(output.as_deref()));
            config.threads = threads;
            config.chunk_size = chunk_size;
            config.report = report;
            commands::count::run(&log_files, &config).map(|_| ())
        }
        Commands::Levels {
            log_files,
            output,
            threads,
        } => commands::levels::run(&log_files, output.as_deref(), threads).map(|_| ()),
        Commands::GenerateCompletion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "log-tally", &mut std::io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_count_defaults() {
        let cli = Cli::try_parse_from(["log-tally", "count", "a.log", "b.log.gz"]).unwrap();
        match cli.command {
            Commands::Count {
                log_files,
                level,
                output,
                threads,
                chunk_size,
                report,
            } => {
                assert_eq!(log_files, vec!["a.log", "b.log.gz"]);
                assert_eq!(Level::from(level), Level::Error);
                assert!(output.is_none());
                assert!(threads.is_none());
                assert_eq!(chunk_size, DEFAULT_CHUNK_SIZE);
                assert!(report.is_none());
            }
            _ => panic!("expected count"),
        }
    }

    #[test]
    fn test_count_requires_files() {
        assert!(Cli::try_parse_from(["log-tally", "count"]).is_err());
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["log-tally", "levels", "a.log", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
