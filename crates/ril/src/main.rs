//! ril - keep a folder in sync with the images of a subreddit.
//!
//! Pages through a subreddit listing until enough images of the wanted
//! orientation are found, deletes files in the folder that are no longer
//! part of the selection, and downloads the rest resized to a fixed width.
//!
//! # Usage
//!
//! ```bash
//! # Ten newest landscape images
//! ril earthporn ~/Wallpapers --new
//!
//! # Twenty-five top portrait images, refreshed every hour
//! ril phonewallpapers ~/Phone -l 25 --top -o portrait --daemonize
//!
//! # Custom config and a log file
//! ril pics ./pics -c ./ril.toml --logfile ./ril.log
//! ```

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

mod cli;
mod logging;
mod shutdown;

/// ril - mirror a subreddit's images into a folder.
#[derive(Parser, Debug)]
#[command(name = "ril")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    sync: cli::SyncArgs,

    /// Config file (defaults to the platform config directory)
    #[arg(short, long, env = "RIL_CONFIG")]
    config: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long)]
    logfile: Option<PathBuf>,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            let path = ril_core::config::expand_path(path);
            ril_core::Config::load_from(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?
        }
        None => ril_core::Config::load().with_context(|| {
            format!(
                "Failed to load config from {}",
                ril_core::Config::default_path().display()
            )
        })?,
    };

    let settings = logging::LogSettings::resolve(
        &config,
        cli.verbose,
        cli.json_logs,
        cli.logfile.as_deref(),
        std::env::var_os("DEBUG").is_some(),
    );
    logging::init(&settings).context("Failed to initialize logging")?;

    tracing::debug!("ril v{}", ril_core::VERSION);

    cli::run::execute(cli.sync, config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use cli::args::OrientationArg;
    use ril_core::{Orientation, SortMode};

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("ril").chain(args.iter().copied()))
    }

    #[test]
    fn test_positional_arguments_and_defaults() {
        let cli = parse(&["pics", "/tmp/wall"]).unwrap();
        assert_eq!(cli.sync.subreddit, "pics");
        assert_eq!(cli.sync.target_folder, PathBuf::from("/tmp/wall"));
        assert_eq!(cli.sync.limit, 10);
        assert_eq!(cli.sync.orientation, OrientationArg::Landscape);
        assert!(!cli.sync.daemonize);

        let filter = cli.sync.filter();
        assert_eq!(filter.sort(), None);
        assert_eq!(filter.orientation(), Some(Orientation::Landscape));
    }

    #[test]
    fn test_short_flags() {
        let cli = parse(&["pics", "out", "-l", "25", "-T", "-o", "portrait", "-d"]).unwrap();
        let filter = cli.sync.filter();
        assert_eq!(filter.limit(), 25);
        assert_eq!(filter.sort(), Some(SortMode::Top));
        assert_eq!(filter.orientation(), Some(Orientation::Portrait));
        assert!(cli.sync.daemonize);
    }

    #[test]
    fn test_each_sort_flag() {
        for (flag, mode) in [
            ("--new", SortMode::New),
            ("--hot", SortMode::Hot),
            ("--top", SortMode::Top),
            ("--random", SortMode::Random),
        ] {
            let cli = parse(&["pics", "out", flag]).unwrap();
            assert_eq!(cli.sync.sort.mode(), Some(mode));
        }
    }

    #[test]
    fn test_sort_flags_are_exclusive() {
        let err = parse(&["pics", "out", "--new", "--hot"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_any_orientation_disables_filter() {
        let cli = parse(&["pics", "out", "--orientation", "any"]).unwrap();
        assert_eq!(cli.sync.filter().orientation(), None);
    }

    #[test]
    fn test_rejects_unknown_orientation_and_zero_interval() {
        assert!(parse(&["pics", "out", "-o", "diagonal"]).is_err());
        assert!(parse(&["pics", "out", "--interval", "0"]).is_err());
    }

    #[test]
    fn test_logging_and_config_flags() {
        let cli = parse(&[
            "pics",
            "out",
            "--logfile",
            "/tmp/ril.log",
            "-c",
            "/tmp/ril.toml",
            "-v",
            "--json-logs",
            "--interval",
            "600",
        ])
        .unwrap();
        assert_eq!(cli.logfile, Some(PathBuf::from("/tmp/ril.log")));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/ril.toml")));
        assert!(cli.verbose);
        assert!(cli.json_logs);
        assert_eq!(cli.sync.interval, Some(600));
    }

    #[test]
    fn test_missing_target_folder_is_an_error() {
        assert!(parse(&["pics"]).is_err());
    }
}
