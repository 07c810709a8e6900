//! Arguments for a sync run: what to mirror, where, and how to select images.

use clap::{Args, ValueEnum};
use ril_core::{FilterConfig, Orientation, SortMode};
use std::path::PathBuf;

/// Image orientation accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Default)]
pub enum OrientationArg {
    /// Keep images at least as wide as they are tall (default)
    #[default]
    Landscape,
    /// Keep images at least as tall as they are wide
    Portrait,
    /// Keep everything
    Any,
}

impl From<OrientationArg> for Option<Orientation> {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Landscape => Some(Orientation::Landscape),
            OrientationArg::Portrait => Some(Orientation::Portrait),
            OrientationArg::Any => None,
        }
    }
}

/// Listing order flags; at most one may be given.
#[derive(Args, Debug, Default)]
#[group(id = "sort", multiple = false)]
pub struct SortFlags {
    /// Newest posts first
    #[arg(short = 'N', long)]
    pub new: bool,

    /// Hot posts
    #[arg(short = 'H', long)]
    pub hot: bool,

    /// Top posts
    #[arg(short = 'T', long)]
    pub top: bool,

    /// Random posts
    #[arg(short = 'R', long)]
    pub random: bool,
}

impl SortFlags {
    /// The selected mode, `None` for the feed default.
    pub fn mode(&self) -> Option<SortMode> {
        if self.new {
            Some(SortMode::New)
        } else if self.hot {
            Some(SortMode::Hot)
        } else if self.top {
            Some(SortMode::Top)
        } else if self.random {
            Some(SortMode::Random)
        } else {
            None
        }
    }
}

/// Arguments for mirroring one subreddit into one folder.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Subreddit to load images from
    pub subreddit: String,

    /// Folder the images are stored in (created if missing)
    pub target_folder: PathBuf,

    /// Number of images to keep
    #[arg(short, long, default_value_t = 10)]
    pub limit: usize,

    #[command(flatten)]
    pub sort: SortFlags,

    /// Which image orientation to keep
    #[arg(short, long, value_enum, default_value = "landscape")]
    pub orientation: OrientationArg,

    /// Keep running and repeat the sync periodically
    #[arg(short, long)]
    pub daemonize: bool,

    /// Seconds between syncs in daemon mode (overrides the config file)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,
}

impl SyncArgs {
    pub fn filter(&self) -> FilterConfig {
        FilterConfig::new(self.limit, self.sort.mode(), self.orientation.into())
    }
}
