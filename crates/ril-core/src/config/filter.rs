//! Per-run selection settings: how many images, which listing, which shape.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Listing order requested from the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    New,
    Hot,
    Top,
    Random,
}

impl SortMode {
    /// Path segment used in the feed URL.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::New => "new",
            SortMode::Hot => "hot",
            SortMode::Top => "top",
            SortMode::Random => "random",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "new" => Ok(SortMode::New),
            "hot" => Ok(SortMode::Hot),
            "top" => Ok(SortMode::Top),
            "random" => Ok(SortMode::Random),
            _ => Err(ConfigError::InvalidSort(s.to_string())),
        }
    }
}

/// Image shape to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Wider than tall (squares pass)
    Landscape,
    /// Taller than wide (squares pass)
    Portrait,
}

impl Orientation {
    /// Whether an image of the given dimensions has this orientation.
    pub fn accepts(&self, width: u32, height: u32) -> bool {
        match self {
            Orientation::Landscape => height <= width,
            Orientation::Portrait => height >= width,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Landscape => f.write_str("landscape"),
            Orientation::Portrait => f.write_str("portrait"),
        }
    }
}

impl FromStr for Orientation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "landscape" => Ok(Orientation::Landscape),
            "portrait" => Ok(Orientation::Portrait),
            _ => Err(ConfigError::InvalidOrientation(s.to_string())),
        }
    }
}

/// Immutable selection settings for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterConfig {
    limit: usize,
    sort: Option<SortMode>,
    orientation: Option<Orientation>,
}

impl FilterConfig {
    pub fn new(limit: usize, sort: Option<SortMode>, orientation: Option<Orientation>) -> Self {
        Self {
            limit,
            sort,
            orientation,
        }
    }

    /// Build from loosely typed input, rejecting unknown sort or orientation names.
    pub fn parse(
        limit: usize,
        sort: Option<&str>,
        orientation: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let sort = sort.map(SortMode::from_str).transpose()?;
        let orientation = orientation.map(Orientation::from_str).transpose()?;
        Ok(Self::new(limit, sort, orientation))
    }

    /// Maximum number of images kept.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Listing order, `None` for the feed default.
    pub fn sort(&self) -> Option<SortMode> {
        self.sort
    }

    /// Orientation filter, `None` keeps everything.
    pub fn orientation(&self) -> Option<Orientation> {
        self.orientation
    }

    /// Whether an image of the given dimensions passes the orientation filter.
    pub fn accepts(&self, width: u32, height: u32) -> bool {
        self.orientation
            .map_or(true, |orientation| orientation.accepts(width, height))
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::new(10, None, Some(Orientation::Landscape))
    }
}
