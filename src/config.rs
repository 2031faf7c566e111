use std::fmt;
use std::str::FromStr;

use crate::error::{check_grid_size, RegionResult};
use crate::region::{Label, RegionStore};

/// Representation behind a region set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Backing {
    /// Rectangle list per label. Cheap for few, large regions.
    #[default]
    Sparse,
    /// Owner per grid cell. Cheap overlap queries on small or crowded grids.
    Dense,
}

impl Backing {
    pub const ALL: [Backing; 2] = [Backing::Sparse, Backing::Dense];

    pub fn name(self) -> &'static str {
        match self {
            Backing::Sparse => "sparse",
            Backing::Dense => "dense",
        }
    }
}

impl fmt::Display for Backing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown backing {0:?}, expected \"sparse\" or \"dense\"")]
pub struct UnknownBacking(pub String);

impl FromStr for Backing {
    type Err = UnknownBacking;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sparse" => Ok(Backing::Sparse),
            "dense" => Ok(Backing::Dense),
            _ => Err(UnknownBacking(s.to_string())),
        }
    }
}

/// Grid configuration (pure Rust, no file format).
///
/// The backing is fixed once a container is built from the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    /// Rows and columns of the grid. Must be positive.
    pub grid_size: i32,

    pub backing: Backing,
}

impl GridConfig {
    pub fn new(grid_size: i32) -> Self {
        Self {
            grid_size,
            backing: Backing::default(),
        }
    }

    pub fn with_backing(mut self, backing: Backing) -> Self {
        self.backing = backing;
        self
    }

    pub fn validate(&self) -> RegionResult<()> {
        check_grid_size(self.grid_size)
    }

    /// An empty region set with the configured backing.
    pub fn region_set<L: Label>(&self) -> RegionResult<RegionStore<L>> {
        RegionStore::from_config(self)
    }
}
