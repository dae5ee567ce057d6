#![forbid(unsafe_code)]

//! Chart configuration.
//!
//! Values come from, in increasing precedence: [`ChartConfig::default`], a
//! JSON document ([`ChartConfig::from_json_str`]), environment variables
//! ([`ChartConfig::overlay_env_with`]), and explicit builder calls. Every
//! path ends in [`ChartConfig::validated`].

use pedigree_layout::{DEFAULT_UNIT_WIDTH, DEFAULT_VERTICAL_SPACING, PedigreeLayout};
use serde::{Deserialize, Serialize};

/// Default depth ceiling: parents may not land on generation 9 or deeper.
pub const DEFAULT_MAX_GENERATIONS: u32 = 9;

/// Largest accepted depth ceiling. A full chart holds `2^n - 1` people.
pub const MAX_GENERATIONS_LIMIT: u32 = 16;

/// Default label of the seed individual.
pub const DEFAULT_ROOT_LABEL: &str = "Child";

/// Env var overriding [`ChartConfig::max_generations`].
pub const ENV_MAX_GENERATIONS: &str = "PEDIGREE_MAX_GENERATIONS";
/// Env var overriding [`ChartConfig::unit_width`].
pub const ENV_UNIT_WIDTH: &str = "PEDIGREE_UNIT_WIDTH";
/// Env var overriding [`ChartConfig::vertical_spacing`].
pub const ENV_VERTICAL_SPACING: &str = "PEDIGREE_VERTICAL_SPACING";
/// Env var overriding [`ChartConfig::root_label`].
pub const ENV_ROOT_LABEL: &str = "PEDIGREE_ROOT_LABEL";

/// Tunables of a pedigree chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Number of generations the chart may hold, root included.
    pub max_generations: u32,
    /// Column width of one node on the deepest generation.
    pub unit_width: f64,
    /// Distance between generations.
    pub vertical_spacing: f64,
    /// Label given to the seed individual.
    pub root_label: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            max_generations: DEFAULT_MAX_GENERATIONS,
            unit_width: DEFAULT_UNIT_WIDTH,
            vertical_spacing: DEFAULT_VERTICAL_SPACING,
            root_label: DEFAULT_ROOT_LABEL.to_owned(),
        }
    }
}

impl ChartConfig {
    /// Set the depth ceiling.
    #[must_use]
    pub fn with_max_generations(mut self, max_generations: u32) -> Self {
        self.max_generations = max_generations;
        self
    }

    /// Set the seed label.
    #[must_use]
    pub fn with_root_label(mut self, label: impl Into<String>) -> Self {
        self.root_label = label.into();
        self
    }

    /// Set the column width.
    #[must_use]
    pub fn with_unit_width(mut self, unit_width: f64) -> Self {
        self.unit_width = unit_width;
        self
    }

    /// Set the generation spacing.
    #[must_use]
    pub fn with_vertical_spacing(mut self, vertical_spacing: f64) -> Self {
        self.vertical_spacing = vertical_spacing;
        self
    }

    /// Overlay values from an environment lookup.
    ///
    /// Reads:
    /// - `PEDIGREE_MAX_GENERATIONS`: depth ceiling
    /// - `PEDIGREE_UNIT_WIDTH`: column width
    /// - `PEDIGREE_VERTICAL_SPACING`: generation spacing
    /// - `PEDIGREE_ROOT_LABEL`: seed label
    ///
    /// Unparsable values are ignored.
    #[must_use]
    pub fn overlay_env_with<F>(mut self, get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = get_env(ENV_MAX_GENERATIONS)
            && let Ok(n) = val.trim().parse::<u32>()
        {
            self.max_generations = n;
        }

        if let Some(val) = get_env(ENV_UNIT_WIDTH)
            && let Ok(w) = val.trim().parse::<f64>()
        {
            self.unit_width = w;
        }

        if let Some(val) = get_env(ENV_VERTICAL_SPACING)
            && let Ok(v) = val.trim().parse::<f64>()
        {
            self.vertical_spacing = v;
        }

        if let Some(val) = get_env(ENV_ROOT_LABEL)
            && !val.trim().is_empty()
        {
            self.root_label = val.trim().to_owned();
        }

        self.validated()
    }

    /// Parse a JSON document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let config: ChartConfig = serde_json::from_str(json)?;
        Ok(config.validated())
    }

    /// Clamp values to safe ranges.
    ///
    /// - `max_generations` to `1..=MAX_GENERATIONS_LIMIT`
    /// - non-finite or non-positive spacing back to the defaults
    /// - blank root label back to [`DEFAULT_ROOT_LABEL`]
    #[must_use]
    pub fn validated(mut self) -> Self {
        self.max_generations = self.max_generations.clamp(1, MAX_GENERATIONS_LIMIT);
        if !(self.unit_width.is_finite() && self.unit_width > 0.0) {
            self.unit_width = DEFAULT_UNIT_WIDTH;
        }
        if !(self.vertical_spacing.is_finite() && self.vertical_spacing > 0.0) {
            self.vertical_spacing = DEFAULT_VERTICAL_SPACING;
        }
        let trimmed = self.root_label.trim();
        self.root_label = if trimmed.is_empty() {
            DEFAULT_ROOT_LABEL.to_owned()
        } else {
            trimmed.to_owned()
        };
        self
    }

    /// Layout solver configured with this chart's spacing.
    #[must_use]
    pub fn layout(&self) -> PedigreeLayout {
        PedigreeLayout::new()
            .unit_width(self.unit_width)
            .vertical_spacing(self.vertical_spacing)
    }
}
