//! Grid settings that govern auto column sizing.
//!
//! Settings use the grid's JSON shape (camelCase keys):
//!
//! ```json
//! { "autoColumnSize": { "syncLimit": "25%", "useHeaders": true }, "colWidths": null }
//! ```
//!
//! `autoColumnSize` may also be a plain boolean. Auto-sizing and static
//! `colWidths` are mutually exclusive: configuring either static widths or
//! `autoColumnSize: false` turns the feature off.

use serde::{Deserialize, Serialize};

use crate::error::{ColsizeError, Result};
use crate::sampling::{LengthSampler, SAMPLE_COUNT};

/// Top-level grid settings consulted by the sizing plugin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSettings {
    #[serde(default)]
    pub auto_column_size: AutoColumnSizeSetting,
    #[serde(default)]
    pub col_widths: Option<ColWidths>,
}

/// `autoColumnSize`: an on/off switch or an options object (which implies on).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AutoColumnSizeSetting {
    Toggle(bool),
    Options(AutoSizeOptions),
}

impl Default for AutoColumnSizeSetting {
    fn default() -> Self {
        Self::Toggle(true)
    }
}

/// Static column widths: one width for all columns or one per column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColWidths {
    Uniform(f32),
    PerColumn(Vec<f32>),
}

impl ColWidths {
    /// Configured width of `col`, if any.
    pub fn width_of(&self, col: u32) -> Option<f32> {
        match self {
            Self::Uniform(w) => Some(*w),
            Self::PerColumn(widths) => widths.get(col as usize).copied(),
        }
    }
}

/// Tuning options for auto-sizing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutoSizeOptions {
    /// Columns measured synchronously on the first full calculation, before
    /// the rest is spread across frames.
    pub sync_limit: Option<SyncLimit>,
    /// Also measure column header labels.
    pub use_headers: bool,
    /// Samples kept per distinct value length.
    pub sampling_ratio: Option<usize>,
    /// Keep repeated values as separate samples.
    pub allow_sample_duplicates: bool,
}

impl AutoSizeOptions {
    /// Build the sampler described by these options.
    pub fn sampler(&self) -> LengthSampler {
        LengthSampler::new(
            self.sampling_ratio.unwrap_or(SAMPLE_COUNT),
            self.allow_sample_duplicates,
        )
    }
}

/// A sync limit given as a column count or a percentage string (`"50%"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SyncLimit {
    Count(u32),
    Percent(String),
}

impl SyncLimit {
    /// Resolve to the last column index measured synchronously, never past
    /// `last_col`. Percentages are taken of `last_col` and rounded down.
    ///
    /// # Errors
    /// Returns [`ColsizeError::InvalidSyncLimit`] for a malformed percentage.
    pub fn resolve(&self, last_col: u32) -> Result<u32> {
        let limit = match self {
            Self::Count(n) => *n,
            Self::Percent(raw) => {
                let pct: u64 = raw
                    .trim()
                    .trim_end_matches('%')
                    .trim()
                    .parse()
                    .map_err(|_| ColsizeError::InvalidSyncLimit(raw.clone()))?;
                let scaled = u64::from(last_col).saturating_mul(pct) / 100;
                u32::try_from(scaled).unwrap_or(u32::MAX)
            }
        };
        Ok(limit.min(last_col))
    }
}

impl GridSettings {
    /// Parse and validate settings JSON.
    ///
    /// # Errors
    /// Malformed JSON or an invalid sync limit.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check values serde cannot check on its own.
    ///
    /// # Errors
    /// Returns [`ColsizeError::InvalidSyncLimit`] for a malformed percentage.
    pub fn validate(&self) -> Result<()> {
        if let Some(limit) = self.options().sync_limit {
            limit.resolve(0)?;
        }
        Ok(())
    }

    /// True if `autoColumnSize` is explicitly `false`.
    pub fn is_auto_size_disabled(&self) -> bool {
        matches!(self.auto_column_size, AutoColumnSizeSetting::Toggle(false))
    }

    /// True if static column widths are configured.
    pub fn has_static_column_widths(&self) -> bool {
        self.col_widths.is_some()
    }

    /// Whether the auto-sizing plugin should be active.
    pub fn is_auto_size_enabled(&self) -> bool {
        !self.is_auto_size_disabled() && !self.has_static_column_widths()
    }

    /// Tuning options (defaults when `autoColumnSize` is a boolean).
    pub fn options(&self) -> AutoSizeOptions {
        match &self.auto_column_size {
            AutoColumnSizeSetting::Options(options) => options.clone(),
            AutoColumnSizeSetting::Toggle(_) => AutoSizeOptions::default(),
        }
    }
}
