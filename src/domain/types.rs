//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during generation
//! - exported to CSV/JSON
//! - read back for inspection or response recovery

use std::path::PathBuf;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Sales regions of the panel.
///
/// Declaration order is the generation order (and the order region effects are
/// drawn in). Output ordering uses [`Region::label`], not this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Northeast,
    Southeast,
    Midwest,
    Southwest,
    West,
    Northwest,
    Mountain,
    Pacific,
    #[serde(rename = "Great Lakes")]
    GreatLakes,
    #[serde(rename = "Mid-Atlantic")]
    MidAtlantic,
    #[serde(rename = "Gulf Coast")]
    GulfCoast,
    Plains,
}

impl Region {
    pub const COUNT: usize = 12;

    pub const ALL: [Region; Region::COUNT] = [
        Region::Northeast,
        Region::Southeast,
        Region::Midwest,
        Region::Southwest,
        Region::West,
        Region::Northwest,
        Region::Mountain,
        Region::Pacific,
        Region::GreatLakes,
        Region::MidAtlantic,
        Region::GulfCoast,
        Region::Plains,
    ];

    /// Label as written to the panel CSV.
    pub fn label(self) -> &'static str {
        match self {
            Region::Northeast => "Northeast",
            Region::Southeast => "Southeast",
            Region::Midwest => "Midwest",
            Region::Southwest => "Southwest",
            Region::West => "West",
            Region::Northwest => "Northwest",
            Region::Mountain => "Mountain",
            Region::Pacific => "Pacific",
            Region::GreatLakes => "Great Lakes",
            Region::MidAtlantic => "Mid-Atlantic",
            Region::GulfCoast => "Gulf Coast",
            Region::Plains => "Plains",
        }
    }

    /// Position in [`Region::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Default climate offset (degrees F) relative to the global mean temperature.
    pub fn default_temperature_offset(self) -> f64 {
        match self {
            Region::Northeast => -5.0,
            Region::Southeast => 8.0,
            Region::Midwest => -3.0,
            Region::Southwest => 10.0,
            Region::West => 4.0,
            Region::Northwest => -4.0,
            Region::Mountain => -6.0,
            Region::Pacific => 3.0,
            Region::GreatLakes => -7.0,
            Region::MidAtlantic => 0.0,
            Region::GulfCoast => 9.0,
            Region::Plains => -2.0,
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Half-open uniform interval `[low, high)` used for spend draws and multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UniformRange {
    pub low: f64,
    pub high: f64,
}

impl UniformRange {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn is_valid(&self) -> bool {
        self.low.is_finite() && self.high.is_finite() && self.high > self.low
    }
}

/// Per-channel `log1p` response weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelWeights {
    pub tv: f64,
    pub digital: f64,
    pub outdoor: f64,
    pub retail: f64,
}

/// Coefficients of the closed-form sales response function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseParams {
    pub weights: ChannelWeights,
    /// Slope on `avg_temp - temp_reference`.
    pub weather_coef: f64,
    pub temp_reference: f64,
    /// Added when `holiday == 1`.
    pub holiday_bonus: f64,
    /// Slope on `pepsi_spend` (negative: competitor spend cannibalizes sales).
    pub competitor_coef: f64,
    pub noise_sd: f64,
    pub sales_floor: f64,
}

impl Default for ResponseParams {
    fn default() -> Self {
        Self {
            weights: ChannelWeights {
                tv: 120.0,
                digital: 150.0,
                outdoor: 60.0,
                retail: 90.0,
            },
            weather_coef: 4.0,
            temp_reference: 60.0,
            holiday_bonus: 180.0,
            competitor_coef: -0.01,
            noise_sd: 100.0,
            sales_floor: 200.0,
        }
    }
}

/// Every constant of the panel generator.
///
/// `Default` holds the canonical dataset; callers can override fields but the
/// CLI only exposes the seed and output path.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub anchor: Weekday,

    pub base_spend: UniformRange,
    pub tv_noise_sd: f64,
    pub digital_multiplier: UniformRange,
    pub outdoor_multiplier: UniformRange,
    pub retail_multiplier: UniformRange,

    pub temp_mean: f64,
    pub temp_noise_sd: f64,
    /// Indexed by [`Region::index`].
    pub temperature_offsets: [f64; Region::COUNT],

    pub holiday_probability: f64,
    pub competitor_multiplier: UniformRange,
    pub region_effect: UniformRange,

    pub response: ResponseParams,
}

impl GeneratorConfig {
    pub fn temperature_offset(&self, region: Region) -> f64 {
        self.temperature_offsets[region.index()]
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2021, 1, 1).expect("valid calendar date"),
            end: NaiveDate::from_ymd_opt(2024, 12, 31).expect("valid calendar date"),
            anchor: Weekday::Mon,
            base_spend: UniformRange::new(5_000.0, 50_000.0),
            tv_noise_sd: 1_500.0,
            digital_multiplier: UniformRange::new(0.6, 1.4),
            outdoor_multiplier: UniformRange::new(0.2, 0.5),
            retail_multiplier: UniformRange::new(0.3, 0.8),
            temp_mean: 60.0,
            temp_noise_sd: 15.0,
            temperature_offsets: Region::ALL.map(Region::default_temperature_offset),
            holiday_probability: 0.10,
            competitor_multiplier: UniformRange::new(0.7, 1.3),
            region_effect: UniformRange::new(500.0, 1_500.0),
            response: ResponseParams::default(),
        }
    }
}

/// One persisted panel observation. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelRow {
    pub region: Region,
    pub week: NaiveDate,
    pub ad_spend_tv: f64,
    pub ad_spend_digital: f64,
    pub ad_spend_outdoor: f64,
    pub ad_spend_retail: f64,
    pub avg_temp: f64,
    pub holiday: u8,
    pub pepsi_spend: f64,
    pub sales_volume: f64,
    pub total_spend: f64,
    pub roi: f64,
}

/// Column names of the panel CSV, in order.
pub const PANEL_COLUMNS: [&str; 12] = [
    "region",
    "week",
    "ad_spend_tv",
    "ad_spend_digital",
    "ad_spend_outdoor",
    "ad_spend_retail",
    "avg_temp",
    "holiday",
    "pepsi_spend",
    "sales_volume",
    "total_spend",
    "roi",
];

/// Default output file for `mmm generate`.
pub const DEFAULT_OUTPUT: &str = "synthetic_marketing_data.csv";

/// Shapiro-Wilk outcome for one inspected column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalityResult {
    #[serde(rename = "Feature")]
    pub feature: String,
    #[serde(rename = "W-Statistic")]
    pub w_statistic: f64,
    #[serde(rename = "p-value")]
    pub p_value: f64,
}

/// Settings for one `mmm inspect` run.
#[derive(Debug, Clone)]
pub struct InspectConfig {
    pub input: PathBuf,
    /// `None` means every numeric column.
    pub columns: Option<Vec<String>>,
    pub shapiro: bool,
    pub bins: usize,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub svg_dir: Option<PathBuf>,
    pub tui: bool,
    pub export: Option<PathBuf>,
}
