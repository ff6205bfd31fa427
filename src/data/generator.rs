//! Synthetic marketing panel generation.
//!
//! Pipeline: panel index -> covariates -> region effects -> sales simulation ->
//! derived ratios -> sort. The random source is created once by the caller and
//! lent to each stage in turn.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::data::calendar::weekly_dates;
use crate::data::covariates::{Covariates, draw_covariates, draw_region_effects};
use crate::data::panel::{PanelFrame, PanelIndex};
use crate::domain::{GeneratorConfig, Region, ResponseParams};
use crate::error::AppError;
use crate::models::{ResponseInputs, simulate_sales};

/// Default seed for `mmm generate`.
pub const DEFAULT_SEED: u64 = 42;

/// Generate the panel with a fresh `StdRng` seeded from `seed`.
pub fn generate_panel_seeded(config: &GeneratorConfig, seed: u64) -> Result<PanelFrame, AppError> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_panel(config, &mut rng)
}

/// Generate the full, sorted panel.
pub fn generate_panel<R: Rng + ?Sized>(config: &GeneratorConfig, rng: &mut R) -> Result<PanelFrame, AppError> {
    validate_config(config)?;

    let weeks = weekly_dates(config.start, config.end, config.anchor)?;
    let index = PanelIndex::cartesian(&Region::ALL, &weeks);
    log::info!(
        "building panel: {} regions x {} weeks ({} .. {})",
        Region::COUNT,
        weeks.len(),
        weeks[0],
        weeks[weeks.len() - 1]
    );

    let covariates = draw_covariates(rng, &index.region, config)?;
    let region_effects = draw_region_effects(rng, config.region_effect)?;
    log::debug!("region effects: {region_effects:?}");

    let noise = Normal::new(0.0, config.response.noise_sd)
        .map_err(|e| AppError::input(format!("Sales noise distribution error: {e}")))?;
    let noise: Vec<f64> = (0..index.len()).map(|_| noise.sample(rng)).collect();

    let sales_volume = simulate_sales_column(&index, &covariates, &region_effects, &noise, &config.response);

    let mut frame = assemble(index, covariates, sales_volume);
    frame.sort_by_region_week();
    log::info!("generated {} rows", frame.len());
    Ok(frame)
}

/// Apply the response function row by row over column slices.
pub fn simulate_sales_column(
    index: &PanelIndex,
    covariates: &Covariates,
    region_effects: &[f64; Region::COUNT],
    noise: &[f64],
    params: &ResponseParams,
) -> Vec<f64> {
    (0..index.len())
        .map(|i| {
            let inputs = ResponseInputs {
                region_effect: region_effects[index.region[i].index()],
                ad_spend_tv: covariates.spend.tv[i],
                ad_spend_digital: covariates.spend.digital[i],
                ad_spend_outdoor: covariates.spend.outdoor[i],
                ad_spend_retail: covariates.spend.retail[i],
                avg_temp: covariates.avg_temp[i],
                holiday: covariates.holiday[i],
                pepsi_spend: covariates.pepsi_spend[i],
            };
            simulate_sales(&inputs, params, noise[i])
        })
        .collect()
}

/// Sum of the four channels, in column order.
pub fn total_spend(tv: f64, digital: f64, outdoor: f64, retail: f64) -> f64 {
    tv + digital + outdoor + retail
}

fn assemble(index: PanelIndex, covariates: Covariates, sales_volume: Vec<f64>) -> PanelFrame {
    let Covariates {
        spend,
        avg_temp,
        holiday,
        pepsi_spend,
    } = covariates;

    let total: Vec<f64> = (0..index.len())
        .map(|i| total_spend(spend.tv[i], spend.digital[i], spend.outdoor[i], spend.retail[i]))
        .collect();
    let roi = sales_volume.iter().zip(&total).map(|(s, t)| s / t).collect();

    PanelFrame {
        region: index.region,
        week: index.week,
        ad_spend_tv: spend.tv,
        ad_spend_digital: spend.digital,
        ad_spend_outdoor: spend.outdoor,
        ad_spend_retail: spend.retail,
        avg_temp,
        holiday,
        pepsi_spend,
        sales_volume,
        total_spend: total,
        roi,
    }
}

fn validate_config(config: &GeneratorConfig) -> Result<(), AppError> {
    let ranges = [
        ("base spend", config.base_spend),
        ("digital multiplier", config.digital_multiplier),
        ("outdoor multiplier", config.outdoor_multiplier),
        ("retail multiplier", config.retail_multiplier),
        ("competitor multiplier", config.competitor_multiplier),
        ("region effect", config.region_effect),
    ];
    for (name, range) in ranges {
        if !range.is_valid() {
            return Err(AppError::input(format!(
                "Invalid {name} range [{}, {}).",
                range.low, range.high
            )));
        }
    }

    // Strictly positive spend keeps total_spend > 0 and roi defined.
    for (name, range) in &ranges[..4] {
        if range.low <= 0.0 {
            return Err(AppError::input(format!("The {name} range must be strictly positive.")));
        }
    }

    if !(0.0..=1.0).contains(&config.holiday_probability) {
        return Err(AppError::input("Holiday probability must be within [0, 1]."));
    }
    for (name, sd) in [
        ("TV noise", config.tv_noise_sd),
        ("temperature noise", config.temp_noise_sd),
        ("sales noise", config.response.noise_sd),
    ] {
        if !(sd.is_finite() && sd >= 0.0) {
            return Err(AppError::input(format!("Invalid {name} standard deviation {sd}.")));
        }
    }
    Ok(())
}
