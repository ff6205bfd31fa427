//! Covariate draws: spend channels, weather, holidays, competitor spend, region effects.
//!
//! Every function takes the random source explicitly and draws one full column
//! per call, so the draw order is fixed by the caller's stage order.

use rand::Rng;
use rand::distributions::{Bernoulli, Distribution, Uniform};
use rand_distr::Normal;

use crate::domain::{GeneratorConfig, Region, UniformRange};
use crate::error::AppError;

/// The four correlated advertising channels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpendChannels {
    pub tv: Vec<f64>,
    pub digital: Vec<f64>,
    pub outdoor: Vec<f64>,
    pub retail: Vec<f64>,
}

/// Everything drawn per row before the sales simulation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Covariates {
    pub spend: SpendChannels,
    pub avg_temp: Vec<f64>,
    pub holiday: Vec<u8>,
    pub pepsi_spend: Vec<f64>,
}

/// `Uniform::new` panics on an empty or non-finite interval, so check first.
fn uniform(range: UniformRange, what: &str) -> Result<Uniform<f64>, AppError> {
    if !range.is_valid() {
        return Err(AppError::input(format!(
            "Invalid {what} range [{}, {}): need finite bounds with low < high.",
            range.low, range.high
        )));
    }
    Ok(Uniform::new(range.low, range.high))
}

fn uniform_column<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    range: UniformRange,
    what: &str,
) -> Result<Vec<f64>, AppError> {
    let dist = uniform(range, what)?;
    Ok((0..n).map(|_| dist.sample(rng)).collect())
}

fn normal_column<R: Rng + ?Sized>(rng: &mut R, n: usize, sd: f64) -> Result<Vec<f64>, AppError> {
    let dist = Normal::new(0.0, sd).map_err(|e| AppError::input(format!("Noise distribution error: {e}")))?;
    Ok((0..n).map(|_| dist.sample(rng)).collect())
}

/// Latent per-row base spend.
pub fn draw_base_spend<R: Rng + ?Sized>(rng: &mut R, n: usize, range: UniformRange) -> Result<Vec<f64>, AppError> {
    uniform_column(rng, n, range, "base spend")
}

/// Derive channel spends from base spend.
///
/// TV is base plus Gaussian noise (floored at zero); the other channels are base
/// times a channel-specific uniform multiplier.
pub fn derive_spend_channels<R: Rng + ?Sized>(
    rng: &mut R,
    base: &[f64],
    config: &GeneratorConfig,
) -> Result<SpendChannels, AppError> {
    let n = base.len();

    let tv_noise = normal_column(rng, n, config.tv_noise_sd)?;
    let tv = base.iter().zip(&tv_noise).map(|(b, e)| (b + e).max(0.0)).collect();

    let scale = |mult: Vec<f64>| -> Vec<f64> { base.iter().zip(&mult).map(|(b, m)| b * m).collect() };
    let digital = scale(uniform_column(rng, n, config.digital_multiplier, "digital multiplier")?);
    let outdoor = scale(uniform_column(rng, n, config.outdoor_multiplier, "outdoor multiplier")?);
    let retail = scale(uniform_column(rng, n, config.retail_multiplier, "retail multiplier")?);

    Ok(SpendChannels { tv, digital, outdoor, retail })
}

/// Weekly average temperature: global mean plus the region offset plus noise.
pub fn avg_temp(mean: f64, region_offset: f64, noise: f64) -> f64 {
    mean + region_offset + noise
}

pub fn derive_avg_temp<R: Rng + ?Sized>(
    rng: &mut R,
    regions: &[Region],
    config: &GeneratorConfig,
) -> Result<Vec<f64>, AppError> {
    let noise = normal_column(rng, regions.len(), config.temp_noise_sd)?;
    Ok(regions
        .iter()
        .zip(&noise)
        .map(|(&r, &e)| avg_temp(config.temp_mean, config.temperature_offset(r), e))
        .collect())
}

pub fn draw_holidays<R: Rng + ?Sized>(rng: &mut R, n: usize, probability: f64) -> Result<Vec<u8>, AppError> {
    let dist = Bernoulli::new(probability)
        .map_err(|e| AppError::input(format!("Invalid holiday probability {probability}: {e}")))?;
    Ok((0..n).map(|_| u8::from(dist.sample(rng))).collect())
}

/// Competitor spend tracks the focal brand's TV spend.
pub fn derive_competitor_spend<R: Rng + ?Sized>(
    rng: &mut R,
    tv: &[f64],
    range: UniformRange,
) -> Result<Vec<f64>, AppError> {
    let mult = uniform_column(rng, tv.len(), range, "competitor multiplier")?;
    Ok(tv.iter().zip(&mult).map(|(t, m)| t * m).collect())
}

/// One latent effect per region, drawn in [`Region::ALL`] order.
pub fn draw_region_effects<R: Rng + ?Sized>(
    rng: &mut R,
    range: UniformRange,
) -> Result<[f64; Region::COUNT], AppError> {
    let dist = uniform(range, "region effect")?;
    let mut out = [0.0; Region::COUNT];
    for slot in out.iter_mut() {
        *slot = dist.sample(rng);
    }
    Ok(out)
}

/// Draw all row covariates in stage order: base, channels, temperature,
/// holiday, competitor.
pub fn draw_covariates<R: Rng + ?Sized>(
    rng: &mut R,
    regions: &[Region],
    config: &GeneratorConfig,
) -> Result<Covariates, AppError> {
    let n = regions.len();
    let base = draw_base_spend(rng, n, config.base_spend)?;
    let spend = derive_spend_channels(rng, &base, config)?;
    let avg_temp = derive_avg_temp(rng, regions, config)?;
    let holiday = draw_holidays(rng, n, config.holiday_probability)?;
    let pepsi_spend = derive_competitor_spend(rng, &spend.tv, config.competitor_multiplier)?;

    log::debug!("drew covariates for {n} rows");

    Ok(Covariates {
        spend,
        avg_temp,
        holiday,
        pepsi_spend,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn northeast_temperature_applies_offset_before_noise() {
        let config = GeneratorConfig::default();
        let t = avg_temp(config.temp_mean, config.temperature_offset(Region::Northeast), 0.0);
        assert_eq!(t, 55.0);
        assert_eq!(avg_temp(60.0, -5.0, 2.5), 57.5);
    }

    #[test]
    fn zero_temperature_noise_gives_exact_offsets() {
        let config = GeneratorConfig {
            temp_noise_sd: 0.0,
            ..GeneratorConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(7);
        let temps = derive_avg_temp(&mut rng, &Region::ALL, &config).unwrap();
        for (r, t) in Region::ALL.iter().zip(&temps) {
            assert_eq!(*t, 60.0 + r.default_temperature_offset());
        }
        assert_eq!(temps[0], 55.0);
    }

    #[test]
    fn channels_stay_within_multiplier_bounds() {
        let config = GeneratorConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        let base = draw_base_spend(&mut rng, 500, config.base_spend).unwrap();
        assert!(base.iter().all(|b| (5_000.0..50_000.0).contains(b)));

        let spend = derive_spend_channels(&mut rng, &base, &config).unwrap();
        for i in 0..base.len() {
            assert!(spend.tv[i] >= 0.0);
            assert!(spend.digital[i] >= base[i] * 0.6 && spend.digital[i] <= base[i] * 1.4);
            assert!(spend.outdoor[i] >= base[i] * 0.2 && spend.outdoor[i] <= base[i] * 0.5);
            assert!(spend.retail[i] >= base[i] * 0.3 && spend.retail[i] <= base[i] * 0.8);
        }
    }

    #[test]
    fn holidays_are_binary_with_roughly_the_configured_rate() {
        let mut rng = StdRng::seed_from_u64(3);
        let h = draw_holidays(&mut rng, 10_000, 0.1).unwrap();
        assert!(h.iter().all(|&x| x == 0 || x == 1));
        let rate = h.iter().map(|&x| x as f64).sum::<f64>() / h.len() as f64;
        assert!((rate - 0.1).abs() < 0.02, "rate={rate}");

        assert!(draw_holidays(&mut rng, 1, 1.5).is_err());
    }

    #[test]
    fn region_effects_are_in_range() {
        let mut rng = StdRng::seed_from_u64(5);
        let effects = draw_region_effects(&mut rng, UniformRange::new(500.0, 1_500.0)).unwrap();
        assert!(effects.iter().all(|e| (500.0..1_500.0).contains(e)));
    }

    #[test]
    fn inverted_or_empty_ranges_are_input_errors() {
        let mut rng = StdRng::seed_from_u64(5);
        let inverted = UniformRange::new(1_500.0, 500.0);
        let empty = UniformRange::new(10.0, 10.0);

        assert_eq!(draw_region_effects(&mut rng, inverted).unwrap_err().exit_code(), 2);
        assert_eq!(draw_base_spend(&mut rng, 4, empty).unwrap_err().exit_code(), 2);
        let err = derive_competitor_spend(&mut rng, &[1.0, 2.0], UniformRange::new(f64::NAN, 1.0)).unwrap_err();
        assert!(err.to_string().contains("competitor multiplier"));

        let config = GeneratorConfig {
            retail_multiplier: inverted,
            ..GeneratorConfig::default()
        };
        assert!(draw_covariates(&mut rng, &Region::ALL, &config).is_err());
    }
}
