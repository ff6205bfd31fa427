//! Closed-form sales response function.
//!
//! The generator draws covariates; this module turns one row of covariates
//! into a sales figure. Everything here is pure: parameters come in through
//! [`ResponseParams`] and the noise draw is passed in by the caller.

use crate::domain::ResponseParams;

/// Covariates of a single panel row that feed the response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseInputs {
    pub region_effect: f64,
    pub ad_spend_tv: f64,
    pub ad_spend_digital: f64,
    pub ad_spend_outdoor: f64,
    pub ad_spend_retail: f64,
    pub avg_temp: f64,
    pub holiday: u8,
    pub pepsi_spend: f64,
}

/// Additive decomposition of expected sales (before noise and floor).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseTerms {
    pub region: f64,
    pub media: f64,
    pub weather: f64,
    pub holiday: f64,
    pub competitor: f64,
}

impl ResponseTerms {
    pub fn total(&self) -> f64 {
        self.region + self.media + self.weather + self.holiday + self.competitor
    }
}

/// Sum of `weight * log1p(spend)` over the four channels.
pub fn media_term(inputs: &ResponseInputs, params: &ResponseParams) -> f64 {
    let w = &params.weights;
    w.tv * inputs.ad_spend_tv.ln_1p()
        + w.digital * inputs.ad_spend_digital.ln_1p()
        + w.outdoor * inputs.ad_spend_outdoor.ln_1p()
        + w.retail * inputs.ad_spend_retail.ln_1p()
}

pub fn holiday_term(holiday: u8, params: &ResponseParams) -> f64 {
    if holiday == 1 { params.holiday_bonus } else { 0.0 }
}

pub fn response_terms(inputs: &ResponseInputs, params: &ResponseParams) -> ResponseTerms {
    ResponseTerms {
        region: inputs.region_effect,
        media: media_term(inputs, params),
        weather: params.weather_coef * (inputs.avg_temp - params.temp_reference),
        holiday: holiday_term(inputs.holiday, params),
        competitor: params.competitor_coef * inputs.pepsi_spend,
    }
}

/// Expected sales without noise or floor.
pub fn expected_sales(inputs: &ResponseInputs, params: &ResponseParams) -> f64 {
    response_terms(inputs, params).total()
}

/// Observed sales: expected sales plus the supplied noise draw, clipped at the floor.
pub fn simulate_sales(inputs: &ResponseInputs, params: &ResponseParams, noise: f64) -> f64 {
    (expected_sales(inputs, params) + noise).max(params.sales_floor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(holiday: u8) -> ResponseInputs {
        ResponseInputs {
            region_effect: 1_000.0,
            ad_spend_tv: 20_000.0,
            ad_spend_digital: 25_000.0,
            ad_spend_outdoor: 8_000.0,
            ad_spend_retail: 12_000.0,
            avg_temp: 60.0,
            holiday,
            pepsi_spend: 22_000.0,
        }
    }

    #[test]
    fn holiday_bonus_only_on_holidays() {
        let params = ResponseParams::default();
        assert_eq!(response_terms(&inputs(0), &params).holiday, 0.0);
        assert_eq!(response_terms(&inputs(1), &params).holiday, 180.0);

        let diff = expected_sales(&inputs(1), &params) - expected_sales(&inputs(0), &params);
        assert!((diff - 180.0).abs() < 1e-9, "diff={diff}");
    }

    #[test]
    fn weather_term_is_zero_at_reference() {
        let params = ResponseParams::default();
        let mut x = inputs(0);
        assert_eq!(response_terms(&x, &params).weather, 0.0);
        x.avg_temp = 70.0;
        assert_eq!(response_terms(&x, &params).weather, 40.0);
    }

    #[test]
    fn media_term_uses_log1p() {
        let params = ResponseParams::default();
        let mut x = inputs(0);
        x.ad_spend_tv = 0.0;
        x.ad_spend_digital = 0.0;
        x.ad_spend_outdoor = 0.0;
        x.ad_spend_retail = 0.0;
        assert_eq!(media_term(&x, &params), 0.0);

        x.ad_spend_tv = std::f64::consts::E - 1.0;
        assert!((media_term(&x, &params) - 120.0).abs() < 1e-9);
    }

    #[test]
    fn simulated_sales_respect_floor() {
        let params = ResponseParams::default();
        let x = inputs(0);
        assert_eq!(simulate_sales(&x, &params, -1.0e9), 200.0);

        let expected = expected_sales(&x, &params);
        assert_eq!(simulate_sales(&x, &params, 5.0), expected + 5.0);
    }
}
