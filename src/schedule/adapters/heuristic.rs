//! Default yield estimation policy.

use crate::schedule::{
    domain::{RiskLevel, YieldBand, YieldEstimate, YieldInput},
    ports::YieldEstimator,
};

/// Deterministic placeholder yield heuristic.
///
/// The point estimate is `base_kg_per_acre × acres × health × progress`,
/// with health and progress as fractions. The band spans a share of that
/// estimate which narrows and drops as risk grows, always within 50 % to
/// 100 %.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicYieldEstimator {
    base_kg_per_acre: f64,
}

impl HeuristicYieldEstimator {
    /// Base yield used by [`Default`].
    pub const DEFAULT_BASE_KG_PER_ACRE: f64 = 100.0;

    /// Creates an estimator with a custom base yield.
    #[must_use]
    pub const fn new(base_kg_per_acre: f64) -> Self {
        Self { base_kg_per_acre }
    }

    const fn band_shares(risk: RiskLevel) -> (f64, f64) {
        match risk {
            RiskLevel::Low => (0.8, 1.0),
            RiskLevel::Moderate => (0.65, 0.9),
            RiskLevel::High => (0.5, 0.75),
        }
    }
}

impl Default for HeuristicYieldEstimator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_KG_PER_ACRE)
    }
}

impl YieldEstimator for HeuristicYieldEstimator {
    #[expect(
        clippy::float_arithmetic,
        reason = "yield figures are floating-point estimates"
    )]
    fn estimate(&self, input: &YieldInput) -> YieldEstimate {
        let health = f64::from(input.health_score) / 100.0;
        let progress = input.progress_fraction.clamp(0.0, 1.0);
        let acres = input.acres.max(0.0);
        let expected_kg = self.base_kg_per_acre * acres * health * progress;
        let (low_share, high_share) = Self::band_shares(input.risk);
        YieldEstimate {
            expected_kg,
            band: YieldBand {
                min_kg: expected_kg * low_share,
                max_kg: expected_kg * high_share,
            },
        }
    }
}
