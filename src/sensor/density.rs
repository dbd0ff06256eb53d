// src/sensor/density.rs

use crate::common::{AirqError, Vout};

/// Stepped K table for the GP2Y1051AU0F: `(vout upper bound, K)`.
///
/// Bounds are exclusive and in ten-thousandths of a volt. Evaluated in
/// ascending order, first match wins.
pub const STEPPED_K_TABLE: [(u32, u32); 13] = [
    (460, 200),   // < 0.046 V
    (490, 400),   // < 0.049 V
    (520, 600),   // < 0.052 V
    (550, 750),   // < 0.055 V
    (590, 900),   // < 0.059 V
    (650, 1000),  // < 0.065 V
    (710, 1250),  // < 0.071 V
    (760, 1400),  // < 0.076 V
    (810, 1700),  // < 0.081 V
    (860, 1800),  // < 0.086 V
    (910, 1900),  // < 0.091 V
    (1010, 2000), // < 0.101 V
    (1110, 2200), // < 0.111 V
];

/// K used above the last table bound.
pub const STEPPED_K_FALLBACK: u32 = 3000;

/// Largest accepted fixed K. Decoded Vout stays below 320 V, so `K * Vout`
/// still fits a `u64` when truncated.
pub const MAX_COEFFICIENT: f64 = u64::MAX as f64 / 320.0;

/// Where K comes from. Chosen once when the model is built.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum CoefficientModel {
    /// K looked up from [`STEPPED_K_TABLE`].
    Stepped,
    /// One configured K for every Vout.
    Fixed(f64),
}

impl CoefficientModel {
    pub fn coefficient_for(&self, vout: Vout) -> f64 {
        match self {
            CoefficientModel::Stepped => stepped_k(vout) as f64,
            CoefficientModel::Fixed(k) => *k,
        }
    }
}

/// How `K * Vout` is turned into the reported density.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Deserialize), serde(rename_all = "lowercase"))]
pub enum DensityPolicy {
    /// Integer part only (the stepped table's historical output).
    Truncate,
    /// Keep the full product.
    Precise,
}

/// Maps a Vout to a dust density in µg/m³.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DensityModel {
    coefficients: CoefficientModel,
    policy: DensityPolicy,
}

impl DensityModel {
    /// Stepped table, truncated output.
    pub const fn stepped() -> Self {
        DensityModel {
            coefficients: CoefficientModel::Stepped,
            policy: DensityPolicy::Truncate,
        }
    }

    /// Fixed K, full-precision output. `k` must be finite, non-negative and
    /// at most [`MAX_COEFFICIENT`].
    pub fn fixed(k: f64) -> Result<Self, AirqError> {
        Self::new(CoefficientModel::Fixed(k), DensityPolicy::Precise)
    }

    /// Any combination of coefficient source and output policy.
    pub fn new(coefficients: CoefficientModel, policy: DensityPolicy) -> Result<Self, AirqError> {
        if let CoefficientModel::Fixed(k) = coefficients {
            if !k.is_finite() || !(0.0..=MAX_COEFFICIENT).contains(&k) {
                return Err(AirqError::InvalidCoefficient(k));
            }
        }
        Ok(DensityModel { coefficients, policy })
    }

    pub fn coefficients(&self) -> CoefficientModel {
        self.coefficients
    }

    pub fn policy(&self) -> DensityPolicy {
        self.policy
    }

    #[inline]
    pub fn coefficient_for(&self, vout: Vout) -> f64 {
        self.coefficients.coefficient_for(vout)
    }

    /// `K * Vout`, truncated or not per the policy. Never negative.
    pub fn density(&self, vout: Vout) -> f64 {
        self.density_with(self.coefficient_for(vout), vout)
    }

    /// Same as [`density`](Self::density) with an already looked-up K.
    pub fn density_with(&self, k: f64, vout: Vout) -> f64 {
        let product = k * vout.as_f64();
        match self.policy {
            // `as u64` truncates toward zero; product is within 0..=u64::MAX
            DensityPolicy::Truncate => (product as u64) as f64,
            DensityPolicy::Precise => product,
        }
    }
}

impl Default for DensityModel {
    fn default() -> Self {
        Self::stepped()
    }
}

/// K from the stepped table.
pub fn stepped_k(vout: Vout) -> u32 {
    let v = vout.as_ten_thousandths();
    STEPPED_K_TABLE
        .iter()
        .find(|(bound, _)| v < *bound)
        .map(|(_, k)| *k)
        .unwrap_or(STEPPED_K_FALLBACK)
}
