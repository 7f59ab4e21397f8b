use crate::calculuserror::CalculusError;
use crate::function::function::RealFunction;
use crate::series::cachebackend::{CoefficientCache, RefCellBackend, RwLockBackend};
use crate::series::taylorseries::TaylorSeries;

/// 中心固定在 0 的泰勒展開。
pub struct MaclaurinSeries<F: RealFunction, C: CoefficientCache = RefCellBackend> {
    series: TaylorSeries<F, C>,
}

impl<F: RealFunction> MaclaurinSeries<F, RefCellBackend> {
    pub fn new(function: F) -> Self {
        MaclaurinSeries {
            series: TaylorSeries::new(function),
        }
    }

    pub fn with_order(function: F, n: usize) -> Result<Self, CalculusError> {
        Ok(MaclaurinSeries {
            series: TaylorSeries::with_order(function, n)?,
        })
    }
}

impl<F: RealFunction> MaclaurinSeries<F, RwLockBackend> {
    pub fn new_threadsafe(function: F) -> Self {
        MaclaurinSeries {
            series: TaylorSeries::new_threadsafe(function),
        }
    }
}

impl<F: RealFunction, C: CoefficientCache> MaclaurinSeries<F, C> {
    pub fn truncation_order(&self) -> usize {
        self.series.truncation_order()
    }

    pub fn at(&self, x: f64) -> f64 {
        self.series.at(x, 0.0)
    }

    pub fn coefficients(&self) -> Vec<f64> {
        self.series.coefficients(0.0)
    }

    pub fn polynomial_string(&self) -> String {
        self.series.polynomial_string(0.0)
    }

    pub fn error_estimate(&self, x: f64) -> f64 {
        self.series.error_estimate(x, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn exponential_at_one() {
        let maclaurin = MaclaurinSeries::with_order(f64::exp, 12).unwrap();
        assert_relative_eq!(maclaurin.at(1.0), 1.0f64.exp(), epsilon = 1e-4);
    }

    #[test]
    fn odd_and_even_series() {
        let sine = MaclaurinSeries::with_order(f64::sin, 15).unwrap();
        assert_relative_eq!(sine.at(0.5), 0.5f64.sin(), epsilon = 1e-2);

        let cosine = MaclaurinSeries::new(f64::cos);
        assert_relative_eq!(cosine.at(0.5), 0.5f64.cos(), epsilon = 1e-2);
    }

    #[test]
    fn hyperbolic_series() {
        let sinh = MaclaurinSeries::with_order(f64::sinh, 15).unwrap();
        assert_relative_eq!(sinh.at(0.5), 0.5f64.sinh(), epsilon = 1e-2);

        let cosh = MaclaurinSeries::new(f64::cosh);
        assert_relative_eq!(cosh.at(0.5), 0.5f64.cosh(), epsilon = 1e-2);
    }

    #[test]
    fn evaluation_at_the_center_is_the_constant_term() {
        let maclaurin = MaclaurinSeries::with_order(|x: f64| x * x + 1.0, 5).unwrap();
        assert_relative_eq!(maclaurin.at(0.0), 1.0, epsilon = 1e-2);
    }

    #[test]
    fn surface_delegates_to_the_underlying_series() {
        let maclaurin = MaclaurinSeries::with_order(|x: f64| x * x, 5).unwrap();
        assert_eq!(maclaurin.coefficients().len(), 5);
        assert!(!maclaurin.polynomial_string().is_empty());
        assert!(maclaurin.error_estimate(1.0) >= 0.0);
    }
}
