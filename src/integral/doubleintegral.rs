use crate::calculuserror::CalculusError;
use crate::configuration::Configuration;
use crate::function::function::ScalarField;
use crate::integral::integral::{Integral, QuadratureRule};
use crate::validation::validate_subdivisions;

pub const DEFAULT_SUBDIVISIONS_PER_AXIS: usize = 100;

/// 矩形區域上的逐次積分（iterated integration）。
///
/// 先對每個 x 取樣點沿 y 積分，得到一維剖面 g(x) = ∫ f(x, y) dy，
/// 再以同一規則沿 x 積分剖面 — 並非真正的二維求積格式。
/// n 為每軸子區間數，總求值次數 O(n²)。
pub struct DoubleIntegral<F: ScalarField> {
    function: F,
    n: usize,
    method: QuadratureRule,
}

impl<F: ScalarField> DoubleIntegral<F> {
    pub fn new(function: F) -> DoubleIntegral<F> {
        DoubleIntegral {
            function,
            n: DEFAULT_SUBDIVISIONS_PER_AXIS,
            method: QuadratureRule::Simpson,
        }
    }

    pub fn with_method(function: F, method: QuadratureRule) -> DoubleIntegral<F> {
        DoubleIntegral {
            function,
            n: DEFAULT_SUBDIVISIONS_PER_AXIS,
            method,
        }
    }

    pub fn with_options(
        function: F,
        n: usize,
        method: QuadratureRule,
    ) -> Result<DoubleIntegral<F>, CalculusError> {
        validate_subdivisions(n)?;
        Ok(DoubleIntegral { function, n, method })
    }

    pub fn from_configuration(
        function: F,
        configuration: &Configuration,
    ) -> Result<DoubleIntegral<F>, CalculusError> {
        Self::with_options(
            function,
            configuration.subdivisions_per_axis,
            configuration.quadrature_rule,
        )
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn over(&self, x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> f64 {
        let profile = |x: f64| {
            let slice = |y: f64| self.function.evaluate(&[x, y]);
            Integral::from_parts(slice, self.n, self.method).between(y_min, y_max)
        };
        Integral::from_parts(profile, self.n, self.method).between(x_min, x_max)
    }
}
