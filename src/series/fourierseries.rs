use std::f64::consts::PI;

use crate::calculuserror::CalculusError;
use crate::configuration::Configuration;
use crate::function::function::RealFunction;
use crate::integral::integral::{DEFAULT_SUBDIVISIONS, Integral, QuadratureRule};
use crate::series::taylorseries::DEFAULT_TRUNCATION_ORDER;
use crate::validation::{validate_period, validate_truncation_order};

// ─────────────────────────────────────────────
// FourierSeries
// ─────────────────────────────────────────────
//
// 週期 P 的函數在一個週期 [0, P] 上的三角展開:
//
//   a0   = (2/P) ∫ f
//   a_k  = (2/P) ∫ f(x) cos(2πkx/P) dx
//   b_k  = (2/P) ∫ f(x) sin(2πkx/P) dx
//   f(x) ≈ a0/2 + Σ_{k=1}^{n} [a_k cos(2πkx/P) + b_k sin(2πkx/P)]
//
// 2/P 歸一化與 a0/2 重建式配對,常數函數才能被精確還原
// (f ≡ c ⟹ a0 = 2c,a0/2 = c)。
//
// 所有積分都交給 Integral 元件(預設 simpson、n = 1000)計算;
// 積分精度由求積的 n 決定,與級數截斷階數 n 無關。

pub struct FourierSeries<F: RealFunction> {
    function: F,
    period: f64,
    n: usize,
    quadrature_n: usize,
    rule: QuadratureRule,
}

impl<F: RealFunction> FourierSeries<F> {
    pub fn new(function: F, period: f64) -> Result<FourierSeries<F>, CalculusError> {
        Self::with_order(function, period, DEFAULT_TRUNCATION_ORDER)
    }

    pub fn with_order(
        function: F,
        period: f64,
        n: usize,
    ) -> Result<FourierSeries<F>, CalculusError> {
        validate_period(period)?;
        validate_truncation_order(n)?;
        Ok(FourierSeries {
            function,
            period,
            n,
            quadrature_n: DEFAULT_SUBDIVISIONS,
            rule: QuadratureRule::Simpson,
        })
    }

    pub fn from_configuration(
        function: F,
        period: f64,
        configuration: &Configuration,
    ) -> Result<FourierSeries<F>, CalculusError> {
        validate_period(period)?;
        validate_truncation_order(configuration.truncation_order)?;
        Ok(FourierSeries {
            function,
            period,
            n: configuration.truncation_order,
            quadrature_n: configuration.subdivisions,
            rule: configuration.quadrature_rule,
        })
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn truncation_order(&self) -> usize {
        self.n
    }

    fn angular_frequency(&self, k: usize) -> f64 {
        2.0 * PI * k as f64 / self.period
    }

    /// 直流項:(2/P) ∫ f 於一個週期。
    pub fn a0(&self) -> f64 {
        let function = &self.function;
        let integral = Integral::from_parts(
            |x: f64| function.evaluate(x),
            self.quadrature_n,
            self.rule,
        );
        2.0 / self.period * integral.between(0.0, self.period)
    }

    /// 餘弦係數 a_k。a_0 的公式自然退化為 a0()。
    pub fn an(&self, k: usize) -> f64 {
        let omega = self.angular_frequency(k);
        let function = &self.function;
        let integral = Integral::from_parts(
            move |x: f64| function.evaluate(x) * (omega * x).cos(),
            self.quadrature_n,
            self.rule,
        );
        2.0 / self.period * integral.between(0.0, self.period)
    }

    /// 正弦係數 b_k。
    pub fn bn(&self, k: usize) -> f64 {
        let omega = self.angular_frequency(k);
        let function = &self.function;
        let integral = Integral::from_parts(
            move |x: f64| function.evaluate(x) * (omega * x).sin(),
            self.quadrature_n,
            self.rule,
        );
        2.0 / self.period * integral.between(0.0, self.period)
    }

    /// 截斷重建:a0/2 + Σ_{k=1}^{n} [a_k cos + b_k sin]。
    pub fn at(&self, x: f64) -> f64 {
        let mut sum = self.a0() / 2.0;
        for k in 1..=self.n {
            let omega = self.angular_frequency(k);
            sum += self.an(k) * (omega * x).cos() + self.bn(k) * (omega * x).sin();
        }
        sum
    }
}
