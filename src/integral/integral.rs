use serde::Deserialize;

use crate::calculuserror::CalculusError;
use crate::configuration::Configuration;
use crate::function::function::RealFunction;
use crate::math::point::Point2D;
use crate::math::utility::linspace;
use crate::validation::{validate_bounds, validate_subdivisions};

pub const DEFAULT_SUBDIVISIONS: usize = 1000;

// ─────────────────────────────────────────────
// QuadratureRule
// ─────────────────────────────────────────────
//
// 三種複合求積規則，n 為子區間數（呼叫端保證 a <= b）：
//
//   trapezoidal  h·[f(a)/2 + Σf(x_i) + f(b)/2]      誤差 O((b-a)³/n²)
//   simpson      h/3·[f(a) + 4Σ奇 + 2Σ偶 + f(b)]     誤差 O((b-a)⁵/n⁴)
//   midpoint     h·Σ f(x_i + h/2)                    誤差 O((b-a)³/n²)
//
// simpson 對平滑被積函數最準，作為預設；midpoint 不碰觸兩端點，
// 對端點奇異的被積函數最穩。
//
// simpson 需要偶數 n：奇數時就地進位 +1（政策見 DESIGN.md，已測試）。

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub enum QuadratureRule {
    Trapezoidal,
    Simpson,
    Midpoint,
}

impl QuadratureRule {
    pub fn apply<F: RealFunction>(&self, function: &F, a: f64, b: f64, n: usize) -> f64 {
        match self {
            QuadratureRule::Trapezoidal => Self::trapezoidal(function, a, b, n),
            QuadratureRule::Simpson => {
                let n = if n % 2 == 1 { n + 1 } else { n };
                Self::simpson(function, a, b, n)
            }
            QuadratureRule::Midpoint => Self::midpoint(function, a, b, n),
        }
    }

    fn trapezoidal<F: RealFunction>(function: &F, a: f64, b: f64, n: usize) -> f64 {
        let h = (b - a) / n as f64;
        let mut sum = (function.evaluate(a) + function.evaluate(b)) / 2.0;
        for i in 1..n {
            sum += function.evaluate(a + h * i as f64);
        }
        sum * h
    }

    fn simpson<F: RealFunction>(function: &F, a: f64, b: f64, n: usize) -> f64 {
        let h = (b - a) / n as f64;
        let mut sum = function.evaluate(a) + function.evaluate(b);
        for i in 1..n {
            let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
            sum += weight * function.evaluate(a + h * i as f64);
        }
        sum * h / 3.0
    }

    fn midpoint<F: RealFunction>(function: &F, a: f64, b: f64, n: usize) -> f64 {
        let h = (b - a) / n as f64;
        (0..n)
            .map(|i| function.evaluate(a + h * (i as f64 + 0.5)))
            .sum::<f64>()
            * h
    }
}

// ─────────────────────────────────────────────
// Integral
// ─────────────────────────────────────────────

pub struct Integral<F: RealFunction> {
    function: F,
    n: usize,
    method: QuadratureRule,
}

impl<F: RealFunction> Integral<F> {
    pub fn new(function: F) -> Integral<F> {
        Integral {
            function,
            n: DEFAULT_SUBDIVISIONS,
            method: QuadratureRule::Simpson,
        }
    }

    pub fn with_method(function: F, method: QuadratureRule) -> Integral<F> {
        Integral {
            function,
            n: DEFAULT_SUBDIVISIONS,
            method,
        }
    }

    pub fn with_options(
        function: F,
        n: usize,
        method: QuadratureRule,
    ) -> Result<Integral<F>, CalculusError> {
        validate_subdivisions(n)?;
        Ok(Integral { function, n, method })
    }

    pub fn from_configuration(
        function: F,
        configuration: &Configuration,
    ) -> Result<Integral<F>, CalculusError> {
        Self::with_options(
            function,
            configuration.subdivisions,
            configuration.quadrature_rule,
        )
    }

    /// 欄位已驗證過時的內部建構（DoubleIntegral、FourierSeries 共用）。
    pub(crate) fn from_parts(function: F, n: usize, method: QuadratureRule) -> Integral<F> {
        Integral { function, n, method }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn method(&self) -> QuadratureRule {
        self.method
    }

    /// 定向積分：∫_a^b = -∫_b^a；a == b 時為 0。
    pub fn between(&self, a: f64, b: f64) -> f64 {
        if (a - b).abs() < f64::EPSILON {
            return 0.0;
        }

        if a > b {
            -self.method.apply(&self.function, b, a, self.n)
        } else {
            self.method.apply(&self.function, a, b, self.n)
        }
    }

    pub fn definite(&self, a: f64, b: f64) -> f64 {
        self.between(a, b)
    }

    /// (x_i, ∫_a^{x_i} f) 的惰性點列，x_i 為 [a, b] 上 num_points 個等距點。
    /// 累積值採增量計算：每一項 = 前一項 + 新子區間的積分。
    pub fn cumulative(
        &self,
        a: f64,
        b: f64,
        num_points: usize,
    ) -> impl Iterator<Item = Point2D> + '_ {
        let mut previous_x = a;
        let mut running = 0.0;
        linspace(a, b, num_points).into_iter().map(move |x| {
            running += self.between(previous_x, x);
            previous_x = x;
            Point2D::new(x, running)
        })
    }

    /// 平均值：∫_a^b f / (b - a)。a == b 時無定義。
    pub fn average_value(&self, a: f64, b: f64) -> Result<f64, CalculusError> {
        validate_bounds(a, b)?;
        if (a - b).abs() < f64::EPSILON {
            return Err(CalculusError::DegenerateInterval { at: a });
        }
        Ok(self.between(a, b) / (b - a))
    }
}
