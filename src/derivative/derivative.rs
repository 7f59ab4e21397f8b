use serde::Deserialize;

use crate::calculuserror::CalculusError;
use crate::configuration::Configuration;
use crate::function::function::RealFunction;
use crate::math::point::Point2D;
use crate::math::utility::linspace;
use crate::validation::validate_step;

pub const DEFAULT_STEP_SIZE: f64 = 1e-7;

// ─────────────────────────────────────────────
// DifferenceMethod
// ─────────────────────────────────────────────
//
// 三種有限差分：
//   forward   (f(x+h) - f(x)) / h          截斷誤差 O(h)
//   backward  (f(x) - f(x-h)) / h          截斷誤差 O(h)
//   central   (f(x+h) - f(x-h)) / (2h)     截斷誤差 O(h²)
//
// central 對平滑函數最準，作為預設；forward / backward 保留給
// f 只在單側有定義的場合。
//
// 步長 h 的兩難：截斷誤差 ∝ h，消去誤差 ∝ ε/h。
// 1e-7 是雙精度下的標準折衷。每次呼叫用固定 h，不做自適應搜尋；
// 需要驗證穩定性的呼叫端應自行在多個 h 上取樣比較。

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub enum DifferenceMethod {
    Forward,
    Backward,
    Central,
}

impl DifferenceMethod {
    pub fn estimate<F: RealFunction>(&self, function: &F, x: f64, h: f64) -> f64 {
        match self {
            DifferenceMethod::Forward => (function.evaluate(x + h) - function.evaluate(x)) / h,
            DifferenceMethod::Backward => (function.evaluate(x) - function.evaluate(x - h)) / h,
            DifferenceMethod::Central => {
                (function.evaluate(x + h) - function.evaluate(x - h)) / (2.0 * h)
            }
        }
    }
}

// ─────────────────────────────────────────────
// Derivative
// ─────────────────────────────────────────────

pub struct Derivative<F: RealFunction> {
    function: F,
    h: f64,
    method: DifferenceMethod,
}

impl<F: RealFunction> Derivative<F> {
    pub fn new(function: F) -> Derivative<F> {
        Derivative {
            function,
            h: DEFAULT_STEP_SIZE,
            method: DifferenceMethod::Central,
        }
    }

    pub fn with_method(function: F, method: DifferenceMethod) -> Derivative<F> {
        Derivative {
            function,
            h: DEFAULT_STEP_SIZE,
            method,
        }
    }

    pub fn with_options(
        function: F,
        h: f64,
        method: DifferenceMethod,
    ) -> Result<Derivative<F>, CalculusError> {
        validate_step(h)?;
        Ok(Derivative { function, h, method })
    }

    pub fn from_configuration(
        function: F,
        configuration: &Configuration,
    ) -> Result<Derivative<F>, CalculusError> {
        Self::with_options(
            function,
            configuration.step_size,
            configuration.difference_method,
        )
    }

    pub fn h(&self) -> f64 {
        self.h
    }

    pub fn method(&self) -> DifferenceMethod {
        self.method
    }

    pub fn at(&self, x: f64) -> f64 {
        self.method.estimate(&self.function, x, self.h)
    }

    /// 從 x_start 起以間距 dx 在 n_points 個等距點上取樣導數，
    /// 回傳 (x, f'(x)) 點列，供粗略視覺化或臨界點掃描用。
    pub fn gradient(&self, x_start: f64, dx: f64, n_points: usize) -> Vec<Point2D> {
        let stop = x_start + dx * n_points.saturating_sub(1) as f64;
        linspace(x_start, stop, n_points)
            .into_iter()
            .map(|x| Point2D::new(x, self.at(x)))
            .collect()
    }
}
