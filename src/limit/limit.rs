use serde::Deserialize;

use crate::calculuserror::CalculusError;
use crate::configuration::Configuration;
use crate::function::function::RealFunction;
use crate::math::utility::is_close;
use crate::validation::validate_tolerance;

pub const DEFAULT_TOLERANCE: f64 = 1e-10;

// δ 序列的指數範圍:10^-1 .. 10^-8。
// 不再往下取:對 (x²-1)/(x-1) 這類可移除奇點,f 求值的消去誤差
// ~ ε/δ,在 δ = 1e-8 附近開始壓過剩餘的截斷誤差,再細分只會劣化估計。
const APPROACH_EXPONENTS: std::ops::RangeInclusive<i32> = 1..=8;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub enum LimitDirection {
    Left,
    Right,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub enum InfinityDirection {
    Positive,
    Negative,
}

// ─────────────────────────────────────────────
// Limit
// ─────────────────────────────────────────────
//
// 以序列收斂估計極限:從指定側令 x_n → x0,觀察 f(x_n)。
//
//   - 相鄰兩個估計值之差 < epsilon 即視為已穩定,提前回傳;
//     序列走完仍未穩定則回傳最後一個估計。
//   - f 在某樣本點回傳非有限值(NaN / ±inf)時,視為「該點不可達」
//     而跳過;整條序列全數失敗才報告極限不存在。
//   - 雙側查詢要求左右估計以 is_close(組合式相對/絕對容差)吻合,
//     而非原始 epsilon — 兩側各帶 O(δ_min) 的殘餘截斷,嚴格 epsilon
//     會把每個平滑函數都誤判為不存在。

pub struct Limit<F: RealFunction> {
    function: F,
    epsilon: f64,
}

impl<F: RealFunction> Limit<F> {
    pub fn new(function: F) -> Limit<F> {
        Limit {
            function,
            epsilon: DEFAULT_TOLERANCE,
        }
    }

    pub fn with_tolerance(function: F, epsilon: f64) -> Result<Limit<F>, CalculusError> {
        validate_tolerance(epsilon)?;
        Ok(Limit { function, epsilon })
    }

    pub fn from_configuration(
        function: F,
        configuration: &Configuration,
    ) -> Result<Limit<F>, CalculusError> {
        Self::with_tolerance(function, configuration.tolerance)
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    fn stabilize(
        &self,
        samples: impl Iterator<Item = f64>,
        approaching: f64,
    ) -> Result<f64, CalculusError> {
        let mut last: Option<f64> = None;
        for x in samples {
            let value = self.function.evaluate(x);
            if !value.is_finite() {
                continue;
            }
            if let Some(previous) = last {
                if (value - previous).abs() < self.epsilon {
                    return Ok(value);
                }
            }
            last = Some(value);
        }
        last.ok_or(CalculusError::EverySampleFailed { at: approaching })
    }

    pub fn left(&self, x0: f64) -> Result<f64, CalculusError> {
        self.stabilize(APPROACH_EXPONENTS.map(move |k| x0 - 10f64.powi(-k)), x0)
    }

    pub fn right(&self, x0: f64) -> Result<f64, CalculusError> {
        self.stabilize(APPROACH_EXPONENTS.map(move |k| x0 + 10f64.powi(-k)), x0)
    }

    pub fn at(&self, x0: f64) -> Result<f64, CalculusError> {
        self.at_directed(x0, LimitDirection::Both)
    }

    pub fn at_directed(&self, x0: f64, direction: LimitDirection) -> Result<f64, CalculusError> {
        match direction {
            LimitDirection::Left => self.left(x0),
            LimitDirection::Right => self.right(x0),
            LimitDirection::Both => {
                let left = self.left(x0)?;
                let right = self.right(x0)?;
                if is_close(left, right) {
                    Ok((left + right) / 2.0)
                } else {
                    Err(CalculusError::LimitDoesNotExist { left, right })
                }
            }
        }
    }

    pub fn exists(&self, x0: f64) -> bool {
        self.at(x0).is_ok()
    }

    /// 連續 ⟺ 極限存在且等於 f(x0)。f 在 x0 無定義(非有限)時
    /// 回報不連續,而非錯誤。
    pub fn is_continuous(&self, x0: f64) -> bool {
        match self.at(x0) {
            Ok(limit) => {
                let value = self.function.evaluate(x0);
                value.is_finite() && is_close(limit, value)
            }
            Err(_) => false,
        }
    }

    /// x → ±∞ 的極限:同一套穩定化流程,改用遞增量級序列 ±10^1 .. ±10^8。
    pub fn as_x_approaches_infinity(
        &self,
        direction: InfinityDirection,
    ) -> Result<f64, CalculusError> {
        let sign = match direction {
            InfinityDirection::Positive => 1.0,
            InfinityDirection::Negative => -1.0,
        };
        self.stabilize(
            APPROACH_EXPONENTS.map(move |k| sign * 10f64.powi(k)),
            sign * f64::INFINITY,
        )
    }
}
