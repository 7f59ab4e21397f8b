use crate::calculuserror::CalculusError;
use crate::configuration::Configuration;
use crate::function::function::RealFunction;
use crate::math::round::round;
use crate::series::cachebackend::{CoefficientCache, RefCellBackend, RwLockBackend};
use crate::validation::validate_truncation_order;

pub const DEFAULT_TRUNCATION_ORDER: usize = 10;

/// 多項式字串中省略 |c_k| 小於此值的項。
const DISPLAY_THRESHOLD: f64 = 1e-10;

// ─────────────────────────────────────────────
// TaylorSeries
// ─────────────────────────────────────────────
//
// 截斷泰勒展開:f(x) ≈ Σ_{k=0}^{n-1} c_k (x - center)^k,
// c_k = f^(k)(center) / k!。
//
// f^(k) 以迭代差分表計算(見 kth_derivative),不用遞迴:
// 深度與誤差累積都以 n 為界,清楚可見。誤差仍隨 k 複利 —
// 這是數值方法相對符號微分的既定取捨,高階項精度遞減。
//
// 係數依中心快取;後端決定執行緒安全性(cachebackend.rs),
// 核心 struct 只寫一次。

pub struct TaylorSeries<F: RealFunction, C: CoefficientCache = RefCellBackend> {
    function: F,
    n: usize,
    cache: C,
}

/// 單執行緒預設後端的 convenience constructor
impl<F: RealFunction> TaylorSeries<F, RefCellBackend> {
    pub fn new(function: F) -> Self {
        Self::with_backend(function, DEFAULT_TRUNCATION_ORDER, RefCellBackend::new())
    }

    pub fn with_order(function: F, n: usize) -> Result<Self, CalculusError> {
        validate_truncation_order(n)?;
        Ok(Self::with_backend(function, n, RefCellBackend::new()))
    }

    pub fn from_configuration(
        function: F,
        configuration: &Configuration,
    ) -> Result<Self, CalculusError> {
        Self::with_order(function, configuration.truncation_order)
    }
}

/// 可跨執行緒共享的版本
impl<F: RealFunction> TaylorSeries<F, RwLockBackend> {
    pub fn new_threadsafe(function: F) -> Self {
        Self::with_backend(function, DEFAULT_TRUNCATION_ORDER, RwLockBackend::new())
    }

    pub fn with_order_threadsafe(function: F, n: usize) -> Result<Self, CalculusError> {
        validate_truncation_order(n)?;
        Ok(Self::with_backend(function, n, RwLockBackend::new()))
    }
}

impl<F: RealFunction, C: CoefficientCache> TaylorSeries<F, C> {
    fn with_backend(function: F, n: usize, cache: C) -> Self {
        Self { function, n, cache }
    }

    pub fn truncation_order(&self) -> usize {
        self.n
    }

    /// c_0 .. c_{n-1},依中心快取。
    pub fn coefficients(&self, center: f64) -> Vec<f64> {
        self.cache
            .get_or_compute(center.to_bits(), || self.compute_coefficients(center))
    }

    fn compute_coefficients(&self, center: f64) -> Vec<f64> {
        let mut coefficients = Vec::with_capacity(self.n);
        let mut factorial = 1.0;
        for k in 0..self.n {
            if k == 0 {
                coefficients.push(self.function.evaluate(center));
                continue;
            }
            factorial *= k as f64;
            coefficients.push(self.kth_derivative(center, k) / factorial);
        }
        coefficients
    }

    /// k 階導數:對稱差分表。
    ///
    /// 在 x + (j - k/2)·h 取 k+1 個樣本(j = 0..k,樣本群以 x 為中心),
    /// 對差分表就地做 k 回一階前向差分,結果即 Δ^k f / h^k —
    /// 等價於 k 階中央差分,截斷誤差 O(h²)。
    ///
    /// 步長逐階放大:h_k = 2·ε^(1/(k+2))。
    /// 截斷誤差 ∝ h²,捨入誤差 ∝ 2^k·ε/h^k,ε^(1/(k+2)) 是兩者的
    /// 平衡點;係數 2 把工作點往截斷側偏移,因為捨入項以 2^k 複利,
    /// 對高階 k 遠比 h² 的損失致命。
    fn kth_derivative(&self, x: f64, k: usize) -> f64 {
        let h = 2.0 * f64::EPSILON.powf(1.0 / (k as f64 + 2.0));
        let half_span = k as f64 / 2.0;
        let mut table: Vec<f64> = (0..=k)
            .map(|j| self.function.evaluate(x + (j as f64 - half_span) * h))
            .collect();

        for level in 0..k {
            for j in 0..(k - level) {
                table[j] = (table[j + 1] - table[j]) / h;
            }
        }
        table[0]
    }

    /// Horner 求值:Σ c_k (x - center)^k。
    pub fn at(&self, x: f64, center: f64) -> f64 {
        let coefficients = self.coefficients(center);
        let dx = x - center;
        let mut result = 0.0;
        for &coefficient in coefficients.iter().rev() {
            result = f64::mul_add(result, dx, coefficient);
        }
        result
    }

    /// Lagrange 餘項式的啟發式估計:最後一個保留項的絕對值。
    /// 不是嚴格上界。
    pub fn error_estimate(&self, x: f64, center: f64) -> f64 {
        let coefficients = self.coefficients(center);
        match coefficients.last() {
            Some(&last) => (last * (x - center).powi((self.n - 1) as i32)).abs(),
            None => 0.0,
        }
    }

    /// 截斷多項式的可讀字串。係數捨入到 4 位小數,
    /// |c_k| < 1e-10 的項省略;全部省略時回傳 "0"。
    pub fn polynomial_string(&self, center: f64) -> String {
        let coefficients = self.coefficients(center);
        let variable = if center == 0.0 {
            "x".to_string()
        } else if center > 0.0 {
            format!("(x - {})", round(center, 4))
        } else {
            format!("(x + {})", round(-center, 4))
        };

        let mut rendered = String::new();
        for (k, &coefficient) in coefficients.iter().enumerate() {
            if coefficient.abs() < DISPLAY_THRESHOLD {
                continue;
            }

            if rendered.is_empty() {
                if coefficient < 0.0 {
                    rendered.push('-');
                }
            } else if coefficient < 0.0 {
                rendered.push_str(" - ");
            } else {
                rendered.push_str(" + ");
            }

            let magnitude = round(coefficient.abs(), 4);
            if k == 0 {
                rendered.push_str(&magnitude.to_string());
            } else {
                if (magnitude - 1.0).abs() >= DISPLAY_THRESHOLD {
                    rendered.push_str(&magnitude.to_string());
                }
                rendered.push_str(&variable);
                if k > 1 {
                    rendered.push_str(&format!("^{}", k));
                }
            }
        }

        if rendered.is_empty() {
            rendered.push('0');
        }
        rendered
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn exponential_series_converges_at_one() {
        let taylor = TaylorSeries::with_order(f64::exp, 12).unwrap();
        assert_relative_eq!(taylor.at(1.0, 0.0), 1.0f64.exp(), epsilon = 1e-4);
    }

    #[test]
    fn sine_and_cosine_series_near_zero() {
        let sine = TaylorSeries::new(f64::sin);
        assert_relative_eq!(sine.at(0.5, 0.0), 0.5f64.sin(), epsilon = 1e-2);

        let cosine = TaylorSeries::new(f64::cos);
        assert_relative_eq!(cosine.at(0.5, 0.0), 0.5f64.cos(), epsilon = 1e-2);
    }

    #[test]
    fn polynomial_is_reproduced() {
        // f(x) = x² + 2x + 1 的展開在任何點都應還原自身
        let taylor = TaylorSeries::with_order(|x: f64| x * x + 2.0 * x + 1.0, 5).unwrap();
        assert_relative_eq!(taylor.at(1.0, 0.0), 4.0, epsilon = 1e-2);
    }

    #[test]
    fn expansion_around_a_noncentral_point() {
        let taylor = TaylorSeries::with_order(|x: f64| x * x, 5).unwrap();
        assert_relative_eq!(taylor.at(2.5, 2.0), 6.25, epsilon = 1e-1);
    }

    #[test]
    fn low_order_coefficients_match_known_values() {
        // exp 在 0 的係數:1, 1, 1/2, 1/6
        let taylor = TaylorSeries::with_order(f64::exp, 4).unwrap();
        let coefficients = taylor.coefficients(0.0);
        assert_eq!(coefficients.len(), 4);
        assert_relative_eq!(coefficients[0], 1.0, epsilon = 1e-8);
        assert_relative_eq!(coefficients[1], 1.0, epsilon = 1e-6);
        assert_relative_eq!(coefficients[2], 0.5, epsilon = 1e-4);
        assert_relative_eq!(coefficients[3], 1.0 / 6.0, epsilon = 1e-3);
    }

    #[test]
    fn coefficients_have_exactly_n_entries() {
        let taylor = TaylorSeries::with_order(|x: f64| x * x, 5).unwrap();
        assert_eq!(taylor.coefficients(0.0).len(), 5);
        assert_eq!(taylor.coefficients(1.0).len(), 5);
    }

    #[test]
    fn error_estimate_shrinks_with_order() {
        let orders = [6, 10, 14];
        let mut estimates = Vec::new();
        for n in orders {
            let taylor = TaylorSeries::with_order(f64::exp, n).unwrap();
            let estimate = taylor.error_estimate(1.0, 0.0);
            assert!(estimate >= 0.0);
            estimates.push(estimate);
        }
        assert!(estimates[0] > estimates[1]);
        assert!(estimates[1] > estimates[2]);
    }

    #[test]
    fn polynomial_string_renders_signs_and_powers() {
        let taylor = TaylorSeries::with_order(|x: f64| x * x, 3).unwrap();
        let rendered = taylor.polynomial_string(0.0);
        assert!(!rendered.is_empty());
        assert!(rendered.contains("x^2"));

        let shifted = taylor.polynomial_string(1.0);
        assert!(shifted.contains("(x - 1)"));
    }

    #[test]
    fn repeated_queries_hit_the_cache_bitwise() {
        let taylor = TaylorSeries::new(f64::exp);
        let first = taylor.at(1.0, 0.0);
        let second = taylor.at(1.0, 0.0);
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn threadsafe_variant_agrees_across_threads() {
        let taylor = TaylorSeries::new_threadsafe(f64::exp);
        let reference = taylor.at(1.0, 0.0);
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    assert_eq!(taylor.at(1.0, 0.0).to_bits(), reference.to_bits());
                });
            }
        });
    }

    #[test]
    fn zero_truncation_order_is_rejected() {
        assert!(TaylorSeries::with_order(f64::exp, 0).is_err());
    }
}
