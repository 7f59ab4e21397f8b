use nalgebra::{DMatrix, DVector};

use crate::calculuserror::CalculusError;
use crate::derivative::derivative::DEFAULT_STEP_SIZE;
use crate::function::function::VectorField;
use crate::validation::validate_step;

/// 向量值函數 R^n → R^m 的 Jacobian。
///
/// 第 (i, j) 個元素是第 i 個輸出對第 j 個輸入的偏導數。
/// 每個座標方向只需擾動一次:一次求值就得到該方向上所有輸出的差分,
/// 共 2n 次函數呼叫,而非逐元素的 2mn 次。
/// 輸出維度 m 不必事先宣告,由在查詢點上求值一次探得。
pub struct Jacobian<F: VectorField> {
    function: F,
    h: f64,
}

impl<F: VectorField> Jacobian<F> {
    pub fn new(function: F) -> Jacobian<F> {
        Jacobian {
            function,
            h: DEFAULT_STEP_SIZE,
        }
    }

    pub fn with_step(function: F, h: f64) -> Result<Jacobian<F>, CalculusError> {
        validate_step(h)?;
        Ok(Jacobian { function, h })
    }

    pub fn at(&self, point: &[f64]) -> DMatrix<f64> {
        if point.is_empty() {
            return DMatrix::zeros(0, 0);
        }

        let columns: Vec<DVector<f64>> = (0..point.len())
            .map(|j| {
                let mut shifted = point.to_vec();
                shifted[j] = point[j] + self.h;
                let upper = self.function.evaluate(&shifted);
                shifted[j] = point[j] - self.h;
                let lower = self.function.evaluate(&shifted);
                DVector::from_iterator(
                    upper.len(),
                    upper
                        .iter()
                        .zip(lower.iter())
                        .map(|(u, l)| (u - l) / (2.0 * self.h)),
                )
            })
            .collect();

        DMatrix::from_columns(&columns)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn jacobian_of_plane_map() {
        // f(x, y) = (x^2 y, sin x) -> J = [[2xy, x^2], [cos x, 0]]
        let jacobian = Jacobian::new(|point: &[f64]| {
            vec![point[0] * point[0] * point[1], point[0].sin()]
        });
        let matrix = jacobian.at(&[1.0, 2.0]);
        assert_eq!(matrix.nrows(), 2);
        assert_eq!(matrix.ncols(), 2);
        assert_relative_eq!(matrix[(0, 0)], 4.0, epsilon = 1e-5);
        assert_relative_eq!(matrix[(0, 1)], 1.0, epsilon = 1e-5);
        assert_relative_eq!(matrix[(1, 0)], 1.0f64.cos(), epsilon = 1e-5);
        assert_relative_eq!(matrix[(1, 1)], 0.0, epsilon = 1e-5);
    }

    #[test]
    fn single_output_matches_gradient_row() {
        let jacobian = Jacobian::new(|point: &[f64]| vec![point[0] * point[1]]);
        let matrix = jacobian.at(&[2.0, 3.0]);
        assert_eq!(matrix.nrows(), 1);
        assert_relative_eq!(matrix[(0, 0)], 3.0, epsilon = 1e-5);
        assert_relative_eq!(matrix[(0, 1)], 2.0, epsilon = 1e-5);
    }

    #[test]
    fn empty_point_yields_empty_matrix() {
        let jacobian = Jacobian::new(|_point: &[f64]| vec![1.0]);
        let matrix = jacobian.at(&[]);
        assert_eq!(matrix.nrows(), 0);
        assert_eq!(matrix.ncols(), 0);
    }

    #[test]
    fn invalid_step_is_rejected() {
        assert!(Jacobian::with_step(|_point: &[f64]| vec![0.0], f64::NAN).is_err());
    }
}
