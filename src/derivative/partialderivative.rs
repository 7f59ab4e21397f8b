use nalgebra::{DMatrix, DVector};

use crate::calculuserror::CalculusError;
use crate::configuration::Configuration;
use crate::derivative::derivative::DEFAULT_STEP_SIZE;
use crate::function::function::ScalarField;
use crate::validation::{validate_step, validate_var_index};

pub struct PartialDerivative<F: ScalarField> {
    function: F,
    h: f64,
}

impl<F: ScalarField> PartialDerivative<F> {
    pub fn new(function: F) -> PartialDerivative<F> {
        PartialDerivative {
            function,
            h: DEFAULT_STEP_SIZE,
        }
    }

    pub fn with_step(function: F, h: f64) -> Result<PartialDerivative<F>, CalculusError> {
        validate_step(h)?;
        Ok(PartialDerivative { function, h })
    }

    pub fn from_configuration(
        function: F,
        configuration: &Configuration,
    ) -> Result<PartialDerivative<F>, CalculusError> {
        Self::with_step(function, configuration.step_size)
    }

    pub fn h(&self) -> f64 {
        self.h
    }

    /// ∂f/∂x_i:只擾動第 var_index 個座標做中央差分,其餘座標固定。
    pub fn at(&self, point: &[f64], var_index: usize) -> Result<f64, CalculusError> {
        validate_var_index(var_index, point.len())?;
        Ok(self.central(point, var_index))
    }

    fn central(&self, point: &[f64], var_index: usize) -> f64 {
        let mut shifted = point.to_vec();
        shifted[var_index] = point[var_index] + self.h;
        let upper = self.function.evaluate(&shifted);
        shifted[var_index] = point[var_index] - self.h;
        let lower = self.function.evaluate(&shifted);
        (upper - lower) / (2.0 * self.h)
    }

    /// 梯度:各座標方向的偏導數,依座標順序排列。
    pub fn gradient_vector(&self, point: &[f64]) -> DVector<f64> {
        DVector::from_iterator(
            point.len(),
            (0..point.len()).map(|i| self.central(point, i)),
        )
    }

    /// 純量函數的 Jacobian 是單列矩陣(1 × n),即梯度的轉置。
    pub fn jacobian(&self, point: &[f64]) -> DMatrix<f64> {
        let gradient = self.gradient_vector(point);
        DMatrix::from_rows(&[gradient.transpose()])
    }
}
