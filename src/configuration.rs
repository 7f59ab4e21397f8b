use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::calculuserror::CalculusError;
use crate::derivative::derivative::{DEFAULT_STEP_SIZE, DifferenceMethod};
use crate::integral::doubleintegral::DEFAULT_SUBDIVISIONS_PER_AXIS;
use crate::integral::integral::{DEFAULT_SUBDIVISIONS, QuadratureRule};
use crate::limit::limit::DEFAULT_TOLERANCE;
use crate::series::taylorseries::DEFAULT_TRUNCATION_ORDER;
use crate::validation::{
    validate_step,
    validate_subdivisions,
    validate_tolerance,
    validate_truncation_order,
};

/// 整組數值預設值,可整份或部分從 JSON 檔載入;
/// 缺漏的欄位一律落回內建預設。
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub step_size: f64,
    pub subdivisions: usize,
    pub subdivisions_per_axis: usize,
    pub tolerance: f64,
    pub truncation_order: usize,
    pub difference_method: DifferenceMethod,
    pub quadrature_rule: QuadratureRule,
}

impl Default for Configuration {
    fn default() -> Configuration {
        Configuration {
            step_size: DEFAULT_STEP_SIZE,
            subdivisions: DEFAULT_SUBDIVISIONS,
            subdivisions_per_axis: DEFAULT_SUBDIVISIONS_PER_AXIS,
            tolerance: DEFAULT_TOLERANCE,
            truncation_order: DEFAULT_TRUNCATION_ORDER,
            difference_method: DifferenceMethod::Central,
            quadrature_rule: QuadratureRule::Simpson,
        }
    }
}

impl Configuration {
    pub fn new() -> Configuration {
        Configuration::default()
    }

    pub fn from_reader(file_path: impl AsRef<Path>) -> Result<Configuration, CalculusError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let configuration: Configuration = serde_json::from_reader(reader)?;
        configuration.validate()?;
        Ok(configuration)
    }

    pub fn validate(&self) -> Result<(), CalculusError> {
        validate_step(self.step_size)?;
        validate_subdivisions(self.subdivisions)?;
        validate_subdivisions(self.subdivisions_per_axis)?;
        validate_tolerance(self.tolerance)?;
        validate_truncation_order(self.truncation_order)?;
        Ok(())
    }
}
