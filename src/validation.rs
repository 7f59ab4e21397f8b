use crate::calculuserror::CalculusError;

pub fn validate_step(h: f64) -> Result<(), CalculusError> {
    if h.is_finite() && h > 0.0 {
        Ok(())
    } else {
        Err(CalculusError::NonPositiveStep(h))
    }
}

pub fn validate_tolerance(epsilon: f64) -> Result<(), CalculusError> {
    if epsilon.is_finite() && epsilon > 0.0 {
        Ok(())
    } else {
        Err(CalculusError::NonPositiveTolerance(epsilon))
    }
}

pub fn validate_period(period: f64) -> Result<(), CalculusError> {
    if period.is_finite() && period > 0.0 {
        Ok(())
    } else {
        Err(CalculusError::NonPositivePeriod(period))
    }
}

pub fn validate_bounds(a: f64, b: f64) -> Result<(), CalculusError> {
    for bound in [a, b] {
        if !bound.is_finite() {
            return Err(CalculusError::NonFiniteBound(bound));
        }
    }
    Ok(())
}

pub fn validate_subdivisions(n: usize) -> Result<(), CalculusError> {
    if n == 0 {
        Err(CalculusError::ZeroSubdivisions)
    } else {
        Ok(())
    }
}

pub fn validate_truncation_order(n: usize) -> Result<(), CalculusError> {
    if n == 0 {
        Err(CalculusError::ZeroTruncationOrder)
    } else {
        Ok(())
    }
}

pub fn validate_point(point: &[f64], dimension: usize) -> Result<(), CalculusError> {
    if point.len() != dimension {
        Err(CalculusError::DimensionMismatch {
            expected: dimension,
            actual: point.len(),
        })
    } else {
        Ok(())
    }
}

pub fn validate_var_index(index: usize, dimension: usize) -> Result<(), CalculusError> {
    if index >= dimension {
        Err(CalculusError::IndexOutOfDimension { index, dimension })
    } else {
        Ok(())
    }
}
