

pub trait RealFunction {
    fn evaluate(&self, x: f64) -> f64;
}

impl<F> RealFunction for F
where
    F: Fn(f64) -> f64,
{
    fn evaluate(&self, x: f64) -> f64 {
        self(x)
    }
}

pub trait ScalarField {
    fn evaluate(&self, point: &[f64]) -> f64;
}

impl<F> ScalarField for F
where
    F: Fn(&[f64]) -> f64,
{
    fn evaluate(&self, point: &[f64]) -> f64 {
        self(point)
    }
}

pub trait VectorField {
    fn evaluate(&self, point: &[f64]) -> Vec<f64>;
}

impl<F> VectorField for F
where
    F: Fn(&[f64]) -> Vec<f64>,
{
    fn evaluate(&self, point: &[f64]) -> Vec<f64> {
        self(point)
    }
}
