use std::f64::consts::PI;

pub trait Deg {
    fn deg(&self) -> Self;
    fn rad(&self) -> Self;
}

impl Deg for f64 {
    fn deg(&self) -> f64 {
        self * 180.0 / PI
    }
    fn rad(&self) -> f64 {
        self * PI / 180.0
    }
}
