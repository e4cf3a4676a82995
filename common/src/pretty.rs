use nalgebra::{Point3, Real, Vector3};
use std::fmt::{self, Formatter};

/// Compact display adapters for log lines, where `Debug` output of nalgebra
/// types is far too noisy.
pub trait PrettyPrint {
    type PrettyPrinter: fmt::Display;
    fn pretty(&self) -> Self::PrettyPrinter;
}

impl<N: Real> PrettyPrint for Vector3<N> {
    type PrettyPrinter = Vector3PrettyPrinter<N>;

    fn pretty(&self) -> Self::PrettyPrinter {
        Self::PrettyPrinter { data: *self }
    }
}

impl<N: Real> PrettyPrint for Point3<N> {
    type PrettyPrinter = Vector3PrettyPrinter<N>;

    fn pretty(&self) -> Self::PrettyPrinter {
        Self::PrettyPrinter { data: self.coords }
    }
}

pub struct Vector3PrettyPrinter<N: Real> {
    data: Vector3<N>,
}

impl<N: Real> fmt::Display for Vector3PrettyPrinter<N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(
            f,
            "({:.2}, {:.2}, {:.2})",
            self.data.x, self.data.y, self.data.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::pretty::PrettyPrint;
    use nalgebra::{Point3, Vector3};

    #[test]
    fn formats_compactly() {
        let v = Vector3::new(1.0_f32, -2.5, 0.25);
        assert_eq!(format!("{}", v.pretty()), "(1.00, -2.50, 0.25)");
        let p = Point3::new(0.0_f32, 0.0, 0.0);
        assert_eq!(format!("{}", p.pretty()), "(0.00, 0.00, 0.00)");
    }
}
