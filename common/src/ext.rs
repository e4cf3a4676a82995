use nalgebra::{Unit, Vector3};

pub trait ExtendVector3 {
    /// Normalize, or `None` for near-zero vectors. Call sites that must keep
    /// a previous heading when the input degenerates should prefer this over
    /// `normalize`, which would produce NaN.
    fn try_axis(&self) -> Option<Unit<Vector3<f32>>>;
    /// Linear blend toward `target` by `amount` (0 = unchanged, 1 = target).
    fn blend_toward(&self, target: &Vector3<f32>, amount: f32) -> Vector3<f32>;
}

impl ExtendVector3 for Vector3<f32> {
    fn try_axis(&self) -> Option<Unit<Vector3<f32>>> {
        Unit::try_new(*self, 1e-9)
    }

    fn blend_toward(&self, target: &Vector3<f32>, amount: f32) -> Vector3<f32> {
        self + (target - self) * amount
    }
}

#[cfg(test)]
mod tests {
    use crate::ext::ExtendVector3;
    use nalgebra::Vector3;

    #[test]
    fn try_axis_rejects_zero() {
        assert!(Vector3::zeros().try_axis().is_none());
        let axis = Vector3::new(0.0, 3.0, 0.0).try_axis().unwrap();
        assert_eq!(axis.into_inner(), Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn blend_toward_endpoints() {
        let a = Vector3::new(1.0, 0.0, 0.0);
        let b = Vector3::new(0.0, 1.0, 0.0);
        assert_eq!(a.blend_toward(&b, 0.0), a);
        assert_eq!(a.blend_toward(&b, 1.0), b);
        let mid = a.blend_toward(&b, 0.5);
        assert_eq!(mid, Vector3::new(0.5, 0.5, 0.0));
    }
}
