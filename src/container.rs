use crate::{
    error::{Error, Result},
    utils::{Axis, Vector3},
};

/// Cubic simulation box `[0, box_size)^3`, periodic along every axis
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Container {
    box_size: f64,
}
impl Container {
    // Creation

    /// Create a periodic cubic container with the given edge length
    pub fn new(box_size: f64) -> Result<Self> {
        if !(box_size > 0.0 && box_size.is_finite()) {
            return Err(Error::config(format!(
                "Box size should be positive, found {}",
                box_size
            )));
        }
        Ok(Self { box_size })
    }
    /// Create the container holding `size` unit cells with lattice constant `a` per axis
    pub fn from_lattice(size: usize, a: f64) -> Result<Self> {
        Self::new(size as f64 * a)
    }

    // Getters

    pub fn box_size(&self) -> f64 {
        self.box_size
    }
    pub fn volume(&self) -> f64 {
        self.box_size * self.box_size * self.box_size
    }
    /// Whether a point lies in the canonical cell `[0, box_size)^3`
    pub fn contains(&self, pos: &Vector3) -> bool {
        Axis::ALL
            .iter()
            .all(|&axis| 0.0 <= pos[axis] && pos[axis] < self.box_size)
    }
    /// Whether a point lies strictly inside the central sub-cube `(L/4, 3L/4)^3`
    pub fn in_central_region(&self, pos: &Vector3) -> bool {
        let lo = 0.25 * self.box_size;
        let hi = 0.75 * self.box_size;
        Axis::ALL
            .iter()
            .all(|&axis| lo < pos[axis] && pos[axis] < hi)
    }

    // Periodic boundaries

    /// Squared separation `p1 - p2` under the minimum-image convention.
    ///
    /// No axis component of the returned displacement exceeds half the box size.
    pub fn separation_squared(&self, p1: &Vector3, p2: &Vector3) -> (f64, Vector3) {
        let half = 0.5 * self.box_size;
        let mut d = *p1 - *p2;
        for axis in Axis::ALL {
            if d[axis].abs() > half {
                d[axis] -= d[axis].signum() * self.box_size;
            }
        }
        (d.squared_magnitude(), d)
    }

    /// Wrap a position back into the box.
    ///
    /// Returns the wrapped position and the momentum carried across the faces:
    /// `+momentum` on an axis for each exit through the upper face, `-momentum`
    /// for each exit through the lower face.
    pub fn periodic(&self, pos: Vector3, momentum: Vector3) -> (Vector3, Vector3) {
        let mut wrapped = pos;
        let mut crossing = Vector3::default();
        for axis in Axis::ALL {
            let p = &mut wrapped[axis];
            while *p >= self.box_size {
                *p -= self.box_size;
                crossing[axis] += momentum[axis];
            }
            while *p < 0.0 {
                *p += self.box_size;
                crossing[axis] -= momentum[axis];
            }
            // rounding of a tiny negative coordinate can land on the upper face
            if *p >= self.box_size {
                *p = 0.0;
            }
        }
        (wrapped, crossing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use num_traits::Zero;

    fn container() -> Container {
        Container::new(2.0).unwrap()
    }

    #[test]
    fn rejects_non_positive_box() {
        assert!(Container::new(0.0).is_err());
        assert!(Container::new(-1.0).is_err());
        assert!(Container::new(f64::NAN).is_err());
    }

    #[test]
    fn separation_at_identical_points() {
        let p = Vector3::new(0.3, 1.2, 1.9);
        let (r2, d) = container().separation_squared(&p, &p);
        assert_eq!(r2, 0.0);
        assert!(d.is_zero());
    }

    #[test]
    fn separation_inside_half_box_is_plain_difference() {
        let p1 = Vector3::new(1.5, 1.0, 0.2);
        let p2 = Vector3::new(0.8, 0.4, 0.9);
        let (r2, d) = container().separation_squared(&p1, &p2);
        assert_eq!(d, p1 - p2);
        assert_eq!(r2, (p1 - p2).squared_magnitude());
    }

    #[test]
    fn separation_across_half_box_uses_nearest_image() {
        let p1 = Vector3::new(1.9, 0.0, 0.0);
        let p2 = Vector3::new(0.1, 0.0, 0.0);
        let (r2, d) = container().separation_squared(&p1, &p2);
        assert_relative_eq!(d.x.abs(), 2.0 - 1.8, epsilon = 1e-12);
        assert_relative_eq!(d.x, -0.2, epsilon = 1e-12);
        assert_relative_eq!(r2, 0.04, epsilon = 1e-12);

        let (_, d) = container().separation_squared(&p2, &p1);
        assert_relative_eq!(d.x, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn periodic_keeps_in_box_positions() {
        let pos = Vector3::new(0.0, 1.0, 1.999);
        let (wrapped, crossing) = container().periodic(pos, Vector3::splat(5.0));
        assert_eq!(wrapped, pos);
        assert!(crossing.is_zero());
    }

    #[test]
    fn periodic_wraps_upper_face_with_positive_flux() {
        let pos = Vector3::new(2.5, 0.5, 2.0);
        let momentum = Vector3::new(3.0, 4.0, 7.0);
        let (wrapped, crossing) = container().periodic(pos, momentum);
        assert_relative_eq!(wrapped.x, 0.5);
        assert_eq!(wrapped.y, 0.5);
        assert_eq!(wrapped.z, 0.0);
        assert_eq!(crossing, Vector3::new(3.0, 0.0, 7.0));
    }

    #[test]
    fn periodic_wraps_lower_face_with_negative_flux() {
        let pos = Vector3::new(-0.5, 1.0, -2.0);
        let momentum = Vector3::new(-3.0, 4.0, -1.0);
        let (wrapped, crossing) = container().periodic(pos, momentum);
        assert_relative_eq!(wrapped.x, 1.5);
        assert_eq!(wrapped.z, 0.0);
        assert_eq!(crossing, Vector3::new(3.0, 0.0, 1.0));
        assert!(container().contains(&wrapped));
    }

    #[test]
    fn central_region() {
        let c = container();
        assert!(c.in_central_region(&Vector3::splat(1.0)));
        assert!(!c.in_central_region(&Vector3::new(1.0, 1.0, 0.5)));
        assert!(!c.in_central_region(&Vector3::new(1.0, 0.1, 1.0)));
    }
}
