//! Axis-aligned bounding boxes accumulated during a render.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle grown to cover every point a turtle visits.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Lower-left corner.
    pub min: DVec2,

    /// Upper-right corner.
    pub max: DVec2,
}

impl BoundingBox {
    /// The zero-area box at `point`.
    pub fn at(point: DVec2) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Grows the box to cover `point`.
    pub fn include(&mut self, point: DVec2) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn union(self, other: BoundingBox) -> BoundingBox {
        BoundingBox {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn contains(&self, point: DVec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn include_grows_in_every_direction() {
        let mut bbox = BoundingBox::at(DVec2::new(1.0, 1.0));
        assert_eq!(bbox.width(), 0.0);

        bbox.include(DVec2::new(-2.0, 3.0));
        bbox.include(DVec2::new(4.0, 0.5));
        assert_eq!(bbox.min, DVec2::new(-2.0, 0.5));
        assert_eq!(bbox.max, DVec2::new(4.0, 3.0));
        assert!(bbox.contains(DVec2::new(1.0, 1.0)));
        assert!(!bbox.contains(DVec2::new(5.0, 1.0)));
    }

    #[test]
    fn union_covers_both() {
        let a = BoundingBox::at(DVec2::ZERO);
        let b = BoundingBox::at(DVec2::new(2.0, -1.0));
        let u = a.union(b);
        assert_eq!(u.width(), 2.0);
        assert_eq!(u.height(), 1.0);
    }
}
