use serde::Serialize;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aabb {
    /// Minimum corner
    pub min: [f32; 3],
    /// Maximum corner
    pub max: [f32; 3],
}

impl Aabb {
    /// Smallest box containing every point, or `None` for no points
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a [f32; 3]>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut bbox = Self {
            min: first,
            max: first,
        };
        for p in iter {
            for axis in 0..3 {
                bbox.min[axis] = bbox.min[axis].min(p[axis]);
                bbox.max[axis] = bbox.max[axis].max(p[axis]);
            }
        }
        Some(bbox)
    }

    /// Box center
    pub fn center(&self) -> [f32; 3] {
        [0, 1, 2].map(|axis| (self.min[axis] + self.max[axis]) * 0.5)
    }

    /// Extent along each axis as `[width, height, depth]`
    pub fn size(&self) -> [f32; 3] {
        [0, 1, 2].map(|axis| self.max[axis] - self.min[axis])
    }

    /// Largest extent
    pub fn max_dimension(&self) -> f32 {
        self.size().into_iter().fold(0.0, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let points = [[1.0, -2.0, 3.0], [-1.0, 4.0, 0.0], [0.5, 0.0, 9.0]];
        let bbox = Aabb::from_points(&points).unwrap();
        assert_eq!(bbox.min, [-1.0, -2.0, 0.0]);
        assert_eq!(bbox.max, [1.0, 4.0, 9.0]);
        assert_eq!(bbox.center(), [0.0, 1.0, 4.5]);
        assert_eq!(bbox.size(), [2.0, 6.0, 9.0]);
        assert_eq!(bbox.max_dimension(), 9.0);
    }

    #[test]
    fn test_from_points_empty() {
        let points: [[f32; 3]; 0] = [];
        assert!(Aabb::from_points(&points).is_none());
    }

    #[test]
    fn test_single_point_is_degenerate() {
        let bbox = Aabb::from_points(&[[3.0, 3.0, 3.0]]).unwrap();
        assert_eq!(bbox.max_dimension(), 0.0);
        assert_eq!(bbox.center(), [3.0, 3.0, 3.0]);
    }
}
