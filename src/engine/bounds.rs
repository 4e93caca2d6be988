// Axis-aligned bounds and the framing center policy.

use glam::Vec3;

/// Axis-aligned bounding box. Derived from the live mesh on demand, never
/// cached across rebuilds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Grow a box over a point set. None for an empty set.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bb = Aabb { min: first, max: first };
        for p in iter {
            bb.min = bb.min.min(p);
            bb.max = bb.max.max(p);
        }
        Some(bb)
    }

    pub fn size(&self) -> Vec3 { self.max - self.min }

    pub fn max_dim(&self) -> f32 { self.size().max_element() }

    /// True geometric center.
    pub fn center(&self) -> Vec3 { (self.min + self.max) * 0.5 }

    /// Center for framing and lighting: x and z snap to the rotation axis,
    /// which the revolved mesh is symmetric about.
    pub fn framing_center(&self) -> Vec3 {
        Vec3::new(0.0, self.center().y, 0.0)
    }
}
