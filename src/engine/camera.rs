// Orbit camera for the lathe viewport.
//
// Camera model:
//   - A look-at center on the rotation axis (the framed object's center)
//   - Drag deltas nudge the spherical angles of the offset from center
//   - Wheel deltas slide the radius inside an object-relative range
//   - Framing resets position and center to fit a freshly built mesh

use glam::{Mat4, Vec3};

use super::bounds::Aabb;

/// Radians of orbit per pixel of drag.
const ROTATE_SPEED: f32 = 0.01;
/// Wheel-to-distance factor, scaled by the object's max dimension.
const ZOOM_SPEED: f32 = 0.001;
/// Polar clamp keeping the orbit off the poles.
const POLAR_MARGIN: f32 = 0.1;
/// Zoom range as multiples of the object's max dimension.
const ZOOM_RANGE: (f32, f32) = (0.5, 5.0);

/// Spherical offset: radius, polar angle from +Y, azimuth around Y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub phi: f32,
    pub theta: f32,
}

impl Spherical {
    pub fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self { radius: 0.0, phi: 0.0, theta: 0.0 };
        }
        Self {
            radius,
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            theta: offset.x.atan2(offset.z),
        }
    }

    pub fn to_offset(self) -> Vec3 {
        let radial = self.radius * self.phi.sin();
        Vec3::new(
            radial * self.theta.sin(),
            self.radius * self.phi.cos(),
            radial * self.theta.cos(),
        )
    }
}

pub struct OrbitCamera {
    pub position: Vec3,
    /// Look-at target. Reset to the framing center on every rebuild.
    pub center: Vec3,

    /// Vertical field of view in radians.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 10.0),
            center: Vec3::ZERO,
            fov: 75.0_f32.to_radians(),
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Place the camera to fit `bounds` in view: back off along +Z far
    /// enough for the largest dimension, with a 1.5x margin.
    pub fn frame(&mut self, bounds: &Aabb) {
        let center = bounds.framing_center();
        let distance = bounds.max_dim() / (2.0 * (self.fov / 2.0).tan());
        self.center = center;
        self.position = Vec3::new(center.x, center.y, distance * 1.5);
    }

    /// Apply a drag delta: 0.01 rad per pixel on both angles, polar clamped
    /// to [0.1, pi - 0.1]. The radius is preserved.
    pub fn orbit(&mut self, delta_x: f32, delta_y: f32) {
        let mut spherical = Spherical::from_offset(self.position - self.center);
        spherical.theta -= delta_x * ROTATE_SPEED;
        spherical.phi -= delta_y * ROTATE_SPEED;
        spherical.phi = spherical
            .phi
            .clamp(POLAR_MARGIN, std::f32::consts::PI - POLAR_MARGIN);
        self.position = self.center + spherical.to_offset();
    }

    /// Apply a wheel delta: slide the radius, clamped to [0.5, 5] times the
    /// object's max dimension. Positive deltas move away from the object.
    pub fn zoom(&mut self, wheel_delta_y: f32, bounds: &Aabb) {
        let max_dim = bounds.max_dim();
        let offset = self.position - self.center;
        let distance = offset.length();
        if distance == 0.0 || max_dim == 0.0 {
            return;
        }
        let next = (distance + wheel_delta_y * ZOOM_SPEED * max_dim)
            .clamp(ZOOM_RANGE.0 * max_dim, ZOOM_RANGE.1 * max_dim);
        self.position = self.center + offset * (next / distance);
    }

    pub fn distance(&self) -> f32 {
        (self.position - self.center).length()
    }

    /// View matrix: looks from the camera eye toward the center.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.center, Vec3::Y)
    }

    /// Perspective projection matrix.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov, aspect, self.near, self.far)
    }

    /// Combined view-projection matrix ready to upload to the GPU.
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::PI;

    fn cylinder_bounds() -> Aabb {
        Aabb {
            min: Vec3::new(-5.0, -10.0, -5.0),
            max: Vec3::new(5.0, 0.0, 5.0),
        }
    }

    fn assert_vec3_eq(a: Vec3, b: Vec3, epsilon: f32) {
        assert_relative_eq!(a.x, b.x, epsilon = epsilon);
        assert_relative_eq!(a.y, b.y, epsilon = epsilon);
        assert_relative_eq!(a.z, b.z, epsilon = epsilon);
    }

    #[test]
    fn spherical_round_trips() {
        for offset in [
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(3.0, 4.0, 5.0),
            Vec3::new(-7.0, 2.0, -1.0),
        ] {
            let back = Spherical::from_offset(offset).to_offset();
            assert_vec3_eq(back, offset, 1e-4);
        }
    }

    #[test]
    fn framing_backs_off_along_z_with_margin() {
        let mut camera = OrbitCamera::new();
        camera.frame(&cylinder_bounds());
        // max_dim 10, fov 75 deg: 10 / (2 tan 37.5 deg) * 1.5
        assert_vec3_eq(camera.position, Vec3::new(0.0, -5.0, 9.7742), 1e-3);
        assert_eq!(camera.center, Vec3::new(0.0, -5.0, 0.0));
    }

    #[test]
    fn drag_rotates_azimuth_and_keeps_distance() {
        let mut camera = OrbitCamera::new();
        camera.position = Vec3::new(0.0, 0.0, 10.0);
        camera.center = Vec3::ZERO;
        camera.orbit(100.0, 0.0);
        let expected = Spherical { radius: 10.0, phi: PI / 2.0, theta: -1.0 }.to_offset();
        assert_vec3_eq(camera.position, expected, 1e-4);
        assert_relative_eq!(camera.distance(), 10.0, epsilon = 1e-4);
    }

    #[test]
    fn polar_angle_stays_off_the_poles() {
        let mut camera = OrbitCamera::new();
        camera.position = Vec3::new(0.0, 0.0, 10.0);
        camera.center = Vec3::ZERO;
        for _ in 0..50 {
            camera.orbit(0.0, 37.0);
        }
        let spherical = Spherical::from_offset(camera.position - camera.center);
        assert_relative_eq!(spherical.phi, POLAR_MARGIN, epsilon = 1e-4);
        for _ in 0..100 {
            camera.orbit(0.0, -37.0);
        }
        let spherical = Spherical::from_offset(camera.position - camera.center);
        assert_relative_eq!(spherical.phi, PI - POLAR_MARGIN, epsilon = 1e-4);
    }

    #[test]
    fn wheel_slides_the_radius_by_object_scale() {
        let mut camera = OrbitCamera::new();
        camera.position = Vec3::new(0.0, -5.0, 20.0);
        camera.center = Vec3::new(0.0, -5.0, 0.0);
        camera.zoom(-1000.0, &cylinder_bounds());
        assert_relative_eq!(camera.distance(), 10.0, epsilon = 1e-4);
    }

    #[test]
    fn zoom_clamps_to_the_object_relative_range() {
        let bounds = cylinder_bounds();
        let mut camera = OrbitCamera::new();
        camera.center = Vec3::new(0.0, -5.0, 0.0);

        camera.position = Vec3::new(0.0, -5.0, 8.0);
        camera.zoom(-1000.0, &bounds);
        assert_relative_eq!(camera.distance(), 5.0, epsilon = 1e-4);

        camera.position = Vec3::new(0.0, -5.0, 8.0);
        camera.zoom(100_000.0, &bounds);
        assert_relative_eq!(camera.distance(), 50.0, epsilon = 1e-4);
    }

    #[test]
    fn zoom_keeps_the_viewing_direction() {
        let mut camera = OrbitCamera::new();
        camera.center = Vec3::new(0.0, -5.0, 0.0);
        camera.position = camera.center + Vec3::new(6.0, 8.0, 0.0);
        camera.zoom(-1000.0, &cylinder_bounds());
        let dir = (camera.position - camera.center).normalize();
        assert_vec3_eq(dir, Vec3::new(0.6, 0.8, 0.0), 1e-4);
    }
}
