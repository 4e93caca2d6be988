// Key-driven directional light rig.
//
// The light sits on a sphere around the object center: fixed distance,
// steerable polar/azimuth angles, adjustable intensity. World position is
// derived on demand so it always tracks the current center and is never
// stored.

use glam::Vec3;

/// Change applied per key press, shared by both angles and the intensity.
const STEP: f32 = 0.1;
/// Polar clamp keeping the light off the poles.
const POLAR_MARGIN: f32 = 0.1;
const INTENSITY_MAX: f32 = 5.0;

/// Discrete light adjustments driven by single key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightStep {
    /// Polar angle a step smaller (light climbs toward the zenith).
    LowerPolar,
    /// Polar angle a step larger (light sinks toward the horizon).
    RaisePolar,
    /// Azimuth a negative step.
    SpinRight,
    /// Azimuth a positive step.
    SpinLeft,
    /// Intensity a step up.
    Brighten,
    /// Intensity a step down.
    Dim,
}

pub struct LightRig {
    /// Radius of the light's sphere around the center. Fixed.
    pub distance: f32,
    /// Polar angle from +Y, clamped to [0.1, pi - 0.1].
    pub phi: f32,
    /// Azimuth around Y, unclamped.
    pub theta: f32,
    /// Clamped to [0, 5].
    pub intensity: f32,
}

impl LightRig {
    pub fn new() -> Self {
        Self {
            distance: 10.0,
            phi: std::f32::consts::FRAC_PI_4,
            theta: std::f32::consts::FRAC_PI_4,
            intensity: 1.0,
        }
    }

    /// Apply one discrete step to the rig's scalars.
    pub fn apply(&mut self, step: LightStep) {
        use std::f32::consts::PI;
        match step {
            LightStep::LowerPolar => self.phi = (self.phi - STEP).max(POLAR_MARGIN),
            LightStep::RaisePolar => self.phi = (self.phi + STEP).min(PI - POLAR_MARGIN),
            LightStep::SpinRight => self.theta -= STEP,
            LightStep::SpinLeft => self.theta += STEP,
            LightStep::Brighten => self.intensity = (self.intensity + STEP).min(INTENSITY_MAX),
            LightStep::Dim => self.intensity = (self.intensity - STEP).max(0.0),
        }
    }

    /// World position on the sphere around `center`.
    pub fn position(&self, center: Vec3) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        center + self.distance * Vec3::new(sin_phi * cos_theta, cos_phi, sin_phi * sin_theta)
    }

    /// Unit direction from `center` toward the light.
    pub fn direction(&self, center: Vec3) -> Vec3 {
        (self.position(center) - center).normalize_or_zero()
    }
}
