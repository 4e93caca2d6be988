// Viewer state: the mesh slot plus camera, light and interaction flags.
//
// All input funnels through one dispatcher so the drag/zoom/light rules live
// in a single match. The mesh slot owns the current geometry; replacing it
// hands the previous mesh back to the caller, which keeps GPU-side disposal
// explicit at the call site.

use glam::Vec2;
use thiserror::Error;

use super::bounds::Aabb;
use super::camera::OrbitCamera;
use super::input::InputEvent;
use super::lathe::{revolve, MeshError, DEFAULT_SEGMENTS};
use super::light::LightRig;
use super::mesh::LatheMesh;
use super::profile::{parse_profile, ProfileError};
use super::texture::repeat_factors;

#[derive(Debug, Error)]
pub enum RebuildError {
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

pub struct ViewportState {
    mesh: Option<LatheMesh>,
    pub camera: OrbitCamera,
    pub light: LightRig,
    /// UV repeat of the installed texture, identity until one is fitted.
    pub texture_repeat: Vec2,
    dragging: bool,
    last_pointer: Vec2,
}

impl ViewportState {
    pub fn new() -> Self {
        Self {
            mesh: None,
            camera: OrbitCamera::new(),
            light: LightRig::new(),
            texture_repeat: Vec2::ONE,
            dragging: false,
            last_pointer: Vec2::ZERO,
        }
    }

    pub fn mesh(&self) -> Option<&LatheMesh> {
        self.mesh.as_ref()
    }

    /// Bounds of the current mesh, recomputed from its vertices.
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.mesh.as_ref()?.positions())
    }

    /// Single entry point for viewer input. Camera and light only respond
    /// while a mesh is loaded; pointer bookkeeping always runs so a drag
    /// started earlier stays consistent.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { x, y } => {
                self.dragging = true;
                self.last_pointer = Vec2::new(x, y);
            }
            InputEvent::PointerMove { x, y } => {
                if !self.dragging {
                    return;
                }
                let pointer = Vec2::new(x, y);
                let delta = pointer - self.last_pointer;
                self.last_pointer = pointer;
                if self.mesh.is_some() {
                    self.camera.orbit(delta.x, delta.y);
                }
            }
            InputEvent::PointerUp => {
                self.dragging = false;
            }
            InputEvent::Wheel { delta_y } => {
                if let Some(bounds) = self.bounds() {
                    self.camera.zoom(delta_y, &bounds);
                }
            }
            InputEvent::Key(step) => {
                if self.mesh.is_some() {
                    self.light.apply(step);
                }
            }
        }
    }

    /// Parse `text` and revolve it into the mesh slot. On success the camera
    /// reframes and the previous mesh is returned for disposal. On failure
    /// the slot and camera are untouched, so the old shape stays on screen.
    pub fn rebuild_profile(&mut self, text: &str) -> Result<Option<LatheMesh>, RebuildError> {
        let outline = parse_profile(text)?;
        let mesh = revolve(&outline, DEFAULT_SEGMENTS)?;
        log::info!(
            "rebuilt mesh: {} outline points, {} vertices, {} triangles",
            outline.len(),
            mesh.vertex_count(),
            mesh.index_count() / 3
        );
        Ok(self.install_mesh(mesh))
    }

    /// Put `mesh` in the slot, reframe the camera on it, and hand back the
    /// previous occupant.
    pub fn install_mesh(&mut self, mesh: LatheMesh) -> Option<LatheMesh> {
        if let Some(bounds) = Aabb::from_points(mesh.positions()) {
            self.camera.frame(&bounds);
        }
        self.mesh.replace(mesh)
    }

    /// Fit a `width` x `height` texel image onto the current mesh.
    pub fn fit_texture(&mut self, width: u32, height: u32) {
        self.texture_repeat = match self.bounds() {
            Some(bounds) => repeat_factors(bounds.size(), width, height),
            None => Vec2::ONE,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::camera::Spherical;
    use crate::engine::light::LightStep;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    const CYLINDER: &str = "0 0\n5 0\n5 10\n0 10";
    const GOBLET: &str = "1 0\n5 2\n5 8\n1 10";

    fn loaded() -> ViewportState {
        let mut state = ViewportState::new();
        state.rebuild_profile(CYLINDER).unwrap();
        state
    }

    #[test]
    fn rebuild_frames_the_camera_on_the_shape() {
        let state = loaded();
        let bounds = state.bounds().unwrap();
        assert_relative_eq!(bounds.max_dim(), 10.0, epsilon = 1e-4);
        assert_relative_eq!(state.camera.center.y, -5.0, epsilon = 1e-4);
        assert_relative_eq!(state.camera.distance(), 9.77421, epsilon = 1e-3);
    }

    #[test]
    fn moves_without_a_press_leave_the_camera_alone() {
        let mut state = loaded();
        let before = state.camera.position;
        state.handle_input(InputEvent::PointerMove { x: 300.0, y: 40.0 });
        assert_eq!(state.camera.position, before);
    }

    #[test]
    fn drag_orbits_the_camera_by_pixel_delta() {
        let mut state = loaded();
        let radius = state.camera.distance();
        state.handle_input(InputEvent::PointerDown { x: 0.0, y: 0.0 });
        state.handle_input(InputEvent::PointerMove { x: 100.0, y: 0.0 });

        let expected = state.camera.center
            + Spherical {
                radius,
                phi: FRAC_PI_2,
                theta: -1.0,
            }
            .to_offset();
        assert_relative_eq!(state.camera.position.x, expected.x, epsilon = 1e-3);
        assert_relative_eq!(state.camera.position.y, expected.y, epsilon = 1e-3);
        assert_relative_eq!(state.camera.position.z, expected.z, epsilon = 1e-3);
        assert_relative_eq!(state.camera.distance(), radius, epsilon = 1e-3);
    }

    #[test]
    fn release_ends_the_drag() {
        let mut state = loaded();
        state.handle_input(InputEvent::PointerDown { x: 0.0, y: 0.0 });
        state.handle_input(InputEvent::PointerMove { x: 10.0, y: 0.0 });
        state.handle_input(InputEvent::PointerUp);
        let before = state.camera.position;
        state.handle_input(InputEvent::PointerMove { x: 500.0, y: 500.0 });
        assert_eq!(state.camera.position, before);
    }

    #[test]
    fn wheel_zooms_scaled_by_the_object_and_clamps() {
        let mut state = loaded();
        state.handle_input(InputEvent::Wheel { delta_y: -1000.0 });
        assert_relative_eq!(state.camera.distance(), 5.0, epsilon = 1e-4);
    }

    #[test]
    fn wheel_before_any_mesh_is_ignored() {
        let mut state = ViewportState::new();
        let before = state.camera.position;
        state.handle_input(InputEvent::Wheel { delta_y: -1000.0 });
        assert_eq!(state.camera.position, before);
    }

    #[test]
    fn light_keys_before_any_mesh_are_ignored() {
        let mut state = ViewportState::new();
        state.handle_input(InputEvent::Key(LightStep::Dim));
        assert_eq!(state.light.intensity, 1.0);
    }

    #[test]
    fn twenty_dim_presses_reach_exactly_zero() {
        let mut state = loaded();
        for _ in 0..20 {
            state.handle_input(InputEvent::Key(LightStep::Dim));
        }
        assert_eq!(state.light.intensity, 0.0);
    }

    #[test]
    fn failed_rebuild_keeps_the_previous_scene() {
        let mut state = loaded();
        let vertices = state.mesh().unwrap().vertex_count();
        let position = state.camera.position;

        let result = state.rebuild_profile("banana");
        assert!(matches!(result, Err(RebuildError::Profile(_))));
        assert_eq!(state.mesh().unwrap().vertex_count(), vertices);
        assert_eq!(state.camera.position, position);
    }

    #[test]
    fn replacing_hands_back_the_previous_mesh() {
        let mut state = ViewportState::new();
        let first = state.rebuild_profile(CYLINDER).unwrap();
        assert!(first.is_none());

        let vertices = state.mesh().unwrap().vertex_count();
        let released = state.rebuild_profile(GOBLET).unwrap().unwrap();
        assert_eq!(released.vertex_count(), vertices);
    }

    #[test]
    fn textures_fit_against_the_mesh_bounds() {
        let mut state = loaded();
        state.fit_texture(512, 512);
        assert_eq!(state.texture_repeat, Vec2::ONE);
        state.fit_texture(2, 5);
        assert_eq!(state.texture_repeat, Vec2::new(5.0, 2.0));
    }

    #[test]
    fn texture_fit_without_a_mesh_is_identity() {
        let mut state = ViewportState::new();
        state.fit_texture(8, 8);
        assert_eq!(state.texture_repeat, Vec2::ONE);
    }

    #[test]
    fn bounds_match_the_revolved_extents() {
        let state = loaded();
        let bounds = state.bounds().unwrap();
        assert_relative_eq!(bounds.min.x, -5.0, epsilon = 1e-4);
        assert_relative_eq!(bounds.max.x, 5.0, epsilon = 1e-4);
        assert_relative_eq!(bounds.min.y, -10.0, epsilon = 1e-4);
        assert_relative_eq!(bounds.max.y, 0.0, epsilon = 1e-4);
        assert_relative_eq!(bounds.min.z, -5.0, epsilon = 1e-4);
        assert_relative_eq!(bounds.max.z, 5.0, epsilon = 1e-4);
    }
}
