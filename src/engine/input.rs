// Mapping from winit window events to viewer input events
// Keeps winit types out of the viewport logic so dispatch stays testable

use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::engine::light::LightStep;

/// Pixels of scroll represented by one wheel line tick.
const WHEEL_LINE_PX: f32 = 100.0;

/// Input the viewer reacts to, decoupled from the windowing backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp,
    /// Vertical scroll in pixels, positive scrolling away from the user.
    Wheel { delta_y: f32 },
    Key(LightStep),
}

/// Translate a window event into a viewer event, if it maps to one.
/// `cursor` is the last known pointer position, used for button presses
/// which carry no position of their own.
pub fn map_window_event(event: &WindowEvent, cursor: (f32, f32)) -> Option<InputEvent> {
    match event {
        WindowEvent::MouseInput {
            state,
            button: MouseButton::Left,
            ..
        } => Some(match state {
            ElementState::Pressed => InputEvent::PointerDown {
                x: cursor.0,
                y: cursor.1,
            },
            ElementState::Released => InputEvent::PointerUp,
        }),
        WindowEvent::CursorMoved { position, .. } => Some(InputEvent::PointerMove {
            x: position.x as f32,
            y: position.y as f32,
        }),
        WindowEvent::MouseWheel { delta, .. } => Some(InputEvent::Wheel {
            delta_y: wheel_delta_px(delta),
        }),
        WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
            light_step_for(&event.physical_key).map(InputEvent::Key)
        }
        _ => None,
    }
}

/// Normalize both wheel encodings to pixels with positive pointing away.
/// winit reports line and pixel deltas with up positive, so the sign flips.
fn wheel_delta_px(delta: &MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -y * WHEEL_LINE_PX,
        MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
    }
}

fn light_step_for(key: &PhysicalKey) -> Option<LightStep> {
    let PhysicalKey::Code(code) = key else {
        return None;
    };
    match code {
        KeyCode::ArrowDown => Some(LightStep::LowerPolar),
        KeyCode::ArrowUp => Some(LightStep::RaisePolar),
        KeyCode::ArrowRight => Some(LightStep::SpinRight),
        KeyCode::ArrowLeft => Some(LightStep::SpinLeft),
        KeyCode::Equal | KeyCode::NumpadAdd => Some(LightStep::Brighten),
        KeyCode::Minus | KeyCode::NumpadSubtract => Some(LightStep::Dim),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn arrow_and_sign_keys_map_to_light_steps() {
        let cases = [
            (KeyCode::ArrowDown, LightStep::LowerPolar),
            (KeyCode::ArrowUp, LightStep::RaisePolar),
            (KeyCode::ArrowRight, LightStep::SpinRight),
            (KeyCode::ArrowLeft, LightStep::SpinLeft),
            (KeyCode::Equal, LightStep::Brighten),
            (KeyCode::NumpadAdd, LightStep::Brighten),
            (KeyCode::Minus, LightStep::Dim),
            (KeyCode::NumpadSubtract, LightStep::Dim),
        ];
        for (code, step) in cases {
            assert_eq!(light_step_for(&PhysicalKey::Code(code)), Some(step));
        }
        assert_eq!(light_step_for(&PhysicalKey::Code(KeyCode::KeyW)), None);
    }

    #[test]
    fn line_scroll_up_becomes_negative_pixels() {
        let delta = wheel_delta_px(&MouseScrollDelta::LineDelta(0.0, 1.0));
        assert_eq!(delta, -100.0);
        let delta = wheel_delta_px(&MouseScrollDelta::LineDelta(0.0, -3.0));
        assert_eq!(delta, 300.0);
    }

    #[test]
    fn pixel_scroll_flips_sign() {
        let delta = wheel_delta_px(&MouseScrollDelta::PixelDelta(PhysicalPosition::new(
            0.0, -30.0,
        )));
        assert_eq!(delta, 30.0);
    }
}
