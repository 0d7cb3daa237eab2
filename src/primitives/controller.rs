use winit::event::*;

use crate::config::CameraConfig;
use crate::primitives::camera::{CameraRig, CameraTarget};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DragButton {
    /// Orbits the selected camera.
    Left,
    /// Zooms the selected camera.
    Right,
}

/// Mouse-drag state machine driving a [`CameraRig`].
///
/// Holding Alt while pressing a button selects the plane camera for the
/// whole drag, when plane control is enabled.
pub struct CameraController {
    rotate_speed: f32,
    zoom_speed: f32,
    plane_enabled: bool,
    left_down: bool,
    right_down: bool,
    alt_held: bool,
    target: CameraTarget,
    cursor: [f64; 2],
    anchor: [f64; 2],
}

impl CameraController {
    pub fn new(config: &CameraConfig, plane_enabled: bool) -> Self {
        Self {
            rotate_speed: config.rotate_speed,
            zoom_speed: config.zoom_speed,
            plane_enabled,
            left_down: false,
            right_down: false,
            alt_held: false,
            target: CameraTarget::Object,
            cursor: [0.0; 2],
            anchor: [0.0; 2],
        }
    }

    pub fn target(&self) -> CameraTarget {
        self.target
    }

    pub fn is_dragging(&self) -> bool {
        self.left_down || self.right_down
    }

    pub fn set_alt_held(&mut self, held: bool) {
        self.alt_held = held;
    }

    pub fn press(&mut self, button: DragButton) {
        self.anchor = self.cursor;
        match button {
            DragButton::Left => self.left_down = true,
            DragButton::Right => self.right_down = true,
        }
        self.target = if self.plane_enabled && self.alt_held {
            CameraTarget::Plane
        } else {
            CameraTarget::Object
        };
    }

    pub fn release(&mut self, button: DragButton) {
        match button {
            DragButton::Left => self.left_down = false,
            DragButton::Right => self.right_down = false,
        }
    }

    /// Applies the drag since the last recorded position. Returns whether a
    /// camera changed.
    pub fn cursor_moved(&mut self, x: f64, y: f64, rig: &mut CameraRig) -> bool {
        self.cursor = [x, y];
        if !self.is_dragging() {
            return false;
        }

        let dx = x - self.anchor[0];
        let dy = y - self.anchor[1];
        self.anchor = [x, y];

        let camera = rig.get_mut(self.target);
        if self.left_down {
            let speed = f64::from(self.rotate_speed);
            camera.rotate((dx * speed) as f32, (dy * speed) as f32);
        }
        if self.right_down {
            camera.zoom((dy * f64::from(self.zoom_speed)) as f32);
        }
        true
    }

    pub fn process_events(&mut self, event: &WindowEvent, rig: &mut CameraRig) -> bool {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                self.set_alt_held(modifiers.alt());
                false
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = match button {
                    MouseButton::Left => DragButton::Left,
                    MouseButton::Right => DragButton::Right,
                    _ => return false,
                };
                match state {
                    ElementState::Pressed => self.press(button),
                    ElementState::Released => self.release(button),
                }
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(position.x, position.y, rig);
                true
            }
            _ => false,
        }
    }
}
