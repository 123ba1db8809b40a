//! Input dispatch for [`SceneRenderEngine`].

use glam::Vec2;

use super::SceneRenderEngine;
use crate::input::{InputEvent, MouseButton};

impl SceneRenderEngine {
    /// Process a platform-agnostic input event.
    ///
    /// This is the primary input entry point. The viewer shell forwards
    /// raw window events as [`InputEvent`] variants; the engine
    /// dispatches to pointer tracking for picking and to camera
    /// rotate/pan/zoom. The hover pick itself is resolved once per
    /// frame in [`update`](Self::update), not here.
    ///
    /// # Example
    ///
    /// ```ignore
    /// engine.handle_input(InputEvent::CursorMoved { x, y });
    /// engine.handle_input(InputEvent::Scroll { delta: 1.0 });
    /// ```
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.dispatch_cursor_moved(x, y);
            }
            InputEvent::MouseButton { button, pressed } => {
                if button == MouseButton::Left {
                    self.mouse_pressed = pressed;
                }
            }
            InputEvent::Scroll { delta } => {
                self.camera_controller.zoom(delta);
            }
            InputEvent::ModifiersChanged { shift } => {
                self.shift_pressed = shift;
            }
        }
    }

    /// Cursor moved — update the pick pointer, then rotate or pan if
    /// the left button is held.
    fn dispatch_cursor_moved(&mut self, x: f32, y: f32) {
        let (delta_x, delta_y) = self
            .last_cursor_pos
            .map_or((0.0, 0.0), |(lx, ly)| (x - lx, y - ly));
        self.last_cursor_pos = Some((x, y));

        self.pointer.set_pixel(x, y);

        if self.mouse_pressed {
            let delta = Vec2::new(delta_x, delta_y);
            if self.shift_pressed {
                self.camera_controller.pan(delta);
            } else {
                self.camera_controller.rotate(delta);
            }
        }
    }
}
