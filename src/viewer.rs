//! Standalone visualization window backed by winit.
//!
//! ```no_run
//! # use glint::viewer::Viewer;
//! Viewer::builder()
//!     .with_scene("assets/models/scifi_corridor.glb")
//!     .with_texture("assets/baked.jpg")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::{
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    error::GlintError, options::Options, InputEvent, MouseButton,
    SceneRenderEngine,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    scene_path: Option<PathBuf>,
    texture_path: Option<PathBuf>,
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    /// Create a builder with sensible defaults (title "Glint", bundled
    /// scene, default options).
    fn new() -> Self {
        Self {
            scene_path: None,
            texture_path: None,
            options: None,
            title: "Glint".into(),
        }
    }

    /// Set the glTF scene file path (`.glb` or `.gltf`).
    #[must_use]
    pub fn with_scene(mut self, path: impl Into<PathBuf>) -> Self {
        self.scene_path = Some(path.into());
        self
    }

    /// Set the baked lightmap image path.
    #[must_use]
    pub fn with_texture(mut self, path: impl Into<PathBuf>) -> Self {
        self.texture_path = Some(path.into());
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            scene_path: self.scene_path,
            texture_path: self.texture_path,
            options: self.options,
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays a baked glTF scene.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    scene_path: Option<PathBuf>,
    texture_path: Option<PathBuf>,
    options: Option<Options>,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window
    /// is closed.
    ///
    /// # Errors
    ///
    /// [`GlintError::Viewer`] if the event loop cannot be created or
    /// exits with an error.
    pub fn run(self) -> Result<(), GlintError> {
        let event_loop = EventLoop::new()
            .map_err(|e| GlintError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            last_frame_time: Instant::now(),
            last_title_update: Instant::now(),
            scene_path: self.scene_path,
            texture_path: self.texture_path,
            options: self.options,
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| GlintError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<SceneRenderEngine>,
    last_frame_time: Instant,
    /// Last time the smoothed FPS was pushed into the window title.
    last_title_update: Instant,
    scene_path: Option<PathBuf>,
    texture_path: Option<PathBuf>,
    options: Option<Options>,
    title: String,
}

/// Compute the wgpu surface size — always the full window dimensions.
fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            #[allow(clippy::cast_possible_truncation)]
            let logical_w = (mon_size.width as f64 / scale * 0.75) as u32;
            #[allow(clippy::cast_possible_truncation)]
            let logical_h = (mon_size.height as f64 / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let inner = window.inner_size();
        let (vp_w, vp_h) = viewport_size(inner);

        let options = self.options.take().unwrap_or_default();
        let engine_result = match (&self.scene_path, &self.texture_path) {
            (Some(scene), Some(texture)) => {
                pollster::block_on(SceneRenderEngine::new_with_paths(
                    window.clone(),
                    (vp_w, vp_h),
                    scene,
                    texture,
                    options,
                ))
            }
            _ => pollster::block_on(SceneRenderEngine::new(
                window.clone(),
                (vp_w, vp_h),
            )),
        };

        let engine = match engine_result {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        // Guard: both window and engine must be initialised.
        if self.window.is_none() || self.engine.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(event_size) => {
                let (vp_w, vp_h) = viewport_size(event_size);
                if let Some(engine) = &mut self.engine {
                    engine.resize(vp_w, vp_h);
                }
            }

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt =
                    now.duration_since(self.last_frame_time).as_secs_f32();
                self.last_frame_time = now;

                if let Some(engine) = &mut self.engine {
                    engine.update(dt);
                    match engine.render() {
                        Ok(()) => {}
                        Err(
                            wgpu::SurfaceError::Outdated
                            | wgpu::SurfaceError::Lost,
                        ) => {
                            if let Some(w) = &self.window {
                                let inner = w.inner_size();
                                let (vp_w, vp_h) = viewport_size(inner);
                                engine.resize(vp_w, vp_h);
                            }
                        }
                        Err(e) => {
                            log::error!("render error: {e:?}");
                        }
                    }
                }
                if self.last_title_update.elapsed() >= Duration::from_secs(1)
                {
                    self.last_title_update = Instant::now();
                    if let (Some(w), Some(engine)) =
                        (&self.window, &self.engine)
                    {
                        w.set_title(&format!(
                            "{} | {:.0} fps",
                            self.title,
                            engine.frame_timing.fps()
                        ));
                    }
                }
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::MouseInput { button, state, .. } => {
                let pressed = state == ElementState::Pressed;
                if let Some(engine) = &mut self.engine {
                    engine.handle_input(InputEvent::MouseButton {
                        button: MouseButton::from(button),
                        pressed,
                    });
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(engine) = &mut self.engine {
                    #[allow(clippy::cast_possible_truncation)]
                    engine.handle_input(InputEvent::CursorMoved {
                        x: position.x as f32,
                        y: position.y as f32,
                    });
                }
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                #[allow(clippy::cast_possible_truncation)]
                let scroll_delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => {
                        pos.y as f32 * 0.01
                    }
                };
                if let Some(engine) = &mut self.engine {
                    engine.handle_input(InputEvent::Scroll {
                        delta: scroll_delta,
                    });
                }
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                if let Some(engine) = &mut self.engine {
                    engine.handle_input(InputEvent::ModifiersChanged {
                        shift: modifiers.state().shift_key(),
                    });
                }
            }

            _ => (),
        }
    }
}
