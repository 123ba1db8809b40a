//! Engine facade tying the scene, camera, picking, and render passes
//! together.
//!
//! [`SceneRenderEngine`] owns the GPU context and all per-frame state.
//! Consumers drive it with three calls: [`handle_input`] for window
//! events, [`update`] once per frame with the elapsed seconds, and
//! [`render`] to draw.
//!
//! [`handle_input`]: SceneRenderEngine::handle_input
//! [`update`]: SceneRenderEngine::update
//! [`render`]: SceneRenderEngine::render

mod input;

use std::path::Path;

use crate::camera::{CameraUniform, OrbitController};
use crate::error::GlintError;
use crate::input::PointerState;
use crate::options::Options;
use crate::picking::{self, HighlightOverlay, HoverChange, HoverState};
use crate::renderer::{BakedTexture, MeshPass, OverlayPass, RenderContext};
use crate::scene::{load_gltf, Scene, SurfaceId};
use crate::util::FrameTiming;

/// Target FPS limit
const TARGET_FPS: u32 = 300;

/// Scene loaded when no path is given.
const DEFAULT_SCENE_PATH: &str = "assets/models/scifi_corridor.glb";

/// Baked lightmap paired with [`DEFAULT_SCENE_PATH`].
const DEFAULT_TEXTURE_PATH: &str = "assets/baked.jpg";

/// Renders a baked glTF scene with orbit controls and hover
/// highlighting.
///
/// Each [`update`](Self::update) integrates the orbit camera and
/// re-resolves which surface sits under the pointer; each
/// [`render`](Self::render) draws the scene plus the wireframe overlay
/// for the hovered surface.
pub struct SceneRenderEngine {
    /// GPU device, queue, surface, and configuration.
    pub context: RenderContext,
    /// Orbit camera state.
    pub camera_controller: OrbitController,
    /// Frame pacing and smoothed FPS.
    pub frame_timing: FrameTiming,
    /// Display, camera, and highlight options.
    pub options: Options,
    /// Authoritative scene, in glTF traversal order.
    pub scene: Scene,

    pointer: PointerState,
    hover: HoverState,
    overlay: HighlightOverlay,
    mesh_pass: MeshPass,
    overlay_pass: OverlayPass,

    /// Left button held.
    mouse_pressed: bool,
    /// Shift modifier held (switches drag from rotate to pan).
    shift_pressed: bool,
    /// Previous cursor position for drag deltas.
    last_cursor_pos: Option<(f32, f32)>,
}

impl SceneRenderEngine {
    /// Create an engine showing the bundled corridor scene.
    ///
    /// # Errors
    ///
    /// See [`new_with_paths`](Self::new_with_paths).
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
    ) -> Result<Self, GlintError> {
        Self::new_with_paths(
            window,
            size,
            Path::new(DEFAULT_SCENE_PATH),
            Path::new(DEFAULT_TEXTURE_PATH),
            Options::default(),
        )
        .await
    }

    /// Create an engine for the given glTF scene and baked lightmap.
    ///
    /// # Errors
    ///
    /// [`GlintError::Gpu`] if GPU initialization fails,
    /// [`GlintError::SceneLoad`] or [`GlintError::SceneValidation`] if
    /// the scene file is unloadable or ill-formed, and
    /// [`GlintError::Texture`] if the lightmap cannot be decoded.
    pub async fn new_with_paths(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        scene_path: &Path,
        texture_path: &Path,
        options: Options,
    ) -> Result<Self, GlintError> {
        let context = RenderContext::new(window, size).await?;

        let scene = load_gltf(scene_path, &options.display)?;
        let texture = BakedTexture::load(&context, texture_path)?;

        let mesh_pass =
            MeshPass::new(&context, &scene, &texture, &options.display);
        let overlay_pass = OverlayPass::new(
            &context,
            mesh_pass.camera_bind_group_layout(),
            &options.highlight,
        );

        let aspect = size.0 as f32 / size.1.max(1) as f32;
        let camera_controller =
            OrbitController::new(aspect, &options.camera);
        let pointer = PointerState::new(size.0, size.1);

        Ok(Self {
            context,
            camera_controller,
            frame_timing: FrameTiming::new(TARGET_FPS),
            options,
            scene,
            pointer,
            hover: HoverState::new(),
            overlay: HighlightOverlay::new(),
            mesh_pass,
            overlay_pass,
            mouse_pressed: false,
            shift_pressed: false,
            last_cursor_pos: None,
        })
    }

    /// Advance per-frame state: integrate the orbit camera, then
    /// re-resolve the hover pick at the current pointer position.
    ///
    /// The pick runs every frame rather than only on pointer motion, so
    /// orbiting alone can change what sits under a stationary cursor.
    pub fn update(&mut self, dt: f32) {
        self.camera_controller.update(dt);
        self.refresh_hover();
    }

    /// Cast from the pointer through the scene and apply the nearest
    /// hit to the hover state and overlay.
    fn refresh_hover(&mut self) {
        let ray =
            self.camera_controller.camera.pick_ray(self.pointer.ndc());
        let hits = picking::cast(&self.scene, &ray);
        match self.hover.update(&hits, &mut self.overlay) {
            Some(HoverChange::Entered(id)) => {
                log::debug!("hover: {}", self.scene.surface(id).name());
            }
            Some(HoverChange::Cleared) => log::debug!("hover cleared"),
            None => {}
        }
    }

    /// Render one frame: the baked and emissive surfaces, then the
    /// hover overlay on top.
    ///
    /// Returns without drawing when the FPS limiter has not elapsed.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] when the swapchain texture cannot
    /// be acquired. `Lost` and `Outdated` are recoverable by calling
    /// [`resize`](Self::resize) with the current window size.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        if !self.frame_timing.should_render() {
            return Ok(());
        }

        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&self.camera_controller.camera);
        self.mesh_pass.write_camera(&self.context.queue, &uniform);

        // Rebuild the overlay line buffer only when the hover target
        // actually changed.
        self.overlay_pass.sync(&self.context, &self.scene, &self.overlay);

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.context.create_encoder();

        {
            let [r, g, b] = self.options.display.background;
            let mut render_pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("scene pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color {
                                    r: f64::from(r),
                                    g: f64::from(g),
                                    b: f64::from(b),
                                    a: 1.0,
                                }),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: self.mesh_pass.depth_view(),
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    ..Default::default()
                });

            self.mesh_pass.draw(&mut render_pass);
            self.overlay_pass.draw(
                &mut render_pass,
                self.mesh_pass.camera_bind_group(),
                &self.overlay,
            );
        }

        self.context.submit(encoder);
        frame.present();

        let _ = self.frame_timing.tick();
        Ok(())
    }

    /// Handle a window resize: reconfigure the surface, update the
    /// camera aspect, remap the pointer, and rebuild the depth buffer.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.context.resize(width, height);
            self.camera_controller.resize(width, height);
            self.pointer.resize(width, height);
            self.mesh_pass.resize(&self.context);
        }
    }

    /// Currently hovered surface, if any.
    #[must_use]
    pub fn hovered_surface(&self) -> Option<SurfaceId> {
        self.hover.hovered()
    }

    /// Whether the hover overlay is currently visible.
    #[must_use]
    pub fn highlight_visible(&self) -> bool {
        self.overlay.visible()
    }
}
