use egui::epaint::Shadow;

use crate::engine::ViewportState;

/// Left-hand control panel: profile editor, status line and scene readouts.
///
/// Holds the egui plumbing plus the editable profile text. The shell polls
/// `take_dirty()` once per frame and rebuilds the mesh from `profile_text`
/// when the user typed.
pub struct ControlPanel {
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,

    pub profile_text: String,
    /// Last rebuild failure, shown under the editor until the next success.
    pub status: Option<String>,
    pub texture_name: Option<String>,
    profile_dirty: bool,
}

impl ControlPanel {
    pub fn new(
        window: &winit::window::Window,
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let egui_ctx = egui::Context::default();

        // Style: dark, semi-transparent, small monospace white font
        let mut visuals = egui::Visuals::dark();
        visuals.window_fill = egui::Color32::from_rgba_premultiplied(0, 0, 0, 180);
        visuals.window_stroke = egui::Stroke::NONE;
        visuals.window_shadow = Shadow::NONE;
        visuals.override_text_color = Some(egui::Color32::WHITE);
        egui_ctx.set_visuals(visuals);

        let mut style = (*egui_ctx.style()).clone();
        style.override_font_id = Some(egui::FontId::monospace(13.0));
        egui_ctx.set_style(style);

        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let egui_renderer = egui_wgpu::Renderer::new(
            device,
            surface_format,
            None,  // no depth
            1,     // msaa samples
            false, // no dithering
        );

        Self {
            egui_ctx,
            egui_state,
            egui_renderer,
            profile_text: String::new(),
            status: None,
            texture_name: None,
            profile_dirty: false,
        }
    }

    pub fn handle_window_event(
        &mut self,
        window: &winit::window::Window,
        event: &winit::event::WindowEvent,
    ) -> egui_winit::EventResponse {
        self.egui_state.on_window_event(window, event)
    }

    /// True once after each user edit of the profile text.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.profile_dirty)
    }

    /// Render one egui frame: the side panel with the profile editor,
    /// rebuild status, light/camera readouts and the control hints.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        window: &winit::window::Window,
        view: &wgpu::TextureView,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
        viewport: &ViewportState,
    ) {
        let raw_input = self.egui_state.take_egui_input(window);

        // Cloned handle so the run closure can borrow panel fields mutably.
        let egui_ctx = self.egui_ctx.clone();
        let full_output = egui_ctx.run(raw_input, |ctx| {
            egui::SidePanel::left("controls")
                .exact_width(260.0)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.add_space(6.0);
                    ui.heading("Profile");
                    ui.label("One point per line: x y");
                    ui.label("Curves: x1 y1 x2 y2 x y");

                    let editor = egui::TextEdit::multiline(&mut self.profile_text)
                        .desired_rows(14)
                        .desired_width(f32::INFINITY);
                    if ui.add(editor).changed() {
                        self.profile_dirty = true;
                    }

                    if let Some(status) = &self.status {
                        ui.colored_label(egui::Color32::from_rgb(255, 120, 100), status);
                    }

                    ui.separator();
                    ui.label(format!("Light intensity: {:.1}", viewport.light.intensity));
                    ui.label(format!("Camera distance: {:.1}", viewport.camera.distance()));
                    match viewport.mesh() {
                        Some(mesh) => {
                            ui.label(format!("Triangles: {}", mesh.index_count() / 3));
                        }
                        None => {
                            ui.label("No shape yet");
                        }
                    }

                    ui.separator();
                    match &self.texture_name {
                        Some(name) => {
                            ui.label(format!("Texture: {name}"));
                        }
                        None => {
                            ui.label("Drop an image file to texture the shape");
                        }
                    }

                    ui.separator();
                    ui.label("Drag to orbit, wheel to zoom");
                    ui.label("Arrow keys move the light");
                    ui.label("+ / - change its intensity");
                });
        });

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let tris = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer
            .update_buffers(device, queue, encoder, &tris, screen_descriptor);

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            self.egui_renderer
                .render(&mut render_pass.forget_lifetime(), &tris, screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}
