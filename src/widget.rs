use std::time::Instant;

use eframe::egui::{self, Color32, Pos2, Rect, Response, Sense, TextureOptions, Ui};

use crate::{eraser::ScratchState, image_utils, ScratchEraser};

impl ScratchEraser {
    /// Runs one frame of the scratch lifecycle over the available rect:
    /// measures the container, applies pointer and layout events and paints
    /// the mask texture. Once complete, nothing is painted and the region no
    /// longer senses drags, so whatever sits below shows through.
    pub fn ui(&mut self, ui: &mut Ui) -> Response {
        let rect = ui.available_rect_before_wrap();
        let sense = if self.is_complete() {
            Sense::hover()
        } else {
            Sense::drag()
        };
        let response = ui.allocate_rect(rect, sense);
        let now = Instant::now();
        let canvas = self.canvas;

        match &self.state {
            ScratchState::Unstarted => self.start(rect),
            ScratchState::Active(_) => {
                self.track_layout(rect, now);
                if let Some(remaining) = self.poll_layout(now) {
                    ui.ctx().request_repaint_after(remaining);
                }
            }
            ScratchState::Complete(_) => return response,
        }

        if response.drag_started() {
            self.pointer_down();
        }
        if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.pointer_move(pos);
            }
        }
        if response.drag_stopped() {
            self.pointer_up();
        }

        if let ScratchState::Active(active) = &mut self.state {
            let texture = active.texture.get_or_insert_with(|| {
                ui.ctx().load_texture(
                    format!("scratch-mask-{canvas:?}"),
                    image_utils::color_image(active.surface.image()),
                    TextureOptions {
                        magnification: egui::TextureFilter::Nearest,
                        ..Default::default()
                    },
                )
            });
            ui.painter().with_clip_rect(rect).image(
                texture.id(),
                rect,
                Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0)),
                Color32::WHITE,
            );
        }

        response
    }
}
