use std::{cell::Cell, io, path::PathBuf, rc::Rc};

use eframe::egui::{self, Color32, Pos2, Rect, TextureHandle, TextureOptions, Ui};
use futures::FutureExt;
use image::DynamicImage;
use log::info;

use crate::{async_task::AsyncTask, config::Config, image_utils, ScratchEraser, ScratchOptions};

mod native;

pub use native::run_native;

pub(crate) struct ScratchApp {
    eraser: ScratchEraser,
    prize: PrizeState,
    prize_path: Option<PathBuf>,
    revealed: Rc<Cell<bool>>,
}

enum PrizeState {
    NotLoaded,
    Loading(AsyncTask<io::Result<DynamicImage>>),
    Loaded(TextureHandle),
    Error(String),
}

impl ScratchApp {
    pub fn new(config: &Config) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let revealed = Rc::new(Cell::new(false));
        let on_reveal = revealed.clone();
        let eraser = ScratchEraser::new(
            ScratchOptions::new("scratch-card")
                .color(config.mask_color()?)
                .size(config.brush_size)
                .ratio(config.ratio)
                .on_complete(move |surface| {
                    info!("prize revealed ({}x{})", surface.width(), surface.height());
                    on_reveal.set(true);
                }),
        )?;
        Ok(Self {
            eraser,
            prize: PrizeState::NotLoaded,
            prize_path: config.prize_image.clone(),
            revealed,
        })
    }

    fn menu(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            if ui.button("Reset").clicked() {
                self.revealed.set(false);
                self.eraser.reset();
            }
            if self.revealed.get() {
                ui.label("Revealed!");
            } else {
                ui.label(format!(
                    "Erased: {:.0}%",
                    self.eraser.erased_fraction() * 100.0
                ));
            }
            if let PrizeState::Error(error) = &self.prize {
                ui.colored_label(ui.visuals().error_fg_color, error);
            }
        });
    }

    fn poll_prize(&mut self, ctx: &egui::Context, rect: Rect) {
        match &mut self.prize {
            PrizeState::NotLoaded => {
                let task = match self.prize_path.clone() {
                    Some(path) => AsyncTask::new(
                        async move { image_utils::load_image(&std::fs::read(path)?) }.boxed(),
                    ),
                    None => {
                        let width = rect.width().round().max(1.0) as u32;
                        let height = rect.height().round().max(1.0) as u32;
                        AsyncTask::new(
                            async move { Ok(image_utils::checkerboard(width, height)) }.boxed(),
                        )
                    }
                };
                self.prize = PrizeState::Loading(task);
                ctx.request_repaint();
            }
            PrizeState::Loading(task) => match task.poll_data() {
                Some(Ok(image)) => {
                    let handle = ctx.load_texture(
                        "scratch-prize",
                        image_utils::color_image(&image.to_rgba8()),
                        TextureOptions::default(),
                    );
                    self.prize = PrizeState::Loaded(handle);
                }
                Some(Err(e)) => self.prize = PrizeState::Error(format!("IO Error: {}", e)),
                None => ctx.request_repaint(),
            },
            PrizeState::Loaded(_) | PrizeState::Error(_) => {}
        }
    }
}

impl eframe::App for ScratchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Scratch card");
            self.menu(ui);

            let rect = ui.available_rect_before_wrap();
            self.poll_prize(ctx, rect);
            if let PrizeState::Loaded(handle) = &self.prize {
                ui.painter().image(
                    handle.id(),
                    rect,
                    Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0)),
                    Color32::WHITE,
                );
            }
            self.eraser.ui(ui);
        });
    }
}
