use std::io;

use eframe::egui;
use log::info;

use crate::config::Config;

use super::ScratchApp;

pub fn run_native() -> eframe::Result {
    env_logger::init();

    let config: Config = match std::fs::File::open("config.json") {
        Ok(f) => serde_json::from_reader(f).map_err(|e| eframe::Error::AppCreation(Box::new(e)))?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => Config::default(),
        Err(e) => Err(eframe::Error::AppCreation(Box::new(e)))?,
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(config.window.viewport),
        ..Default::default()
    };

    info!("Run with config: {config:?}");
    eframe::run_native(
        "Scratch card",
        options,
        Box::new(move |_cc| Ok(Box::new(ScratchApp::new(&config)?))),
    )
}
