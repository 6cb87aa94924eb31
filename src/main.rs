fn main() -> eframe::Result {
    egui_scratch::run_native()
}
