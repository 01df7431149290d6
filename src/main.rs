mod app;
mod catalog;
mod recommend;
mod session;
mod theme;

use app::GuideApp;
use catalog::Catalog;
use eframe::egui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let output = Catalog::load()?;
    log::info!(
        "catalog loaded: {} tips across {} focus areas",
        output.catalog.len(),
        catalog::FocusArea::ALL.len()
    );
    for diagnostic in &output.diagnostics {
        log::warn!("{}", diagnostic.to_log_line());
    }

    let app = GuideApp::new(output.catalog, output.diagnostics);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([900.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Mindful Eating Guide",
        native_options,
        Box::new(move |creation_context| {
            app.theme().apply_visuals(&creation_context.egui_ctx);
            Ok(Box::new(app))
        }),
    )?;

    Ok(())
}
