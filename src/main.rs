use transfer_view::app::App;
use transfer_view::config::Config;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    let _guard = rt.enter();

    env_logger::init();

    let config = Config::load().unwrap_or_else(|e| {
        log::warn!("Config not usable ({}), falling back to defaults", e);
        Config::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([760.0, 480.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Transfer View",
        options,
        Box::new(move |cc| Ok(Box::new(App::new(cc, config)))),
    );

    drop(_guard);
    rt.shutdown_timeout(std::time::Duration::from_secs(2));

    result?;
    Ok(())
}
