//! Main application entry point (native).

use ledkit_app::AppConfig;

fn main() {
    env_logger::init();
    log::info!("Starting LedKit");

    let config = match std::env::args().nth(1) {
        Some(path) => match AppConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load {}: {}; using defaults", path, e);
                AppConfig::default()
            }
        },
        None => AppConfig::default(),
    };

    if let Err(e) = pollster::block_on(ledkit_app::App::run(config)) {
        log::error!("LedKit exited with an error: {}", e);
        std::process::exit(1);
    }
}
