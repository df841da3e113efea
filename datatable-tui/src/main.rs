mod app;
mod billing;
mod paths;
mod settings;
mod terminal;

use std::fs::{self, File};

use simplelog::{Config, LevelFilter, WriteLogger};

use crate::settings::Settings;

/// Log to `latest.log` in the cache directory, rotating the previous one.
fn init_logging(level: LevelFilter) {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else {
        return;
    };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    match File::create(&path) {
        Ok(file) => {
            let _ = WriteLogger::init(level, Config::default(), file);
        }
        Err(e) => eprintln!("Failed to create log file {}: {}", path.display(), e),
    }
}

#[tokio::main]
async fn main() {
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    init_logging(settings.level_filter().unwrap_or(LevelFilter::Debug));
    log::info!("Starting with {:?}", settings);

    if let Err(e) = app::run(settings).await {
        log::error!("Exited with error: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
