use std::path::Path;

use hamour::config::{AppConfig, CONFIG_FILE};
use hamour::store::sqlite::SqliteStore;
use hamour::store::Store;
use hamour::{boot, publish};
use log::{error, info};

fn main() {
    env_logger::init();

    let config = match AppConfig::load(Path::new(CONFIG_FILE)) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to read config: {}", e);
            std::process::exit(1);
        }
    };

    // Boot check: verify/create directories before touching the database
    if boot::run(&config).is_err() {
        std::process::exit(1);
    }

    let store = SqliteStore::new_at(&config.db_path)
        .expect("Failed to initialize database pool")
        .with_bcrypt_cost(config.bcrypt_cost);
    store
        .run_migrations()
        .expect("Failed to run database migrations");
    store
        .seed_defaults()
        .expect("Failed to seed default settings");
    store
        .setting_set(
            "session_expiry_hours",
            &config.session_expiry_hours.to_string(),
        )
        .expect("Failed to store session expiry");

    match publish::export_site(&store, Path::new(&config.output_dir), config.locale) {
        Ok(report) => info!("Published {} file(s)", report.files.len()),
        Err(e) => {
            error!("Publishing failed: {}", e);
            std::process::exit(1);
        }
    }
}
