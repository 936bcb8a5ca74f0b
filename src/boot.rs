use log::{error, info, warn};
use std::fs;
use std::path::Path;

use crate::config::{AppConfig, CONFIG_FILE};

fn ensure_dir(path: &Path, errors: &mut u32) {
    if !path.exists() {
        match fs::create_dir_all(path) {
            Ok(_) => info!("  Created directory: {}", path.display()),
            Err(e) => {
                error!("  FAILED to create directory {}: {}", path.display(), e);
                *errors += 1;
            }
        }
    }
}

fn writable(dir: &Path) -> Result<(), std::io::Error> {
    let test_file = dir.join(".write_test");
    fs::write(&test_file, "test")?;
    let _ = fs::remove_file(&test_file);
    Ok(())
}

/// Run all boot checks before the store is opened.
/// Creates missing directories and verifies the database and export
/// directories are writable.
pub fn run(config: &AppConfig) -> Result<(), String> {
    info!("Hamour boot check starting...");

    let mut warnings = 0u32;
    let mut errors = 0u32;

    // ── 1. Directories ─────────────────────────────────
    let db_dir = Path::new(&config.db_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let output_dir = Path::new(&config.output_dir);
    ensure_dir(db_dir, &mut errors);
    ensure_dir(output_dir, &mut errors);

    // ── 2. Database directory writable ──────────────────
    if db_dir.exists() {
        if let Err(e) = writable(db_dir) {
            error!("  Database directory not writable: {}", e);
            errors += 1;
        }
    }

    // ── 3. Export directory writable ────────────────────
    if output_dir.exists() {
        if let Err(e) = writable(output_dir) {
            warn!("  Export directory not writable: {} (publishing will fail)", e);
            warnings += 1;
        }
    }

    // ── 4. Config file exists ───────────────────────────
    if !Path::new(CONFIG_FILE).exists() {
        warn!("  {} not found, using default config", CONFIG_FILE);
        warnings += 1;
    }

    // ── Summary ─────────────────────────────────────────
    if errors > 0 {
        error!(
            "Boot check FAILED: {} error(s), {} warning(s). Aborting.",
            errors, warnings
        );
        return Err(format!("boot check failed with {} error(s)", errors));
    }

    if warnings > 0 {
        warn!(
            "Boot check passed with {} warning(s). Some features may not work correctly.",
            warnings
        );
    } else {
        info!("Boot check passed. All systems go.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            db_path: dir.path().join("db/hamour.db").display().to_string(),
            output_dir: dir.path().join("public").display().to_string(),
            ..AppConfig::default()
        };
        run(&config).unwrap();
        assert!(dir.path().join("db").is_dir());
        assert!(dir.path().join("public").is_dir());
    }
}
