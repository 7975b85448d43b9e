use crate::config;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

static LOG_FILE: OnceLock<Mutex<std::fs::File>> = OnceLock::new();

pub fn init() {
    let mut log_dir = config::get_config_dir();
    log_dir.push("logs");
    if let Err(e) = init_in(&log_dir) {
        eprintln!("Failed to open log file: {}", e);
    }
}

/// Opens `stickywall.log` in `log_dir`, keeping the previous run as `.log.old`.
pub fn init_in(log_dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(log_dir)?;

    let log_path = log_dir.join("stickywall.log");
    if log_path.exists() {
        let old_path = log_dir.join("stickywall.log.old");
        if old_path.exists() {
            let _ = fs::remove_file(&old_path);
        }
        let _ = fs::rename(&log_path, old_path);
    }

    let mut options = OpenOptions::new();
    options.create(true).append(true);

    #[cfg(unix)]
    {
        options.mode(0o600);
    }

    let file = options.open(log_path)?;
    let _ = LOG_FILE.set(Mutex::new(file));
    Ok(())
}

/// No-op until `init` has run.
pub fn log(msg: &str) {
    if let Some(mutex) = LOG_FILE.get() {
        if let Ok(mut file) = mutex.lock() {
            let _ = writeln!(file, "[{}] {}", chrono::Local::now(), msg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_rotates_previous_log_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");
        fs::create_dir_all(&log_dir).unwrap();
        fs::write(log_dir.join("stickywall.log"), "previous run\n").unwrap();

        init_in(&log_dir).unwrap();
        log("fresh start");

        let old = fs::read_to_string(log_dir.join("stickywall.log.old")).unwrap();
        assert_eq!(old, "previous run\n");
        let current = fs::read_to_string(log_dir.join("stickywall.log")).unwrap();
        assert!(current.contains("fresh start"));
        assert!(!current.contains("previous run"));
    }
}
