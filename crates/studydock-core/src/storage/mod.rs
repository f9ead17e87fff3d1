mod config;

pub use config::{AudioConfig, Config, TimerConfig, WidgetLayoutConfig};

use std::path::PathBuf;

/// Returns the configuration directory.
///
/// `STUDYDOCK_CONFIG_DIR` wins when set. Otherwise `~/.config/studydock[-dev]/`,
/// with `STUDYDOCK_ENV=dev` selecting the development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let dir = match std::env::var_os("STUDYDOCK_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("STUDYDOCK_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("studydock-dev")
            } else {
                base_dir.join("studydock")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
