// src/utils/io.rs
use std::path::PathBuf;

/// Get the application data directory, creating it if needed
pub fn get_app_data_dir() -> Option<PathBuf> {
    if let Some(proj_dirs) = directories::ProjectDirs::from("com", "rustpassgen", "rust_passgen") {
        let data_dir = proj_dirs.data_local_dir();

        if !data_dir.exists() {
            if let Err(e) = std::fs::create_dir_all(data_dir) {
                log::error!("Failed to create data directory: {}", e);
                return None;
            }
        }

        Some(data_dir.to_path_buf())
    } else {
        log::error!("Could not determine data directory");
        None
    }
}
