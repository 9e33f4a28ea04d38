use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Directory for log files
    pub fn log_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join("glide"),
            )
        } else {
            ProjectDirs::from("", "", "glide").map(|proj_dirs| proj_dirs.data_local_dir().to_path_buf())
        }
    }
}
