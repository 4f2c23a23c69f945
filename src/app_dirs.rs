use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Where accepted answers are appended, `$HOME/.local/state/quizlock` first
    pub fn answer_log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("quizlock");
            Some(state_dir.join("answers.csv"))
        } else {
            ProjectDirs::from("", "", "quizlock")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("answers.csv"))
        }
    }
}
