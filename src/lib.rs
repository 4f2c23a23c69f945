// Library surface shared by the quiz and editor binaries and the integration tests.
pub mod answer_log;
pub mod app;
pub mod app_dirs;
pub mod error;
pub mod importer;
pub mod kiosk;
pub mod problem_image;
pub mod problems;
pub mod runtime;
pub mod session;
pub mod settings;
pub mod typing_rate;
pub mod ui;

pub use error::{QuizError, Result};
