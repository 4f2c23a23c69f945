pub mod editor;
pub mod notice;
pub mod quiz;

pub use editor::{EditorApp, Field};
pub use notice::{Notice, NoticeKind};
pub use quiz::QuizApp;
