use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::warn;

use crate::app::Notice;
use crate::error::{ImportStage, QuizError, Result};
use crate::importer::{ImportResult, ProblemImporter};
use crate::settings::{FileSettingsStore, Settings, SettingsStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    MinWords,
    TimeLimit,
    ImportFolder,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Field::MinWords => Field::TimeLimit,
            Field::TimeLimit => Field::ImportFolder,
            Field::ImportFolder => Field::MinWords,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Field::MinWords => Field::ImportFolder,
            Field::TimeLimit => Field::MinWords,
            Field::ImportFolder => Field::TimeLimit,
        }
    }
}

/// Parses an editor field: digits only, like the form accepts
pub fn parse_count(value: &str) -> Option<u64> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

/// Operator-facing description of a failed import
pub fn import_failure_message(err: &QuizError, problem_dir: &Path) -> String {
    let dir = problem_dir.display();
    match err {
        QuizError::ImportFailed { stage, source } => match stage {
            ImportStage::Scan => format!("Failed to read the selected folder: {source}"),
            ImportStage::Remove => format!("Failed to remove existing '{dir}' folder: {source}"),
            ImportStage::Create => format!("Failed to create '{dir}' folder: {source}"),
            ImportStage::Copy => format!("Failed to copy files: {source}"),
        },
        other => other.to_string(),
    }
}

/// The configuration editor form
#[derive(Debug)]
pub struct EditorApp {
    store: FileSettingsStore,
    importer: ProblemImporter,
    /// last saved settings; the wpm fields are carried through saves unchanged
    pub settings: Settings,
    pub min_words: String,
    pub time_limit: String,
    pub import_folder: String,
    pub focus: Field,
    pub notice: Option<Notice>,
    pub should_quit: bool,
}

impl EditorApp {
    /// Fails with `ConfigMissing` when there is nothing to edit
    pub fn new(store: FileSettingsStore, importer: ProblemImporter) -> Result<Self> {
        let settings = store.load()?;
        Ok(Self {
            min_words: settings.min_words.to_string(),
            time_limit: settings.time_limit.to_string(),
            import_folder: String::new(),
            focus: Field::MinWords,
            notice: None,
            should_quit: false,
            settings,
            store,
            importer,
        })
    }

    pub fn config_path(&self) -> &Path {
        self.store.path()
    }

    pub fn problem_dir(&self) -> &Path {
        self.importer.problem_dir()
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::MinWords => &mut self.min_words,
            Field::TimeLimit => &mut self.time_limit,
            Field::ImportFolder => &mut self.import_folder,
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if self.notice.take().is_some() {
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => self.should_quit = true,
            KeyCode::Char('s') if ctrl => self.save(),
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
            KeyCode::Enter => match self.focus {
                Field::ImportFolder => self.import(),
                _ => self.save(),
            },
            KeyCode::Backspace => {
                self.focused_mut().pop();
            }
            KeyCode::Char(c) if !ctrl => {
                // numeric fields only take digits
                if self.focus == Field::ImportFolder || c.is_ascii_digit() {
                    self.focused_mut().push(c);
                }
            }
            _ => {}
        }
    }

    /// Settings the form would save, if both fields are numeric
    pub fn edited_settings(&self) -> Option<Settings> {
        let min_words = parse_count(&self.min_words)?;
        let time_limit = parse_count(&self.time_limit)?;
        Some(Settings {
            min_words: usize::try_from(min_words).ok()?,
            time_limit,
            ..self.settings
        })
    }

    pub fn save(&mut self) {
        let Some(settings) = self.edited_settings() else {
            self.notice = Some(Notice::error("Error", "Both values must be numeric!"));
            return;
        };
        match self.store.save(&settings) {
            Ok(()) => {
                self.settings = settings;
                self.notice = Some(Notice::info("Success", "Settings updated successfully!"));
            }
            Err(e) => {
                warn!("saving settings failed: {e}");
                self.notice = Some(Notice::error("Error", format!("Failed to save settings: {e}")));
            }
        }
    }

    pub fn import(&mut self) {
        let folder = self.import_folder.trim();
        if folder.is_empty() {
            self.notice = Some(Notice::error("Error", "Enter a folder to import from."));
            return;
        }
        let source = PathBuf::from(folder);
        self.notice = Some(match self.importer.import_from(&source) {
            Ok(ImportResult { copied_count }) => Notice::info(
                "Success",
                format!(
                    "Copied {copied_count} .png files to '{}'.",
                    self.importer.problem_dir().display()
                ),
            ),
            Err(e) => {
                warn!("import from {} failed: {e}", source.display());
                Notice::error(
                    "Error",
                    import_failure_message(&e, self.importer.problem_dir()),
                )
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn editor(dir: &TempDir, settings: Settings) -> EditorApp {
        let store = FileSettingsStore::with_path(dir.path().join("config.csv"));
        store.save(&settings).unwrap();
        EditorApp::new(store, ProblemImporter::new(dir.path().join("math_problems"))).unwrap()
    }

    fn clear_field(app: &mut EditorApp) {
        for _ in 0..10 {
            app.on_key(key(KeyCode::Backspace));
        }
    }

    #[test]
    fn missing_config_is_fatal() {
        let dir = tempdir().unwrap();
        let result = EditorApp::new(
            FileSettingsStore::with_path(dir.path().join("config.csv")),
            ProblemImporter::new(dir.path().join("math_problems")),
        );
        assert_matches!(result, Err(QuizError::ConfigMissing { .. }));
    }

    #[test]
    fn parse_count_accepts_digits_only() {
        assert_eq!(parse_count("42"), Some(42));
        assert_eq!(parse_count("0"), Some(0));
        assert_eq!(parse_count(""), None);
        assert_eq!(parse_count("-1"), None);
        assert_eq!(parse_count("1.5"), None);
        assert_eq!(parse_count(" 3"), None);
    }

    #[test]
    fn save_preserves_wpm_fields() {
        let dir = tempdir().unwrap();
        let mut app = editor(
            &dir,
            Settings {
                min_words: 1,
                time_limit: 5,
                wpm_limit: 45,
                wpm_td: 20,
            },
        );

        clear_field(&mut app);
        app.on_key(key(KeyCode::Char('7')));
        app.on_key(key(KeyCode::Tab));
        clear_field(&mut app);
        for c in "120".chars() {
            app.on_key(key(KeyCode::Char(c)));
        }
        app.on_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));

        assert_eq!(app.notice.as_ref().map(|n| n.title.as_str()), Some("Success"));
        let saved = FileSettingsStore::with_path(dir.path().join("config.csv"))
            .load()
            .unwrap();
        assert_eq!(
            saved,
            Settings {
                min_words: 7,
                time_limit: 120,
                wpm_limit: 45,
                wpm_td: 20
            }
        );
    }

    #[test]
    fn numeric_fields_ignore_letters() {
        let dir = tempdir().unwrap();
        let mut app = editor(&dir, Settings::default());
        app.on_key(key(KeyCode::Char('a')));
        assert_eq!(app.min_words, "1");
    }

    #[test]
    fn empty_field_is_rejected_on_save() {
        let dir = tempdir().unwrap();
        let mut app = editor(&dir, Settings::default());
        clear_field(&mut app);
        app.on_key(key(KeyCode::Enter));

        assert_eq!(
            app.notice.as_ref().map(|n| n.body.as_str()),
            Some("Both values must be numeric!")
        );
        let on_disk = fs::read_to_string(dir.path().join("config.csv")).unwrap();
        assert!(on_disk.contains("min_words,1"));
    }

    #[test]
    fn import_from_typed_folder() {
        let dir = tempdir().unwrap();
        let src = tempdir().unwrap();
        fs::write(src.path().join("q1.png"), b"1").unwrap();
        fs::write(src.path().join("q2.png"), b"2").unwrap();
        let mut app = editor(&dir, Settings::default());

        app.on_key(key(KeyCode::Up));
        assert_eq!(app.focus, Field::ImportFolder);
        for c in src.path().to_string_lossy().chars() {
            app.on_key(key(KeyCode::Char(c)));
        }
        app.on_key(key(KeyCode::Enter));

        let notice = app.notice.clone().unwrap();
        assert_eq!(notice.title, "Success");
        assert!(notice.body.starts_with("Copied 2 .png files"));
        assert!(dir.path().join("math_problems").join("q2.png").exists());
    }

    #[test]
    fn import_failure_is_reported_by_stage() {
        let dir = tempdir().unwrap();
        let mut app = editor(&dir, Settings::default());
        app.import_folder = dir.path().join("missing").to_string_lossy().into_owned();
        app.import();

        let notice = app.notice.clone().unwrap();
        assert_eq!(notice.title, "Error");
        assert!(notice.body.starts_with("Failed to read the selected folder"));
    }

    #[test]
    fn escape_quits() {
        let dir = tempdir().unwrap();
        let mut app = editor(&dir, Settings::default());
        app.on_key(key(KeyCode::Esc));
        assert!(app.should_quit);
    }
}
