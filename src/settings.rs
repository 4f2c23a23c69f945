use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info, warn};

use crate::error::{QuizError, Result};

pub const MIN_WORDS_KEY: &str = "min_words";
pub const TIME_LIMIT_KEY: &str = "time_limit";
pub const WPM_LIMIT_KEY: &str = "wpm_limit";
pub const WPM_TD_KEY: &str = "wpm_td";

pub const DEFAULT_CONFIG_FILE: &str = "config.csv";

/// Quiz parameters shared by the quiz and the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub min_words: usize,
    /// seconds per question before advancing is always allowed
    pub time_limit: u64,
    pub wpm_limit: u64,
    /// typing-rate tracking window, in seconds (always > 0)
    pub wpm_td: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_words: 1,
            time_limit: 5,
            wpm_limit: 30,
            wpm_td: 10,
        }
    }
}

impl Settings {
    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit)
    }

    pub fn tracking_window(&self) -> Duration {
        Duration::from_secs(self.wpm_td)
    }

    fn rows(&self) -> [(&'static str, u64); 4] {
        [
            (MIN_WORDS_KEY, self.min_words as u64),
            (TIME_LIMIT_KEY, self.time_limit),
            (WPM_LIMIT_KEY, self.wpm_limit),
            (WPM_TD_KEY, self.wpm_td),
        ]
    }
}

pub trait SettingsStore {
    /// Read existing settings; a missing file is an error.
    fn load(&self) -> Result<Settings>;
    fn save(&self, settings: &Settings) -> Result<()>;
}

/// Settings persisted as headerless `key,value` CSV rows
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Quiz-side loading: writes the defaults first when no file exists.
    pub fn load_or_create(&self) -> Result<Settings> {
        if !self.path.exists() {
            info!(
                "no settings at {}, writing defaults",
                self.path.display()
            );
            self.save(&Settings::default())?;
        }
        self.load()
    }

    fn corrupt(&self, detail: impl Into<String>) -> QuizError {
        QuizError::ConfigCorrupt {
            path: self.path.clone(),
            detail: detail.into(),
        }
    }

    fn parse(&self, data: &[u8]) -> Result<Settings> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(data);

        let mut min_words = None;
        let mut time_limit = None;
        let mut wpm_limit = None;
        let mut wpm_td = None;

        for record in reader.records() {
            let record = record.map_err(|e| self.corrupt(e.to_string()))?;
            if record.iter().all(str::is_empty) {
                continue;
            }
            if record.len() != 2 {
                return Err(self.corrupt(format!(
                    "expected `key,value`, found {} fields",
                    record.len()
                )));
            }
            let key = &record[0];
            let slot = match key {
                MIN_WORDS_KEY => &mut min_words,
                TIME_LIMIT_KEY => &mut time_limit,
                WPM_LIMIT_KEY => &mut wpm_limit,
                WPM_TD_KEY => &mut wpm_td,
                other => {
                    warn!("ignoring unknown settings key {other:?}");
                    continue;
                }
            };
            let value: u64 = record[1]
                .parse()
                .map_err(|_| self.corrupt(format!("{key} is not an integer: {:?}", &record[1])))?;
            *slot = Some(value);
        }

        let require = |v: Option<u64>, key: &str| v.ok_or_else(|| self.corrupt(format!("missing {key}")));
        let settings = Settings {
            min_words: usize::try_from(require(min_words, MIN_WORDS_KEY)?)
                .map_err(|_| self.corrupt("min_words is too large"))?,
            time_limit: require(time_limit, TIME_LIMIT_KEY)?,
            wpm_limit: require(wpm_limit, WPM_LIMIT_KEY)?,
            wpm_td: require(wpm_td, WPM_TD_KEY)?,
        };

        if settings.wpm_td == 0 {
            return Err(self.corrupt("wpm_td must be greater than zero"));
        }
        Ok(settings)
    }
}

impl Default for FileSettingsStore {
    fn default() -> Self {
        Self::with_path(DEFAULT_CONFIG_FILE)
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> Result<Settings> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(QuizError::ConfigMissing {
                    path: self.path.clone(),
                })
            }
            Err(e) => return Err(e.into()),
        };
        let settings = self.parse(&data)?;
        debug!("loaded {:?} from {}", settings, self.path.display());
        Ok(settings)
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(vec![]);
        for (key, value) in settings.rows() {
            writer.write_record([key, value.to_string().as_str()])?;
        }
        let data = writer
            .into_inner()
            .map_err(|e| QuizError::from(e.into_error()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Replace via rename so readers never observe a half-written file
        let mut tmp_name = self.path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);
        {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(&data)?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;

        info!("saved settings to {}", self.path.display());
        Ok(())
    }
}
