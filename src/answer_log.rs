use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::debug;
use serde::Serialize;

use crate::error::Result;
use crate::session::Answer;

/// One CSV row per accepted answer
#[derive(Debug, Clone, Serialize)]
pub struct AnswerRecord {
    pub timestamp: DateTime<Local>,
    pub question: usize,
    pub image: String,
    pub words: usize,
    pub elapsed_secs: f64,
    pub answer: String,
}

impl AnswerRecord {
    pub fn new(answer: &Answer, timestamp: DateTime<Local>) -> Self {
        Self {
            timestamp,
            question: answer.index + 1,
            image: answer
                .image
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            words: answer.word_count,
            elapsed_secs: (answer.elapsed.as_secs_f64() * 10.0).round() / 10.0,
            answer: answer.text.clone(),
        }
    }
}

/// Append-only answer log
#[derive(Debug, Clone)]
pub struct AnswerLog {
    path: PathBuf,
}

impl AnswerLog {
    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &AnswerRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // A missing or empty log (e.g. left behind by a crash) needs a header
        let needs_header = fs::metadata(&self.path)
            .map(|m| m.len() == 0)
            .unwrap_or(true);

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;

        debug!(
            "logged answer to question {} in {}",
            record.question,
            self.path.display()
        );
        Ok(())
    }
}
