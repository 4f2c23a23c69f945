use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::{ImportStage, QuizError, Result};
use crate::problems::list_images;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportResult {
    pub copied_count: usize,
}

/// Replaces the quiz's problem directory with the images of another folder
#[derive(Debug, Clone)]
pub struct ProblemImporter {
    problem_dir: PathBuf,
}

impl ProblemImporter {
    pub fn new<P: AsRef<Path>>(problem_dir: P) -> Self {
        Self {
            problem_dir: problem_dir.as_ref().to_path_buf(),
        }
    }

    pub fn problem_dir(&self) -> &Path {
        &self.problem_dir
    }

    /// Wholesale replacement: the previous contents never survive a
    /// successful import. A failed copy leaves whatever was copied so far.
    pub fn import_from(&self, source: &Path) -> Result<ImportResult> {
        // Listing the source first means an unreadable folder never wipes the old set
        let images = list_images(source).map_err(|e| QuizError::import(ImportStage::Scan, e))?;
        debug!("found {} images in {}", images.len(), source.display());
        self.ensure_outside_problem_dir(source)
            .map_err(|e| QuizError::import(ImportStage::Scan, e))?;

        if self.problem_dir.exists() {
            fs::remove_dir_all(&self.problem_dir)
                .map_err(|e| QuizError::import(ImportStage::Remove, e))?;
        }
        fs::create_dir_all(&self.problem_dir)
            .map_err(|e| QuizError::import(ImportStage::Create, e))?;

        for image in &images {
            let Some(name) = image.file_name() else {
                continue;
            };
            fs::copy(image, self.problem_dir.join(name))
                .map_err(|e| QuizError::import(ImportStage::Copy, e))?;
        }

        info!(
            "copied {} images from {} to {}",
            images.len(),
            source.display(),
            self.problem_dir.display()
        );
        Ok(ImportResult {
            copied_count: images.len(),
        })
    }

    /// The problem directory is removed before copying, so a source at or
    /// below it would be deleted along with the old set.
    fn ensure_outside_problem_dir(&self, source: &Path) -> io::Result<()> {
        if !self.problem_dir.exists() {
            return Ok(());
        }
        let source = fs::canonicalize(source)?;
        let problem_dir = fs::canonicalize(&self.problem_dir)?;
        if source.starts_with(&problem_dir) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "{} is inside the problem folder {}",
                    source.display(),
                    problem_dir.display()
                ),
            ));
        }
        Ok(())
    }
}
