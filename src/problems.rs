use std::fs;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use log::info;

use crate::error::{QuizError, Result};

pub const DEFAULT_PROBLEM_DIR: &str = "math_problems";
pub const IMAGE_EXTENSION: &str = "png";

/// True for paths whose extension marks them as problem images
pub fn is_problem_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(IMAGE_EXTENSION))
}

/// Image files directly inside `dir`, sorted by file name
pub fn list_images(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut images = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_file() && is_problem_image(&path) {
            images.push(path);
        }
    }
    Ok(images
        .into_iter()
        .sorted_by(|a, b| a.file_name().cmp(&b.file_name()))
        .collect())
}

/// The ordered questions of one quiz run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProblemSet {
    images: Vec<PathBuf>,
}

impl ProblemSet {
    pub fn new(images: Vec<PathBuf>) -> Self {
        Self { images }
    }

    pub fn load(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(QuizError::ProblemsMissing {
                path: dir.to_path_buf(),
            });
        }
        let images = list_images(dir)?;
        info!("loaded {} problems from {}", images.len(), dir.display());
        Ok(Self { images })
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.images.get(index).map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.images.iter().map(PathBuf::as_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn image_filter_matches_png_only() {
        assert!(is_problem_image(Path::new("a/q1.png")));
        assert!(is_problem_image(Path::new("Q2.PNG")));
        assert!(!is_problem_image(Path::new("notes.txt")));
        assert!(!is_problem_image(Path::new("png")));
        assert!(!is_problem_image(Path::new("q3.png.bak")));
    }

    #[test]
    fn load_sorts_by_name_and_skips_other_entries() {
        let dir = tempdir().unwrap();
        for name in ["c.png", "a.png", "b.png", "readme.txt"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.png")).unwrap();

        let set = ProblemSet::load(dir.path()).unwrap();
        let names: Vec<_> = set
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.png", "b.png", "c.png"]);
    }

    #[test]
    fn load_empty_dir_gives_empty_set() {
        let dir = tempdir().unwrap();
        let set = ProblemSet::load(dir.path()).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.get(0), None);
    }

    #[test]
    fn load_missing_dir_is_an_error() {
        let dir = tempdir().unwrap();
        assert_matches!(
            ProblemSet::load(&dir.path().join("missing")),
            Err(QuizError::ProblemsMissing { .. })
        );
    }
}
