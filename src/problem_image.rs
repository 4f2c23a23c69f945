use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// What the quiz knows about the picture behind a question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl ProblemImage {
    /// Reads the PNG header to check the file is a readable image
    pub fn open(path: &Path) -> io::Result<Self> {
        let mut header = [0u8; 24];
        File::open(path)?.read_exact(&mut header)?;

        if header[..8] != PNG_SIGNATURE || &header[12..16] != b"IHDR" {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "not a PNG image",
            ));
        }

        let width = u32::from_be_bytes([header[16], header[17], header[18], header[19]]);
        let height = u32::from_be_bytes([header[20], header[21], header[22], header[23]]);
        Ok(Self {
            path: path.to_path_buf(),
            width,
            height,
        })
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[cfg(test)]
pub(crate) fn png_header(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = PNG_SIGNATURE.to_vec();
    bytes.extend_from_slice(&13u32.to_be_bytes());
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
    bytes
}
