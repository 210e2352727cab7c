use super::NormalizedImage;
use crate::Result;
use base64::{Engine as _, engine::general_purpose};
use std::{
    io::Write,
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use tracing::debug;

/// A normalized image spilled to a uniquely named temporary file.
///
/// The file is deleted when the guard is dropped, whichever way the request ends.
#[derive(Debug)]
pub struct ScratchImage {
    file: NamedTempFile,
}

impl ScratchImage {
    pub fn write(dir: &Path, image: &NormalizedImage) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("image_")
            .suffix(".jpg")
            .tempfile_in(dir)?;

        file.write_all(&image.bytes)?;
        file.flush()?;

        debug!(
            "Wrote {} bytes to scratch file {}",
            image.bytes.len(),
            file.path().display()
        );

        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn read_base64(&self) -> Result<String> {
        let bytes = std::fs::read(self.file.path())?;
        Ok(general_purpose::STANDARD.encode(bytes))
    }

    /// Removes the file now instead of waiting for drop.
    pub fn remove(self) -> Result<PathBuf> {
        let path = self.file.path().to_path_buf();
        self.file.close()?;
        debug!("Removed scratch file {}", path.display());
        Ok(path)
    }
}
