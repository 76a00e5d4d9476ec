//! Per-request temp file management.
//!
//! Each request allocates two WAV paths: the raw synthesis output and the
//! transcoded output. Both are owned by RAII guards so they are removed on
//! every exit path, including failures in any pipeline stage. Removal is
//! best-effort; a missing file is not an error.

use std::path::{Path, PathBuf};

use crate::utils::gen_id;

/// Owned temp WAV path, deleted on drop.
#[derive(Debug)]
pub struct TempWav {
    path: PathBuf,
}

impl TempWav {
    /// Allocate a unique path under `dir`. The file itself is created by
    /// whichever external process writes to it.
    pub fn allocate(dir: &Path, tag: &str) -> Self {
        let path = dir.join(format!("tts_{}_{}.wav", tag, gen_id()));
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempWav {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn drop_removes_the_file() {
        let dir = std::env::temp_dir();
        let path = {
            let wav = TempWav::allocate(&dir, "drop");
            fs::write(wav.path(), b"RIFF").unwrap();
            assert!(wav.path().exists());
            wav.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn drop_tolerates_a_missing_file() {
        let dir = std::env::temp_dir();
        let wav = TempWav::allocate(&dir, "absent");
        assert!(!wav.path().exists());
        drop(wav);
    }

    #[test]
    fn allocations_do_not_collide() {
        let dir = std::env::temp_dir();
        let a = TempWav::allocate(&dir, "raw");
        let b = TempWav::allocate(&dir, "raw");
        assert_ne!(a.path(), b.path());
    }
}
