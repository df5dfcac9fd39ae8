use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_DIR: AtomicU32 = AtomicU32::new(0);

/// A file path inside a private temp directory that is removed on drop.
pub(crate) struct ScratchFile {
    dir: PathBuf,
    path: PathBuf,
}

impl ScratchFile {
    /// Path only; nothing is created until a store or [`Self::write`] does.
    pub(crate) fn new(file_name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!(
            "grid-snake-test-{}-{}",
            process::id(),
            NEXT_DIR.fetch_add(1, Ordering::Relaxed)
        ));
        let path = dir.join(file_name);
        Self { dir, path }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn write(&self, contents: &str) {
        fs::create_dir_all(&self.dir).expect("scratch dir should be creatable");
        fs::write(&self.path, contents).expect("scratch file should be writable");
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}
