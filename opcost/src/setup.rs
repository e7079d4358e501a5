//! Output directory preparation.

use std::io;
use std::path::Path;

use tokio::fs;
use tracing::info;

/// What `prepare_output_dir` did to the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirState {
    /// The directory existed and `removed` entries were deleted from it.
    Cleared { removed: usize },
    /// The directory did not exist and was created.
    Created,
}

/// Make `dir` an empty directory before a run.
///
/// Every file and subdirectory inside an existing directory is removed; a
/// missing directory is created along with its parents.
pub async fn prepare_output_dir(dir: &Path) -> io::Result<DirState> {
    if !fs::try_exists(dir).await? {
        fs::create_dir_all(dir).await?;
        info!(path = %dir.display(), "Created output directory");
        return Ok(DirState::Created);
    }

    let mut removed = 0;
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if entry.file_type().await?.is_dir() {
            fs::remove_dir_all(&path).await?;
        } else {
            fs::remove_file(&path).await?;
        }
        removed += 1;
    }

    info!(path = %dir.display(), removed, "Cleared output directory");
    Ok(DirState::Cleared { removed })
}
