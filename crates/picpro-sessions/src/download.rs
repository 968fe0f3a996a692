//! Saving the generated headshot.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::OpenOptions;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::warn;

/// Name given to every downloaded result
pub const DOWNLOAD_FILE_NAME: &str = "pic-pro-resultado.png";

/// Numbered alternatives tried before giving up on a taken name
const MAX_NAME_ATTEMPTS: usize = 1000;

/// Where a download ends up.
#[async_trait]
pub trait DownloadSink: Send + Sync {
    /// Persist `bytes` under `file_name` and return the path written.
    async fn save(&self, file_name: &str, bytes: &[u8]) -> io::Result<PathBuf>;
}

/// Saves into a directory, numbering the name when it is taken, the way a
/// browser's download folder does: `name.png`, `name (1).png`, ...
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl DownloadSink for DirectorySink {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let path = self.dir.join(numbered_name(file_name, attempt));
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => {
                    write_or_remove(file, &path, bytes).await?;
                    return Ok(path);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e),
            }
        }

        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("no free name for {} in {}", file_name, self.dir.display()),
        ))
    }
}

/// Saves to one exact path, replacing any existing file. The suggested name
/// is ignored.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DownloadSink for FileSink {
    async fn save(&self, _file_name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, bytes).await?;
        Ok(self.path.clone())
    }
}

/// Write `bytes` to a file just created at `path`; on failure the partial
/// file is removed.
async fn write_or_remove<W>(mut writer: W, path: &Path, bytes: &[u8]) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let written = async {
        writer.write_all(bytes).await?;
        writer.flush().await
    }
    .await;

    if let Err(e) = written {
        drop(writer);
        if let Err(cleanup) = tokio::fs::remove_file(path).await {
            warn!(
                path = %path.display(),
                error = %cleanup,
                "Could not remove partial download"
            );
        }
        return Err(e);
    }
    Ok(())
}

fn numbered_name(file_name: &str, attempt: usize) -> String {
    if attempt == 0 {
        return file_name.to_string();
    }
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{} ({}).{}", stem, attempt, ext),
        _ => format!("{} ({})", file_name, attempt),
    }
}
