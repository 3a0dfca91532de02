//! Local directory holding uploaded PDFs under collision-free names.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct UploadStore {
    base_path: PathBuf,
}

impl UploadStore {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub async fn ensure_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.base_path).await
    }

    /// Stored name for a sanitized upload: a random 32 hex char token, `_`, then the name.
    pub fn stored_name_for(file_name: &str) -> String {
        format!("{}_{}", Uuid::new_v4().simple(), file_name)
    }

    pub fn path_of(&self, stored_name: &str) -> PathBuf {
        self.base_path.join(stored_name)
    }

    /// Writes `data` under a fresh stored name and returns that name.
    ///
    /// The file is opened with `create_new`, an existing file is never overwritten.
    pub async fn save(&self, file_name: &str, data: &[u8]) -> io::Result<String> {
        self.ensure_dir().await?;

        let stored_name = Self::stored_name_for(file_name);
        let path = self.path_of(&stored_name);
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;

        if let Err(e) = write_all(&mut file, data).await {
            drop(file);
            let _ = fs::remove_file(&path).await;
            return Err(e);
        }

        Ok(stored_name)
    }

    pub async fn remove(&self, stored_name: &str) -> io::Result<()> {
        match fs::remove_file(self.path_of(stored_name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    #[cfg(test)]
    pub async fn exists(&self, stored_name: &str) -> bool {
        fs::try_exists(self.path_of(stored_name)).await.unwrap_or(false)
    }
}

async fn write_all(file: &mut fs::File, data: &[u8]) -> io::Result<()> {
    file.write_all(data).await?;
    file.sync_all().await
}
