//! JSON file document store.

use crate::history::ports::{DocumentStore, StoreError, StoreResult};
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::{Serialize, de::DeserializeOwned};
use std::fmt;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::debug;

/// Stores one document as a pretty-printed JSON file.
///
/// The file lives at a relative path inside a capability-scoped directory;
/// missing parent directories are created on save. Operations on one store
/// are serialised and run on the blocking thread pool.
pub struct JsonFileStore<T> {
    dir: Arc<Dir>,
    file: Utf8PathBuf,
    gate: Mutex<()>,
    closed: AtomicBool,
    document: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    /// Opens `root` and binds the store to `file` beneath it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] when `root` cannot be opened.
    pub fn open(root: &Utf8Path, file: impl Into<Utf8PathBuf>) -> StoreResult<Self> {
        let dir = Dir::open_ambient_dir(root, ambient_authority()).map_err(StoreError::io)?;
        Ok(Self::in_dir(dir, file))
    }

    /// Binds the store to `file` beneath an already opened directory.
    #[must_use]
    pub fn in_dir(dir: Dir, file: impl Into<Utf8PathBuf>) -> Self {
        Self {
            dir: Arc::new(dir),
            file: file.into(),
            gate: Mutex::new(()),
            closed: AtomicBool::new(false),
            document: PhantomData,
        }
    }

    /// Returns the file path relative to the store directory.
    #[must_use]
    pub fn file(&self) -> &Utf8Path {
        &self.file
    }

    /// Closes the store; every later operation fails with
    /// [`StoreError::Disposed`].
    ///
    /// Waits for an in-flight operation to finish first.
    pub async fn close(&self) {
        let _guard = self.gate.lock().await;
        self.closed.store(true, Ordering::Release);
    }

    fn ensure_open(&self) -> StoreResult<()> {
        if self.closed.load(Ordering::Acquire) {
            Err(StoreError::Disposed)
        } else {
            Ok(())
        }
    }

    async fn run_blocking<F, R>(&self, operation: F) -> StoreResult<R>
    where
        F: FnOnce(&Dir, &Utf8Path) -> StoreResult<R> + Send + 'static,
        R: Send + 'static,
    {
        let dir = Arc::clone(&self.dir);
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || operation(&dir, &file))
            .await
            .map_err(StoreError::persistence)?
    }
}

fn read_if_present(dir: &Dir, file: &Utf8Path) -> StoreResult<Option<String>> {
    match dir.read_to_string(file) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(StoreError::io(err)),
    }
}

fn write_creating_parent(dir: &Dir, file: &Utf8Path, contents: &str) -> StoreResult<()> {
    if let Some(parent) = file.parent().filter(|parent| !parent.as_str().is_empty()) {
        dir.create_dir_all(parent).map_err(StoreError::io)?;
    }
    dir.write(file, contents).map_err(StoreError::io)
}

#[async_trait]
impl<T> DocumentStore<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn load(&self) -> StoreResult<Option<T>> {
        let _guard = self.gate.lock().await;
        self.ensure_open()?;
        let contents = self.run_blocking(read_if_present).await?;
        match contents {
            Some(text) if !text.trim().is_empty() => serde_json::from_str(&text)
                .map(Some)
                .map_err(StoreError::serialization),
            _ => {
                debug!(file = %self.file, "no stored document");
                Ok(None)
            }
        }
    }

    async fn save(&self, document: &T) -> StoreResult<()> {
        let contents = serde_json::to_string_pretty(document).map_err(StoreError::serialization)?;
        let _guard = self.gate.lock().await;
        self.ensure_open()?;
        self.run_blocking(move |dir, file| write_creating_parent(dir, file, &contents))
            .await?;
        debug!(file = %self.file, "document saved");
        Ok(())
    }
}

impl<T> fmt::Debug for JsonFileStore<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("JsonFileStore")
            .field("file", &self.file)
            .field("closed", &self.closed.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}
