use crate::error::{Result, StorageError};
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use fs2::FileExt;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};
use typed_builder::TypedBuilder;
use urlshort_core::Mapping;

/// Name of the bucket holding `path -> url` entries.
pub const BUCKET_NAME: &str = "URLS";

/// Location of the store when none is configured, relative to the working directory.
pub const DEFAULT_STORE_PATH: &str = "url.db";

/// Lock file inside the store directory, held exclusively while the store is open.
pub const LOCK_FILE_NAME: &str = "urlshort.lock";

// The engine rejects empty keys and keys longer than u16::MAX bytes.
const MAX_KEY_LEN: usize = u16::MAX as usize;

/// Configuration for opening a [`UrlStore`].
///
/// # Example
///
/// ```rust
/// use urlshort_storage::StoreConfig;
///
/// let config = StoreConfig::builder().path("/var/lib/urlshort/url.db").build();
/// assert_eq!(config.path().to_str(), Some("/var/lib/urlshort/url.db"));
/// ```
#[derive(Debug, Clone, TypedBuilder)]
pub struct StoreConfig {
    /// Directory of the fjall keyspace.
    #[builder(default = PathBuf::from(DEFAULT_STORE_PATH), setter(into))]
    path: PathBuf,
}

impl StoreConfig {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A handle to the persistent redirect store.
///
/// The handle is cheap to clone; all clones share the same keyspace and the
/// same exclusive lock on [`LOCK_FILE_NAME`], which is released when the last
/// clone is dropped. Reads may run concurrently. Only [`UrlStore::seed`] writes.
#[derive(Clone)]
pub struct UrlStore {
    keyspace: Keyspace,
    path: PathBuf,
    _lock: Arc<File>,
}

impl std::fmt::Debug for UrlStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlStore").field("path", &self.path).finish()
    }
}

impl UrlStore {
    /// Opens the store at the configured path, creating it if absent.
    ///
    /// The store directory is created owner-only before anything is written
    /// into it. Fails with [`StorageError::Open`] if another handle, in this
    /// process or another one, already holds the store.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let path = config.path().to_path_buf();
        info!(path = %path.display(), "opening url store");

        let open_err =
            |e: std::io::Error| StorageError::Open(format!("{}: {e}", path.display()));
        create_private_dir(&path).map_err(open_err)?;
        let lock = acquire_lock(&path.join(LOCK_FILE_NAME)).map_err(open_err)?;

        let keyspace = Config::new(&path)
            .open()
            .map_err(|e| StorageError::Open(format!("{}: {e}", path.display())))?;

        Ok(Self {
            keyspace,
            path,
            _lock: Arc::new(lock),
        })
    }

    /// Opens the store and seeds the bucket from `seed`.
    pub fn bootstrap(config: &StoreConfig, seed: &Mapping) -> Result<Self> {
        let store = Self::open(config)?;
        store.seed(seed)?;
        Ok(store)
    }

    /// Returns the directory the store lives in.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the bucket if needed and writes every entry of `seed` into it.
    ///
    /// Entries are keyed by path with the url as value; existing keys are
    /// overwritten. All entries are committed in one batch and flushed to disk
    /// before returning. Returns the number of entries written.
    pub fn seed(&self, seed: &Mapping) -> Result<usize> {
        let bucket = self
            .keyspace
            .open_partition(BUCKET_NAME, PartitionCreateOptions::default())
            .map_err(|e| StorageError::Bucket(e.to_string()))?;

        let mut batch = self.keyspace.batch();
        let mut written = 0;
        for (path, url) in seed.iter() {
            if !is_storable_key(path) {
                warn!(path = %path, "skipping seed entry with unstorable key");
                continue;
            }
            trace!(path = %path, url = %url, "seeding entry");
            batch.insert(&bucket, path.as_bytes(), url.as_bytes());
            written += 1;
        }

        batch
            .commit()
            .map_err(|e| StorageError::Write(e.to_string()))?;
        self.keyspace
            .persist(PersistMode::SyncAll)
            .map_err(|e| StorageError::Write(e.to_string()))?;

        info!(entries = written, bucket = BUCKET_NAME, "seeded url store");
        Ok(written)
    }

    /// Reads the target stored for `path`.
    ///
    /// A missing bucket, a missing key and an empty value all read as `None`.
    pub fn get(&self, path: &str) -> Result<Option<String>> {
        if !is_storable_key(path) {
            return Ok(None);
        }

        let Some(bucket) = self.bucket()? else {
            debug!(bucket = BUCKET_NAME, "bucket does not exist");
            return Ok(None);
        };

        let value = bucket
            .get(path.as_bytes())
            .map_err(|e| StorageError::Read(e.to_string()))?;

        match value {
            Some(bytes) if !bytes.is_empty() => String::from_utf8(bytes.to_vec())
                .map(Some)
                .map_err(|e| {
                    StorageError::InvalidData(format!("target for '{path}' is not utf-8: {e}"))
                }),
            _ => Ok(None),
        }
    }

    /// Flushes pending writes to disk and releases this handle.
    ///
    /// The directory lock is released once every clone has been dropped.
    pub fn close(self) -> Result<()> {
        self.keyspace
            .persist(PersistMode::SyncAll)
            .map_err(|e| StorageError::Write(e.to_string()))?;
        info!(path = %self.path.display(), "closed url store");
        Ok(())
    }

    fn bucket(&self) -> Result<Option<PartitionHandle>> {
        if !self.keyspace.partition_exists(BUCKET_NAME) {
            return Ok(None);
        }
        self.keyspace
            .open_partition(BUCKET_NAME, PartitionCreateOptions::default())
            .map(Some)
            .map_err(|e| StorageError::Bucket(e.to_string()))
    }
}

fn is_storable_key(key: &str) -> bool {
    !key.is_empty() && key.len() <= MAX_KEY_LEN
}

#[cfg(unix)]
fn create_private_dir(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::{DirBuilderExt, PermissionsExt};

    std::fs::DirBuilder::new()
        .recursive(true)
        .mode(0o700)
        .create(path)?;
    // an existing directory keeps its mode otherwise
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))
}

#[cfg(not(unix))]
fn create_private_dir(path: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(path)
}

fn acquire_lock(path: &Path) -> std::io::Result<File> {
    let mut options = std::fs::OpenOptions::new();
    options.read(true).write(true).create(true).truncate(false);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let file = options.open(path)?;
    FileExt::try_lock_exclusive(&file).map_err(|e| {
        std::io::Error::new(e.kind(), format!("store is already in use: {e}"))
    })?;
    Ok(file)
}
