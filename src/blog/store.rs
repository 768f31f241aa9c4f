//! Listing store: every published post, persisted as one JSON document.
//!
//! The file is only ever replaced whole (temp file, fsync, rename), so a
//! reader or a crash never sees a half-written store. Appends are serialized
//! through the write half of the lock; [`AppendTx`] holds it across the
//! uniqueness check, file publication and persistence of one post.

use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::{
    io::AsyncWriteExt,
    sync::{RwLock, RwLockWriteGuard},
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    blog::{model::PostRecord, registry::PostRegistry},
    config::SiteLayout,
};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to {action} listing store: {source}")]
    Io {
        action: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("listing store is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("a post with slug '{0}' already exists")]
    DuplicateSlug(String),
}

impl StoreError {
    fn io(action: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |source| Self::Io { action, source }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    posts: Vec<PostRecord>,
}

struct StoreState {
    posts: Arc<Vec<PostRecord>>,
    registry: Arc<PostRegistry>,
}

pub struct BlogStore {
    path: PathBuf,
    layout: SiteLayout,
    state: RwLock<StoreState>,
}

impl BlogStore {
    /// Load the store, or start empty when the file does not exist yet.
    #[instrument(skip_all, fields(path = %layout.store_path().display()))]
    pub async fn open(layout: &SiteLayout) -> Result<Self, StoreError> {
        let path = layout.store_path();
        let posts = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<StoreFile>(&bytes)?.posts,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(StoreError::io("read")(e)),
        };
        info!(posts = posts.len(), "listing store loaded");

        let registry = PostRegistry::build(&posts, layout);
        Ok(Self {
            path,
            layout: layout.clone(),
            state: RwLock::new(StoreState {
                posts: Arc::new(posts),
                registry: Arc::new(registry),
            }),
        })
    }

    /// Snapshot of all records in insertion order.
    pub async fn posts(&self) -> Arc<Vec<PostRecord>> {
        self.state.read().await.posts.clone()
    }

    pub async fn registry(&self) -> Arc<PostRegistry> {
        self.state.read().await.registry.clone()
    }

    pub async fn find(&self, slug: &str) -> Option<PostRecord> {
        self.state
            .read()
            .await
            .posts
            .iter()
            .find(|p| p.slug == slug)
            .cloned()
    }

    pub async fn contains(&self, slug: &str) -> bool {
        self.state.read().await.registry.resolve(slug).is_some()
    }

    /// Take exclusive access for one append. Other appends wait; readers
    /// wait only while a commit is in flight.
    pub async fn begin_append(&self) -> AppendTx<'_> {
        AppendTx {
            store: self,
            guard: self.state.write().await,
        }
    }
}

pub struct AppendTx<'a> {
    store: &'a BlogStore,
    guard: RwLockWriteGuard<'a, StoreState>,
}

impl AppendTx<'_> {
    pub fn contains(&self, slug: &str) -> bool {
        self.guard.registry.resolve(slug).is_some()
    }

    /// Persist the store with `record` appended. The in-memory view changes
    /// only after the new file is in place.
    pub async fn append(mut self, record: PostRecord) -> Result<(), StoreError> {
        if self.contains(&record.slug) {
            return Err(StoreError::DuplicateSlug(record.slug));
        }

        let mut posts = self.guard.posts.as_ref().clone();
        posts.push(record);

        let file = StoreFile { posts };
        let bytes = serde_json::to_vec_pretty(&file)?;
        write_atomic(&self.store.path, &bytes).await?;

        let registry = PostRegistry::build(&file.posts, &self.store.layout);
        self.guard.posts = Arc::new(file.posts);
        self.guard.registry = Arc::new(registry);
        Ok(())
    }
}

async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(StoreError::io("create directory for"))?;
    }

    let tmp = path.with_extension(format!("json.{}.tmp", Uuid::new_v4().simple()));
    let result = async {
        let mut file = tokio::fs::File::create(&tmp)
            .await
            .map_err(StoreError::io("create temp file for"))?;
        file.write_all(bytes)
            .await
            .map_err(StoreError::io("write"))?;
        file.sync_all().await.map_err(StoreError::io("sync"))?;
        tokio::fs::rename(&tmp, path)
            .await
            .map_err(StoreError::io("replace"))
    }
    .await;

    if result.is_err() {
        let _ = tokio::fs::remove_file(&tmp).await;
    }
    result
}
