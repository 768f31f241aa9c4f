//! All-or-nothing publication of a post's files.
//!
//! Images and the rendering unit are first written under a per-request
//! staging directory and verified by checksum. Publishing renames them into
//! place; if any rename (or the store append that follows) fails, whatever
//! was already published is removed again.

use std::{
    io,
    path::{Path, PathBuf},
};

use bytes::Bytes;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::{blog::errors::IngestError, config::SiteLayout};

/// A file received in a multipart field.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    /// Lowercased extension of the original name, `bin` when there is none
    /// or it is not plain alphanumerics.
    pub fn extension(&self) -> String {
        Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .filter(|e| {
                !e.is_empty() && e.len() <= 10 && e.chars().all(|c| c.is_ascii_alphanumeric())
            })
            .unwrap_or_else(|| "bin".to_string())
    }
}

#[derive(Debug)]
struct StagedFile {
    artifact: &'static str,
    staged: PathBuf,
    target: PathBuf,
    checksum: String,
}

/// Files for one post, written but not yet visible.
#[derive(Debug)]
pub struct StagedPost {
    dir: PathBuf,
    files: Vec<StagedFile>,
    card_image_name: String,
    cover_image_name: String,
}

impl StagedPost {
    #[instrument(skip_all, fields(slug = %slug))]
    pub async fn stage(
        layout: &SiteLayout,
        slug: &str,
        card: &UploadedFile,
        cover: &UploadedFile,
        unit_html: &str,
    ) -> Result<Self, IngestError> {
        let dir = layout.staging_dir().join(Uuid::new_v4().simple().to_string());
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(artifact_err("create", "staging directory"))?;

        let card_image_name = format!("{slug}-card.{}", card.extension());
        let cover_image_name = format!("{slug}-cover.{}", cover.extension());
        let mut staged = Self {
            dir,
            files: Vec::with_capacity(3),
            card_image_name,
            cover_image_name,
        };

        let entries: [(&'static str, String, PathBuf, &[u8]); 3] = [
            (
                "card image",
                staged.card_image_name.clone(),
                layout.assets_dir().join(&staged.card_image_name),
                &card.bytes[..],
            ),
            (
                "cover image",
                staged.cover_image_name.clone(),
                layout.assets_dir().join(&staged.cover_image_name),
                &cover.bytes[..],
            ),
            (
                "rendering unit",
                format!("{slug}.html"),
                layout.unit_path(slug),
                unit_html.as_bytes(),
            ),
        ];

        for (artifact, name, target, bytes) in entries {
            let path = staged.dir.join(&name);
            if let Err(e) = tokio::fs::write(&path, bytes).await {
                staged.discard().await;
                return Err(artifact_err("stage", artifact)(e));
            }
            staged.files.push(StagedFile {
                artifact,
                staged: path,
                target,
                checksum: checksum(bytes),
            });
        }

        debug!(dir = %staged.dir.display(), "post staged");
        Ok(staged)
    }

    pub fn card_image_name(&self) -> &str {
        &self.card_image_name
    }

    pub fn cover_image_name(&self) -> &str {
        &self.cover_image_name
    }

    /// Re-read every staged file and compare against what was written.
    pub async fn verify(&self) -> Result<(), IngestError> {
        for file in &self.files {
            let bytes = tokio::fs::read(&file.staged)
                .await
                .map_err(artifact_err("re-read", file.artifact))?;
            if checksum(&bytes) != file.checksum {
                return Err(IngestError::Verification(file.artifact));
            }
        }
        Ok(())
    }

    /// Move every staged file into place. On failure nothing stays
    /// published and the staging directory is gone.
    #[instrument(skip_all)]
    pub async fn publish(self) -> Result<PublishedFiles, IngestError> {
        let mut published = PublishedFiles::default();
        let mut failure = None;

        for file in &self.files {
            match publish_file(file).await {
                Ok(()) => published.paths.push(file.target.clone()),
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }

        remove_dir(&self.dir).await;
        if let Some(e) = failure {
            published.rollback().await;
            return Err(e);
        }
        Ok(published)
    }

    pub async fn discard(self) {
        remove_dir(&self.dir).await;
    }
}

async fn publish_file(file: &StagedFile) -> Result<(), IngestError> {
    if let Some(parent) = file.target.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(artifact_err("create directory for", file.artifact))?;
    }
    if tokio::fs::try_exists(&file.target).await.unwrap_or(false) {
        // No record owns this file (the slug was free), so it is a leftover.
        warn!(artifact = file.artifact, "replacing orphaned file");
    }

    match tokio::fs::rename(&file.staged, &file.target).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            tokio::fs::copy(&file.staged, &file.target)
                .await
                .map_err(artifact_err("publish", file.artifact))?;
            Ok(())
        }
        Err(e) => Err(artifact_err("publish", file.artifact)(e)),
    }
}

/// Files that are live on disk, kept so they can be withdrawn if the store
/// append fails.
#[derive(Debug, Default)]
pub struct PublishedFiles {
    paths: Vec<PathBuf>,
}

impl PublishedFiles {
    pub async fn rollback(self) {
        for path in self.paths {
            if let Err(e) = tokio::fs::remove_file(&path).await {
                warn!(error = %e, path = %path.display(), "failed to withdraw published file");
            }
        }
    }
}

async fn remove_dir(dir: &Path) {
    if let Err(e) = tokio::fs::remove_dir_all(dir).await
        && e.kind() != io::ErrorKind::NotFound
    {
        warn!(error = %e, dir = %dir.display(), "failed to clean staging directory");
    }
}

/// Hex md5, as kept in `PostRecord::content_checksum`.
pub fn checksum(bytes: &[u8]) -> String {
    format!("{:x}", md5::compute(bytes))
}

fn artifact_err(
    action: &'static str,
    artifact: &'static str,
) -> impl FnOnce(io::Error) -> IngestError {
    move |source| IngestError::Artifact {
        action,
        artifact,
        source,
    }
}
