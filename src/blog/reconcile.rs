//! Consistency check between the listing store and the files on disk.

use std::{
    collections::HashSet,
    io,
    path::{Path, PathBuf},
};

use tracing::{info, warn};

use crate::{
    blog::{model::PostRecord, staging::checksum},
    config::SiteLayout,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    MissingUnit { slug: String },
    MissingImage { slug: String, path: String },
    ChecksumMismatch { slug: String },
    OrphanFile { path: PathBuf },
    StagingLeftover { path: PathBuf },
}

impl Issue {
    /// Orphans and staging leftovers can be deleted; record problems need a
    /// human.
    pub fn is_prunable(&self) -> bool {
        matches!(self, Self::OrphanFile { .. } | Self::StagingLeftover { .. })
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingUnit { slug } => write!(f, "{slug}: rendering unit missing"),
            Self::MissingImage { slug, path } => write!(f, "{slug}: image {path} missing"),
            Self::ChecksumMismatch { slug } => {
                write!(f, "{slug}: rendering unit changed since creation")
            }
            Self::OrphanFile { path } => write!(f, "orphan file {}", path.display()),
            Self::StagingLeftover { path } => write!(f, "staging leftover {}", path.display()),
        }
    }
}

pub async fn check(records: &[PostRecord], layout: &SiteLayout) -> io::Result<Vec<Issue>> {
    let mut issues = Vec::new();
    let mut expected_units = HashSet::new();
    let mut expected_images = HashSet::new();

    for record in records {
        let unit_path = layout.unit_path(&record.slug);
        match tokio::fs::read(&unit_path).await {
            Ok(bytes) if checksum(&bytes) != record.content_checksum => {
                issues.push(Issue::ChecksumMismatch {
                    slug: record.slug.clone(),
                });
            }
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => issues.push(Issue::MissingUnit {
                slug: record.slug.clone(),
            }),
            Err(e) => return Err(e),
        }
        expected_units.insert(unit_path);

        for image in [&record.card_image, &record.cover_image] {
            let Some(name) = image.strip_prefix("/assets/blog/") else {
                continue;
            };
            let path = layout.assets_dir().join(name);
            if !tokio::fs::try_exists(&path).await? {
                issues.push(Issue::MissingImage {
                    slug: record.slug.clone(),
                    path: image.clone(),
                });
            }
            expected_images.insert(path);
        }
    }

    for path in list_files(&layout.units_dir()).await? {
        if !expected_units.contains(&path) {
            issues.push(Issue::OrphanFile { path });
        }
    }
    for path in list_files(&layout.assets_dir()).await? {
        if !expected_images.contains(&path) {
            issues.push(Issue::OrphanFile { path });
        }
    }
    for path in list_entries(&layout.staging_dir()).await? {
        issues.push(Issue::StagingLeftover { path });
    }

    Ok(issues)
}

/// Delete every prunable issue's file. Returns how many were removed.
pub async fn prune(issues: &[Issue]) -> usize {
    let mut removed = 0;
    for issue in issues.iter().filter(|i| i.is_prunable()) {
        let result = match issue {
            Issue::OrphanFile { path } => tokio::fs::remove_file(path).await,
            Issue::StagingLeftover { path } if path.is_dir() => {
                tokio::fs::remove_dir_all(path).await
            }
            Issue::StagingLeftover { path } => tokio::fs::remove_file(path).await,
            _ => continue,
        };
        match result {
            Ok(()) => {
                info!(%issue, "pruned");
                removed += 1;
            }
            Err(e) => warn!(%issue, error = %e, "failed to prune"),
        }
    }
    removed
}

async fn list_entries(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };
    let mut paths = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}

async fn list_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in list_entries(dir).await? {
        if tokio::fs::metadata(&path).await?.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blog::model::sample_record;
    use tempfile::tempdir;

    fn write(path: &Path, bytes: &[u8]) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, bytes).unwrap();
    }

    #[tokio::test]
    async fn test_consistent_site_has_no_issues() {
        let dir = tempdir().unwrap();
        let layout = SiteLayout::new(dir.path().join("content"), dir.path().join("public"));
        let mut record = sample_record("ok");
        record.content_checksum = checksum(b"<article></article>");
        write(&layout.unit_path("ok"), b"<article></article>");
        write(&layout.assets_dir().join("ok-card.jpg"), b"c");
        write(&layout.assets_dir().join("ok-cover.jpg"), b"c");

        assert!(check(&[record], &layout).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reports_and_prunes() {
        let dir = tempdir().unwrap();
        let layout = SiteLayout::new(dir.path().join("content"), dir.path().join("public"));
        let record = sample_record("broken");
        write(&layout.unit_path("broken"), b"edited by hand");
        write(&layout.assets_dir().join("broken-card.jpg"), b"c");
        write(&layout.unit_path("stray"), b"<article></article>");
        write(&layout.staging_dir().join("abc").join("x-card.png"), b"c");

        let issues = check(&[record], &layout).await.unwrap();
        assert!(issues.contains(&Issue::ChecksumMismatch {
            slug: "broken".to_string()
        }));
        assert!(issues.contains(&Issue::MissingImage {
            slug: "broken".to_string(),
            path: "/assets/blog/broken-cover.jpg".to_string()
        }));
        assert!(issues.contains(&Issue::OrphanFile {
            path: layout.unit_path("stray")
        }));
        assert!(issues.contains(&Issue::StagingLeftover {
            path: layout.staging_dir().join("abc")
        }));

        let prunable: Vec<_> = issues.iter().filter(|i| i.is_prunable()).collect();
        assert_eq!(prunable.len(), 2);
        assert_eq!(prune(&issues).await, 2);
        assert!(!layout.unit_path("stray").exists());
        assert!(!layout.staging_dir().join("abc").exists());
        assert!(layout.unit_path("broken").exists());
    }
}
