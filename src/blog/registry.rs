use std::{collections::HashMap, io, path::PathBuf};

use tracing::warn;

use crate::{blog::model::PostRecord, config::SiteLayout};

/// Where the rendering unit for one slug lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererRef {
    pub slug: String,
    pub unit_path: PathBuf,
}

impl RendererRef {
    pub async fn load(&self) -> io::Result<String> {
        tokio::fs::read_to_string(&self.unit_path).await
    }
}

/// Slug → rendering unit dispatch table. Always rebuilt from the listing
/// store, never edited on its own, so it cannot drift from the records.
#[derive(Debug, Clone, Default)]
pub struct PostRegistry {
    entries: HashMap<String, RendererRef>,
}

impl PostRegistry {
    pub fn build(records: &[PostRecord], layout: &SiteLayout) -> Self {
        let mut entries = HashMap::with_capacity(records.len());
        for record in records {
            if entries.contains_key(&record.slug) {
                warn!(slug = %record.slug, "duplicate slug in listing store; keeping first");
                continue;
            }
            entries.insert(
                record.slug.clone(),
                RendererRef {
                    slug: record.slug.clone(),
                    unit_path: layout.unit_path(&record.slug),
                },
            );
        }
        Self { entries }
    }

    pub fn resolve(&self, slug: &str) -> Option<&RendererRef> {
        self.entries.get(slug)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
