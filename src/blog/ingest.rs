use std::sync::LazyLock;

use axum::extract::{Multipart, multipart::MultipartError};
use chrono::Utc;
use regex::Regex;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    blog::{
        errors::IngestError,
        formatter,
        model::PostRecord,
        seo::{SeoInput, derive_seo},
        staging::{StagedPost, UploadedFile, checksum},
        store::BlogStore,
    },
    config::Config,
    extractor,
};

static SLUG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("Failed to compile slug regex")
});

const DEFAULT_CATEGORY: &str = "General";
const DEFAULT_AUTHOR: &str = "Admin";
const ASSETS_URL_PREFIX: &str = "/assets/blog";

/// Raw multipart fields of a blog submission, before validation.
#[derive(Debug, Default)]
pub struct BlogSubmission {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub excerpt: Option<String>,
    pub manual_seo: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub focus_keyword: Option<String>,
    pub keywords: Option<String>,
    pub card_image: Option<UploadedFile>,
    pub cover_image: Option<UploadedFile>,
    pub content_file: Option<UploadedFile>,
}

/// A submission with every required field present and a well-formed slug.
#[derive(Debug)]
pub struct ValidSubmission {
    pub title: String,
    pub slug: String,
    pub category: String,
    pub author: String,
    pub excerpt: String,
    pub manual_seo: bool,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub focus_keyword: Option<String>,
    pub keywords: Option<String>,
    pub card_image: UploadedFile,
    pub cover_image: UploadedFile,
    pub content_file: UploadedFile,
}

fn multipart_err(err: MultipartError) -> IngestError {
    IngestError::Multipart {
        status: err.status(),
        message: err.body_text(),
    }
}

impl BlogSubmission {
    /// Buffer every field. Unknown fields are ignored; empty file parts count
    /// as absent.
    pub async fn from_multipart(multipart: &mut Multipart) -> Result<Self, IngestError> {
        let mut submission = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_err)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match name.as_str() {
                "cardImage" | "coverImage" | "contentFile" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let bytes = field.bytes().await.map_err(multipart_err)?;
                    let file = (!bytes.is_empty()).then_some(UploadedFile { file_name, bytes });
                    match name.as_str() {
                        "cardImage" => submission.card_image = file,
                        "coverImage" => submission.cover_image = file,
                        _ => submission.content_file = file,
                    }
                }
                _ => {
                    let value = field.text().await.map_err(multipart_err)?;
                    let slot = match name.as_str() {
                        "title" => &mut submission.title,
                        "slug" => &mut submission.slug,
                        "category" => &mut submission.category,
                        "author" => &mut submission.author,
                        "excerpt" => &mut submission.excerpt,
                        "manualSEO" => &mut submission.manual_seo,
                        "metaTitle" => &mut submission.meta_title,
                        "metaDescription" => &mut submission.meta_description,
                        "focusKeyword" => &mut submission.focus_keyword,
                        "keywords" => &mut submission.keywords,
                        _ => continue,
                    };
                    *slot = Some(value);
                }
            }
        }

        Ok(submission)
    }

    pub fn validate(self) -> Result<ValidSubmission, IngestError> {
        let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        let (Some(title), Some(slug), Some(card_image), Some(cover_image), Some(content_file)) = (
            present(self.title),
            present(self.slug),
            self.card_image,
            self.cover_image,
            self.content_file,
        ) else {
            return Err(IngestError::MissingFields);
        };

        let slug = slug.trim().to_string();
        if !SLUG_REGEX.is_match(&slug) {
            return Err(IngestError::InvalidSlug(slug));
        }

        Ok(ValidSubmission {
            title,
            slug,
            category: present(self.category)
                .map(|c| c.trim().to_string())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            author: present(self.author)
                .map(|a| a.trim().to_string())
                .unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            excerpt: self.excerpt.unwrap_or_default(),
            manual_seo: self.manual_seo.as_deref() == Some("true"),
            meta_title: self.meta_title,
            meta_description: self.meta_description,
            focus_keyword: self.focus_keyword,
            keywords: self.keywords,
            card_image,
            cover_image,
            content_file,
        })
    }
}

impl ValidSubmission {
    fn seo_input(&self) -> SeoInput<'_> {
        SeoInput {
            manual: self.manual_seo,
            title: &self.title,
            excerpt: &self.excerpt,
            meta_title: self.meta_title.as_deref(),
            meta_description: self.meta_description.as_deref(),
            focus_keyword: self.focus_keyword.as_deref(),
            keywords: self.keywords.as_deref(),
        }
    }
}

/// Create a post: extract, render, stage, then publish files and append the
/// listing record as one unit. Nothing is written for a slug that is taken.
#[instrument(skip_all, fields(slug = %post.slug))]
pub async fn ingest(
    store: &BlogStore,
    config: &Config,
    post: ValidSubmission,
) -> Result<PostRecord, IngestError> {
    if store.contains(&post.slug).await {
        return Err(IngestError::DuplicateSlug(post.slug));
    }

    let document = extractor::extract(
        &post.content_file.file_name,
        post.content_file.bytes.clone(),
    )
    .await?;
    let seo = derive_seo(&post.seo_input(), config.site_name());
    let unit_html = formatter::format_document(&document.text, document.language.as_ref());

    let staged = StagedPost::stage(
        config.layout(),
        &post.slug,
        &post.card_image,
        &post.cover_image,
        &unit_html,
    )
    .await?;
    if let Err(e) = staged.verify().await {
        staged.discard().await;
        return Err(e);
    }

    let record = PostRecord {
        id: Uuid::now_v7(),
        card_image: format!("{ASSETS_URL_PREFIX}/{}", staged.card_image_name()),
        cover_image: format!("{ASSETS_URL_PREFIX}/{}", staged.cover_image_name()),
        title: post.title,
        slug: post.slug,
        category: post.category,
        author: post.author,
        date: Utc::now().date_naive(),
        excerpt: post.excerpt,
        seo,
        language: document.language.map(|l| l.code),
        content_checksum: checksum(unit_html.as_bytes()),
    };

    let tx = store.begin_append().await;
    // A concurrent request may have taken the slug since the first check.
    if tx.contains(&record.slug) {
        staged.discard().await;
        return Err(IngestError::DuplicateSlug(record.slug));
    }
    let published = staged.publish().await?;
    if let Err(e) = tx.append(record.clone()).await {
        published.rollback().await;
        return Err(e.into());
    }

    info!(
        id = %record.id,
        kind = ?document.kind,
        language = record.language.as_deref().unwrap_or("unknown"),
        "blog post published"
    );
    Ok(record)
}
