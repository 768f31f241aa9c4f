use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One entry of the listing store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    /// UUID v7, so ids sort by creation time.
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub category: String,
    pub author: String,
    pub date: NaiveDate,
    pub excerpt: String,
    /// Public path, e.g. `/assets/blog/<slug>-card.jpg`.
    pub card_image: String,
    pub cover_image: String,
    pub seo: SeoMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// md5 of the rendering unit as written at creation time.
    pub content_checksum: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeoMeta {
    pub meta_title: String,
    pub meta_description: String,
    pub focus_keyword: String,
    pub keywords: Vec<String>,
}

impl PostRecord {
    pub fn href(&self) -> String {
        format!("/blog/{}", self.slug)
    }

    /// Human date as shown on cards, e.g. "October 18, 2026".
    pub fn display_date(&self) -> String {
        self.date.format("%B %-d, %Y").to_string()
    }
}

/// Newest date first. Ids are v7, so posts from the same day keep reverse
/// creation order.
pub fn sort_newest_first(posts: &mut [PostRecord]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
}

#[cfg(test)]
pub(crate) fn sample_record(slug: &str) -> PostRecord {
    PostRecord {
        id: Uuid::now_v7(),
        title: format!("Post {slug}"),
        slug: slug.to_string(),
        category: "General".to_string(),
        author: "Admin".to_string(),
        date: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
        excerpt: "Short summary.".to_string(),
        card_image: format!("/assets/blog/{slug}-card.jpg"),
        cover_image: format!("/assets/blog/{slug}-cover.jpg"),
        seo: SeoMeta {
            meta_title: format!("Post {slug}"),
            meta_description: "Short summary.".to_string(),
            focus_keyword: "post".to_string(),
            keywords: vec!["post".to_string()],
        },
        language: Some("en".to_string()),
        content_checksum: "0".repeat(32),
    }
}
