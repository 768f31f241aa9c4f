use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::blog::model::PostRecord;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateBlogResponse {
    pub success: bool,
    pub message: String,
    pub slug: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostListResponse {
    pub posts: Vec<PostRecord>,
}

/// Multipart body of `POST /api/create-blog`, for the OpenAPI document only.
#[allow(dead_code)]
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CreateBlogForm {
    title: String,
    slug: String,
    category: Option<String>,
    author: Option<String>,
    excerpt: Option<String>,
    /// `"true"` switches to the manually supplied SEO fields.
    #[schema(rename = "manualSEO")]
    manual_seo: Option<String>,
    meta_title: Option<String>,
    meta_description: Option<String>,
    focus_keyword: Option<String>,
    /// Comma-separated.
    keywords: Option<String>,
    #[schema(value_type = String, format = Binary)]
    card_image: Vec<u8>,
    #[schema(value_type = String, format = Binary)]
    cover_image: Vec<u8>,
    /// `.pdf`, `.docx`, `.doc`, `.txt` or `.md`.
    #[schema(value_type = String, format = Binary)]
    content_file: Vec<u8>,
}
