use axum::{
    Json,
    extract::{Multipart, State},
};
use tracing::{info, instrument};

use crate::{
    app_state::AppState,
    auth::AuthenticatedAdmin,
    blog::{
        dtos::{CreateBlogForm, CreateBlogResponse, PostListResponse},
        errors::IngestError,
        ingest::{BlogSubmission, ingest},
        model::sort_newest_first,
    },
    dtos::ErrorResponse,
};

#[utoipa::path(
    post,
    path = "/api/create-blog",
    tag = "blog",
    request_body(content = CreateBlogForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Post created", body = CreateBlogResponse),
        (status = 400, description = "Missing required fields or invalid slug", body = ErrorResponse),
        (status = 401, description = "Missing or invalid admin token", body = ErrorResponse),
        (status = 409, description = "Slug already taken", body = ErrorResponse),
        (status = 415, description = "Unsupported content document", body = ErrorResponse),
        (status = 422, description = "Content document has no text", body = ErrorResponse),
        (status = 500, description = "Post could not be created", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip_all, fields(admin = %admin.username))]
pub async fn create_blog(
    admin: AuthenticatedAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<CreateBlogResponse>, IngestError> {
    let submission = BlogSubmission::from_multipart(&mut multipart)
        .await?
        .validate()?;
    info!(slug = %submission.slug, "blog submission accepted");

    let record = ingest(&state.store, &state.config, submission).await?;

    Ok(Json(CreateBlogResponse {
        success: true,
        message: "Blog post created successfully".to_string(),
        slug: record.slug,
    }))
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "blog",
    responses(
        (status = 200, description = "All posts, newest first", body = PostListResponse)
    )
)]
pub async fn list_posts(State(state): State<AppState>) -> Json<PostListResponse> {
    let mut posts = state.store.posts().await.as_ref().clone();
    sort_newest_first(&mut posts);
    Json(PostListResponse { posts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{app_state::test_support::test_state, blog::model::sample_record};
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode},
        routing::get,
    };
    use chrono::NaiveDate;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_list_posts_newest_first() {
        let (state, _dir) = test_state().await;
        let mut older = sample_record("older");
        older.date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        for record in [older, sample_record("newer")] {
            state
                .store
                .begin_append()
                .await
                .append(record)
                .await
                .unwrap();
        }

        let app = Router::new()
            .route("/api/posts", get(list_posts))
            .with_state(state);
        let response = app
            .oneshot(Request::builder().uri("/api/posts").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let list: PostListResponse = serde_json::from_slice(&body).unwrap();
        let slugs: Vec<_> = list.posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["newer", "older"]);
    }
}
