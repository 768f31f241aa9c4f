use axum::{
    Router,
    body::Body,
    extract::DefaultBodyLimit,
    http::Request,
    middleware::from_fn_with_state,
    routing::get,
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    app_state::AppState,
    auth, blog,
    dtos::ErrorResponse,
    enquiry, health,
    middleware::{RateLimit, canonical_host_middleware, rate_limit_middleware},
    site::{pages, sitemap, whatsapp},
};

/// Enquiries allowed per client IP per window.
const ENQUIRY_RATE_LIMIT: u32 = 5;
const ENQUIRY_RATE_WINDOW_SECS: i64 = 600;

#[derive(OpenApi)]
#[openapi(
    info(title = "Approvals site API", description = "Blog administration and enquiries"),
    components(schemas(ErrorResponse)),
    modifiers(&BearerAuth),
    tags(
        (name = "blog", description = "Blog posts"),
        (name = "enquiry", description = "Contact-form enquiries"),
        (name = "admin", description = "Admin authentication"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// The full application: JSON API, OpenAPI docs, public pages and assets.
pub fn app(state: AppState) -> Router {
    let layout = state.config.layout().clone();

    let enquiries = OpenApiRouter::new()
        .routes(routes!(enquiry::handlers::send_enquiry))
        .route_layer(from_fn_with_state(
            RateLimit::new(ENQUIRY_RATE_LIMIT, ENQUIRY_RATE_WINDOW_SECS),
            rate_limit_middleware,
        ));
    let uploads = OpenApiRouter::new()
        .routes(routes!(blog::handlers::create_blog))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes()));

    let (api, openapi) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(health::health_check))
        .routes(routes!(auth::handlers::login))
        .routes(routes!(blog::handlers::list_posts))
        .merge(enquiries)
        .merge(uploads)
        .split_for_parts();

    Router::new()
        .merge(api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/", get(pages::home))
        .route("/about", get(pages::about))
        .route("/contact", get(pages::contact))
        .route("/contact/whatsapp", get(whatsapp::whatsapp_redirect))
        .route("/faq", get(pages::faq))
        .route("/authorities", get(pages::authorities))
        .route("/blog", get(pages::blog_index))
        .route("/blog/{slug}", get(pages::blog_post))
        .route("/sitemap.xml", get(sitemap::sitemap))
        .route("/robots.txt", get(sitemap::robots))
        .nest_service("/assets", ServeDir::new(layout.public_dir.join("assets")))
        .route_service("/favicon.ico", ServeFile::new(layout.public_dir.join("favicon.ico")))
        .fallback(pages::not_found)
        .layer(from_fn_with_state(state.clone(), canonical_host_middleware))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("-");
                    tracing::info_span!(
                        "http",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id
                    )
                }))
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(state)
}
