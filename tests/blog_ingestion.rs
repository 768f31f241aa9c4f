mod helpers;

use std::io::Write;

use axum::http::StatusCode;
use tower::ServiceExt;

use helpers::{
    ADMIN_PASSWORD, Part, TestSite, admin_token, create_blog_request, json_body, text_body,
};

const PDF: &[u8] = include_bytes!("fixtures/permits.pdf");

fn full_submission<'a>(slug: &'a str, card: &'a [u8]) -> Vec<Part<'a>> {
    vec![
        Part::Text("title", "Building Permits in Dubai"),
        Part::Text("slug", slug),
        Part::Text("category", "Permits"),
        Part::Text("excerpt", "What a mainland building permit involves."),
        Part::File("cardImage", "card.jpg", card),
        Part::File("coverImage", "cover.png", b"cover-bytes"),
        Part::File("contentFile", "permits.pdf", PDF),
    ]
}

fn docx(paragraphs: &[&str]) -> Vec<u8> {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#,
    );
    for p in paragraphs {
        xml.push_str(&format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"));
    }
    xml.push_str("</w:body></w:document>");

    let mut buf = std::io::Cursor::new(Vec::new());
    let mut zip = zip::ZipWriter::new(&mut buf);
    zip.start_file(
        "word/document.xml",
        zip::write::SimpleFileOptions::default(),
    )
    .unwrap();
    zip.write_all(xml.as_bytes()).unwrap();
    zip.finish().unwrap();
    buf.into_inner()
}

#[tokio::test]
async fn test_missing_required_fields_write_nothing() {
    let token = admin_token();
    let complete = full_submission("missing", b"card");
    let names = ["title", "slug", "cardImage", "coverImage", "contentFile"];

    for missing in names {
        let site = TestSite::new().await;
        let parts: Vec<_> = complete
            .iter()
            .copied()
            .filter(|p| match p {
                Part::Text(name, _) | Part::File(name, _, _) => *name != missing,
            })
            .collect();

        let response = site
            .router
            .clone()
            .oneshot(create_blog_request(&parts, Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "without {missing}");
        assert_eq!(json_body(response).await["error"], "Missing required fields");
        assert!(site.files().is_empty(), "without {missing}: {:?}", site.files());
    }
}

#[tokio::test]
async fn test_valid_pdf_submission_publishes_post() {
    let site = TestSite::new().await;

    let response = site
        .router
        .clone()
        .oneshot(create_blog_request(
            &full_submission("mainland-permits", b"card"),
            Some(&admin_token()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Blog post created successfully");
    assert_eq!(body["slug"], "mainland-permits");

    let assets = site.layout.assets_dir();
    assert!(assets.join("mainland-permits-card.jpg").exists());
    assert!(assets.join("mainland-permits-cover.png").exists());
    let unit = std::fs::read_to_string(site.layout.unit_path("mainland-permits")).unwrap();
    assert!(unit.contains("Dubai Municipality issues building permits"));

    let posts = site.state.store.posts().await;
    assert_eq!(posts.iter().filter(|p| p.slug == "mainland-permits").count(), 1);
    let registry = site.state.store.registry().await;
    assert_eq!(registry.len(), 1);
    assert!(registry.resolve("mainland-permits").is_some());

    let record = &posts[0];
    assert_eq!(record.category, "Permits");
    assert_eq!(record.author, "Admin");
    assert_eq!(record.card_image, "/assets/blog/mainland-permits-card.jpg");
    assert_eq!(record.seo.meta_title, "Building Permits in Dubai | Dubai Approvals");

    // nothing left in staging
    assert!(!site.files().iter().any(|f| f.contains(".staging")));

    let page = site
        .router
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .uri("/blog/mainland-permits")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(page.status(), StatusCode::OK);
    let html = text_body(page).await;
    assert!(html.contains("<article class=\"blog-content\""));
    assert!(html.contains("Building Permits in Dubai"));
}

#[tokio::test]
async fn test_resubmitting_slug_conflicts_and_keeps_images() {
    let site = TestSite::new().await;
    let token = admin_token();

    let first = site
        .router
        .clone()
        .oneshot(create_blog_request(
            &full_submission("repeat", b"original"),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = site
        .router
        .clone()
        .oneshot(create_blog_request(
            &full_submission("repeat", b"replacement"),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);

    assert_eq!(
        std::fs::read(site.layout.assets_dir().join("repeat-card.jpg")).unwrap(),
        b"original"
    );
    assert_eq!(site.state.store.posts().await.len(), 1);
    assert_eq!(site.state.store.registry().await.len(), 1);
}

#[tokio::test]
async fn test_manual_seo_blank_meta_title_falls_back_to_title() {
    let site = TestSite::new().await;
    let mut parts = full_submission("manual-seo", b"card");
    parts.extend([
        Part::Text("manualSEO", "true"),
        Part::Text("metaTitle", ""),
        Part::Text("metaDescription", "Custom description"),
        Part::Text("keywords", "permits, dubai municipality"),
    ]);

    let response = site
        .router
        .clone()
        .oneshot(create_blog_request(&parts, Some(&admin_token())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let record = site.state.store.find("manual-seo").await.unwrap();
    assert_eq!(record.seo.meta_title, "Building Permits in Dubai");
    assert_eq!(record.seo.meta_description, "Custom description");
    assert_eq!(record.seo.keywords, vec!["permits", "dubai municipality"]);
}

#[tokio::test]
async fn test_docx_submission_renders_headings_and_paragraphs() {
    let site = TestSite::new().await;
    let document = docx(&[
        "Civil Defence Approval",
        "Every fit-out needs a fire and life safety review.",
    ]);
    let parts = vec![
        Part::Text("title", "Civil Defence Approval"),
        Part::Text("slug", "dcd-approval"),
        Part::File("cardImage", "card.webp", b"card"),
        Part::File("coverImage", "cover.webp", b"cover"),
        Part::File("contentFile", "dcd.docx", &document),
    ];

    let response = site
        .router
        .clone()
        .oneshot(create_blog_request(&parts, Some(&admin_token())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let unit = std::fs::read_to_string(site.layout.unit_path("dcd-approval")).unwrap();
    assert!(unit.contains("<h2>Civil Defence Approval</h2>"));
    assert!(unit.contains("<p>Every fit-out needs a fire and life safety review.</p>"));
}

#[tokio::test]
async fn test_unsupported_document_is_415() {
    let site = TestSite::new().await;
    let parts = vec![
        Part::Text("title", "Slides"),
        Part::Text("slug", "slides"),
        Part::File("cardImage", "card.jpg", b"card"),
        Part::File("coverImage", "cover.jpg", b"cover"),
        Part::File("contentFile", "deck.pptx", b"PK\x03\x04"),
    ];

    let response = site
        .router
        .clone()
        .oneshot(create_blog_request(&parts, Some(&admin_token())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(site.files().is_empty());
}

#[tokio::test]
async fn test_invalid_slug_is_400() {
    let site = TestSite::new().await;
    let mut parts = full_submission("Not A Slug", b"card");
    parts.retain(|p| !matches!(p, Part::Text("category", _)));

    let response = site
        .router
        .clone()
        .oneshot(create_blog_request(&parts, Some(&admin_token())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(site.files().is_empty());
}

#[tokio::test]
async fn test_requires_admin_token() {
    let site = TestSite::new().await;

    let response = site
        .router
        .clone()
        .oneshot(create_blog_request(&full_submission("anon", b"card"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = site
        .router
        .clone()
        .oneshot(create_blog_request(
            &full_submission("anon", b"card"),
            Some("not-a-jwt"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(site.files().is_empty());
}

#[tokio::test]
async fn test_publishing_disabled_without_admin_password() {
    let site = TestSite::without_admin().await;

    // a token signed with the development secret is not enough
    let response = site
        .router
        .clone()
        .oneshot(create_blog_request(
            &full_submission("forged", b"card"),
            Some(&admin_token()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json_body(response).await["error"], "Admin login is not configured");
    assert!(site.state.store.posts().await.is_empty());
    assert!(site.files().is_empty());
}

#[tokio::test]
async fn test_login_token_publishes_post() {
    let site = TestSite::new().await;

    let login = site
        .router
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .method("POST")
                .uri("/api/admin/login")
                .header("content-type", "application/json")
                .body(axum::body::Body::from(
                    serde_json::json!({ "username": "admin", "password": ADMIN_PASSWORD })
                        .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(login.status(), StatusCode::OK);
    let token = json_body(login).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = site
        .router
        .clone()
        .oneshot(create_blog_request(
            &full_submission("via-login", b"card"),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(site.state.store.find("via-login").await.is_some());
}
