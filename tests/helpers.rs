#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, header},
};
use serde_json::Value;
use tempfile::TempDir;

use approvals_site::{
    AppState, app,
    auth::jwt::JwtService,
    config::{Config, SiteLayout},
    enquiry::{MailError, Mailer, compose::ComposedEmail},
    passwords::Passwords,
};

pub const JWT_SECRET: &str = "dev-secret-change-me";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";
pub const BOUNDARY: &str = "----approvals-test-boundary";

/// Keeps every email it is asked to send.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<ComposedEmail>>,
    pub fail: bool,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: ComposedEmail) -> Result<(), MailError> {
        if self.fail {
            return Err(MailError::NoRecipient);
        }
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

pub struct TestSite {
    pub router: Router,
    pub state: AppState,
    pub mailer: Arc<RecordingMailer>,
    pub layout: SiteLayout,
    _dir: TempDir,
}

impl TestSite {
    /// A site with an admin account whose password is `ADMIN_PASSWORD`.
    pub async fn new() -> Self {
        Self::with(|config| config, RecordingMailer::default()).await
    }

    pub async fn with(customize: impl FnOnce(Config) -> Config, mailer: RecordingMailer) -> Self {
        let hash = Passwords::new(1024, 1, 1)
            .unwrap()
            .hash(ADMIN_PASSWORD)
            .unwrap();
        Self::build(Some(hash), customize, mailer).await
    }

    /// A site deployed without `ADMIN_PASSWORD_HASH`.
    pub async fn without_admin() -> Self {
        Self::build(None, |config| config, RecordingMailer::default()).await
    }

    async fn build(
        admin_hash: Option<String>,
        customize: impl FnOnce(Config) -> Config,
        mailer: RecordingMailer,
    ) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let layout = SiteLayout::new(dir.path().join("content"), dir.path().join("public"));
        let mut config = Config::for_layout(layout.clone());
        if let Some(hash) = admin_hash {
            config = config.with_admin_password_hash(hash);
        }
        let config = customize(config);
        let mailer = Arc::new(mailer);
        let state = AppState::new(config, mailer.clone()).await.unwrap();
        Self {
            router: app(state.clone()),
            state,
            mailer,
            layout,
            _dir: dir,
        }
    }

    /// Every regular file under the temp root, relative to it.
    pub fn files(&self) -> Vec<String> {
        fn walk(dir: &std::path::Path, root: &std::path::Path, out: &mut Vec<String>) {
            let Ok(entries) = std::fs::read_dir(dir) else {
                return;
            };
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_dir() {
                    walk(&path, root, out);
                } else {
                    out.push(path.strip_prefix(root).unwrap().display().to_string());
                }
            }
        }
        let mut out = Vec::new();
        walk(self._dir.path(), self._dir.path(), &mut out);
        out.sort();
        out
    }
}

pub fn admin_token() -> String {
    JwtService::new(JWT_SECRET)
        .issue_admin_token("admin")
        .unwrap()
}

#[derive(Clone, Copy)]
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, file_name, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn create_blog_request(parts: &[Part<'_>], token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/create-blog")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(multipart_body(parts))).unwrap()
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn text_body(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
