use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use tracing::error;

use crate::{app_state::AppState, config::Config, site::meta::STATIC_ROUTES};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

pub async fn sitemap(State(state): State<AppState>) -> Response {
    let posts = state.store.posts().await;
    let entries = posts
        .iter()
        .map(|p| (p.href(), Some(p.date.to_string())));
    match render_sitemap(&state.config, entries) {
        Ok(body) => (
            [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "failed to render sitemap");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn robots(State(state): State<AppState>) -> impl IntoResponse {
    let body = format!(
        "User-agent: *\nAllow: /\nDisallow: /api/\n\nSitemap: {}\n",
        state.config.absolute_url("/sitemap.xml")
    );
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body)
}

/// Static routes first, then every post with its publication date.
pub fn render_sitemap(
    config: &Config,
    posts: impl Iterator<Item = (String, Option<String>)>,
) -> Result<String, quick_xml::Error> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Text(BytesText::new("\n")))?;
    writer.write_event(Event::Start(
        BytesStart::new("urlset").with_attributes([("xmlns", SITEMAP_NS)]),
    ))?;

    let statics = STATIC_ROUTES.iter().map(|r| (r.path.to_string(), None));
    for (path, lastmod) in statics.chain(posts) {
        writer.write_event(Event::Text(BytesText::new("\n  ")))?;
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        text_element(&mut writer, "loc", &config.absolute_url(&path))?;
        if let Some(date) = lastmod {
            text_element(&mut writer, "lastmod", &date)?;
        }
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }

    writer.write_event(Event::Text(BytesText::new("\n")))?;
    writer.write_event(Event::End(BytesEnd::new("urlset")))?;
    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}

fn text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    text: &str,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
