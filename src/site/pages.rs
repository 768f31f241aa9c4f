use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, PreEscaped, html};
use tracing::{error, instrument};

use crate::{
    app_state::AppState,
    blog::{PostRecord, model::sort_newest_first},
    site::{
        content::{AUTHORITIES, FAQS, SERVICES},
        layout::page,
        meta::PageMeta,
    },
};

pub async fn home(State(state): State<AppState>) -> Markup {
    let config = &state.config;
    let mut posts = state.store.posts().await.as_ref().clone();
    sort_newest_first(&mut posts);

    page(
        config,
        &PageMeta::for_route("/", config),
        html! {
            section.hero {
                h1 { "Building approvals in Dubai, handled end to end" }
                p { "Permits, NOCs and completion certificates from every Dubai authority." }
                a.button href="/contact" { "Get a quote" }
            }
            section.services {
                h2 { "Services" }
                ul {
                    @for service in SERVICES {
                        li {
                            h3 { (service.name) }
                            p { (service.summary) }
                        }
                    }
                }
            }
            @if !posts.is_empty() {
                section.latest-posts {
                    h2 { "Latest from the blog" }
                    (post_cards(posts.iter().take(3)))
                }
            }
        },
    )
}

pub async fn about(State(state): State<AppState>) -> Markup {
    let config = &state.config;
    page(
        config,
        &PageMeta::for_route("/about", config),
        html! {
            h1 { "About " (config.site_name()) }
            p {
                "We are an approvals consultancy for owners, contractors and fit-out companies. "
                "Our engineers prepare submissions, follow them through each authority and close out comments until the permit is issued."
            }
            h2 { "What we cover" }
            ul {
                @for service in SERVICES {
                    li { (service.name) }
                }
            }
        },
    )
}

pub async fn contact(State(state): State<AppState>) -> Markup {
    let config = &state.config;
    page(
        config,
        &PageMeta::for_route("/contact", config),
        html! {
            h1 { "Contact us" }
            p { "Send us the details and we will continue the conversation on WhatsApp." }
            form.contact-form action="/contact/whatsapp" method="get" {
                label { "Name" input type="text" name="name" required; }
                label { "Phone" input type="tel" name="phone" required; }
                label {
                    "Service"
                    select name="service" required {
                        @for service in SERVICES {
                            option value=(service.name) { (service.name) }
                        }
                    }
                }
                label { "Message" textarea name="message" rows="4" {} }
                button type="submit" { "Send on WhatsApp" }
            }
        },
    )
}

pub async fn faq(State(state): State<AppState>) -> Markup {
    let config = &state.config;
    page(
        config,
        &PageMeta::for_route("/faq", config),
        html! {
            h1 { "Frequently asked questions" }
            @for entry in FAQS {
                details.faq {
                    summary { (entry.question) }
                    p { (entry.answer) }
                }
            }
        },
    )
}

pub async fn authorities(State(state): State<AppState>) -> Markup {
    let config = &state.config;
    page(
        config,
        &PageMeta::for_route("/authorities", config),
        html! {
            h1 { "Authorities we work with" }
            ul.authorities {
                @for authority in AUTHORITIES {
                    li {
                        h2 { (authority.name) " (" (authority.abbreviation) ")" }
                        p { (authority.scope) }
                    }
                }
            }
        },
    )
}

pub async fn blog_index(State(state): State<AppState>) -> Markup {
    let config = &state.config;
    let mut posts = state.store.posts().await.as_ref().clone();
    sort_newest_first(&mut posts);

    page(
        config,
        &PageMeta::for_route("/blog", config),
        html! {
            h1 { "Blog" }
            @if posts.is_empty() {
                p { "No posts yet." }
            } @else {
                (post_cards(posts.iter()))
            }
        },
    )
}

#[instrument(skip(state))]
pub async fn blog_post(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let config = &state.config;
    let registry = state.store.registry().await;
    let (Some(renderer), Some(post)) = (registry.resolve(&slug), state.store.find(&slug).await)
    else {
        return not_found(State(state)).await.into_response();
    };

    let unit = match renderer.load().await {
        Ok(unit) => unit,
        Err(e) => {
            error!(error = %e, "rendering unit unreadable");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                page(
                    config,
                    &PageMeta::for_post(&post, config),
                    html! {
                        h1 { (post.title) }
                        p { "This article is temporarily unavailable." }
                    },
                ),
            )
                .into_response();
        }
    };

    page(
        config,
        &PageMeta::for_post(&post, config),
        html! {
            div.post-header {
                img.cover src=(post.cover_image) alt=(post.title);
                p.post-meta {
                    span.category { (post.category) }
                    " · "
                    time datetime=(post.date.to_string()) { (post.display_date()) }
                    " · "
                    span.author { (post.author) }
                }
                h1 { (post.title) }
            }
            // Generated and sanitized at ingestion time.
            (PreEscaped(unit))
            p { a href="/blog" { "← All posts" } }
        },
    )
    .into_response()
}

pub async fn not_found(State(state): State<AppState>) -> (StatusCode, Markup) {
    let config = &state.config;
    (
        StatusCode::NOT_FOUND,
        page(
            config,
            &PageMeta::not_found(config),
            html! {
                h1 { "Page not found" }
                p { a href="/" { "Back to the home page" } }
            },
        ),
    )
}

fn post_cards<'a>(posts: impl Iterator<Item = &'a PostRecord>) -> Markup {
    html! {
        div.post-cards {
            @for post in posts {
                article.post-card {
                    a href=(post.href()) {
                        img src=(post.card_image) alt=(post.title) loading="lazy";
                        h3 { (post.title) }
                    }
                    p.post-meta {
                        span.category { (post.category) }
                        " · "
                        time datetime=(post.date.to_string()) { (post.display_date()) }
                    }
                    @if !post.excerpt.is_empty() {
                        p { (post.excerpt) }
                    }
                }
            }
        }
    }
}
