//! Per-route SEO metadata.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::{blog::PostRecord, config::Config};

/// Static entry of the route table.
#[derive(Debug, Clone, Copy)]
pub struct RouteMeta {
    pub path: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub keywords: &'static [&'static str],
}

pub const STATIC_ROUTES: &[RouteMeta] = &[
    RouteMeta {
        path: "/",
        title: "Building Approvals in Dubai",
        description: "Building permits, fit-out and authority approvals across Dubai, handled end to end.",
        keywords: &["dubai approvals", "building permit dubai", "fit-out approval"],
    },
    RouteMeta {
        path: "/about",
        title: "About Us",
        description: "An approvals consultancy working with every major Dubai authority and master developer.",
        keywords: &["approvals consultant dubai", "engineering consultancy"],
    },
    RouteMeta {
        path: "/contact",
        title: "Contact Us",
        description: "Tell us about your project and get a response from an approvals engineer.",
        keywords: &["contact approvals consultant", "dubai permit enquiry"],
    },
    RouteMeta {
        path: "/faq",
        title: "Frequently Asked Questions",
        description: "Timelines, documents and authorities for building approvals in Dubai.",
        keywords: &["dubai approval faq", "fit-out approval time"],
    },
    RouteMeta {
        path: "/authorities",
        title: "Dubai Authorities",
        description: "The authorities and master developers we obtain approvals from.",
        keywords: &["dubai municipality", "civil defence", "dewa", "trakhees", "dda"],
    },
    RouteMeta {
        path: "/blog",
        title: "Blog",
        description: "Guides to permits, NOCs and approvals in Dubai.",
        keywords: &["dubai approvals blog", "permit guides"],
    },
];

static ROUTE_TABLE: Lazy<HashMap<&'static str, &'static RouteMeta>> =
    Lazy::new(|| STATIC_ROUTES.iter().map(|m| (m.path, m)).collect());

/// What ends up in a page's `<head>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub canonical: String,
    pub image: Option<String>,
}

impl PageMeta {
    pub fn for_route(path: &str, config: &Config) -> Self {
        match ROUTE_TABLE.get(path) {
            Some(meta) => Self {
                title: format!("{} | {}", meta.title, config.site_name()),
                description: meta.description.to_string(),
                keywords: meta.keywords.iter().map(|k| k.to_string()).collect(),
                canonical: config.absolute_url(meta.path),
                image: None,
            },
            None => Self {
                title: config.site_name().to_string(),
                description: String::new(),
                keywords: Vec::new(),
                canonical: config.absolute_url(path),
                image: None,
            },
        }
    }

    pub fn for_post(post: &PostRecord, config: &Config) -> Self {
        Self {
            title: post.seo.meta_title.clone(),
            description: post.seo.meta_description.clone(),
            keywords: post.seo.keywords.clone(),
            canonical: config.absolute_url(&post.href()),
            image: Some(config.absolute_url(&post.cover_image)),
        }
    }

    pub fn not_found(config: &Config) -> Self {
        Self {
            title: format!("Page not found | {}", config.site_name()),
            description: String::new(),
            keywords: Vec::new(),
            canonical: config.absolute_url("/"),
            image: None,
        }
    }
}
