use maud::{DOCTYPE, Markup, html};

use crate::{config::Config, site::meta::PageMeta};

const NAV: [(&str, &str); 6] = [
    ("/", "Home"),
    ("/about", "About"),
    ("/authorities", "Authorities"),
    ("/blog", "Blog"),
    ("/faq", "FAQ"),
    ("/contact", "Contact"),
];

/// Wraps page content in the shared document shell.
pub fn page(config: &Config, page_meta: &PageMeta, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (page_meta.title) }
                @if !page_meta.description.is_empty() {
                    meta name="description" content=(page_meta.description);
                }
                @if !page_meta.keywords.is_empty() {
                    meta name="keywords" content=(page_meta.keywords.join(", "));
                }
                link rel="canonical" href=(page_meta.canonical);
                meta property="og:title" content=(page_meta.title);
                meta property="og:url" content=(page_meta.canonical);
                meta property="og:site_name" content=(config.site_name());
                @if let Some(image) = &page_meta.image {
                    meta property="og:image" content=(image);
                }
                link rel="icon" href="/favicon.ico";
            }
            body {
                header.site-header {
                    a.brand href="/" { (config.site_name()) }
                    nav {
                        ul {
                            @for (href, label) in NAV {
                                li { a href=(href) { (label) } }
                            }
                        }
                    }
                }
                main { (content) }
                footer.site-footer {
                    p { "© " (config.site_name()) }
                    p {
                        a href=(format!("https://wa.me/{}", config.whatsapp_number())) {
                            "Chat on WhatsApp"
                        }
                    }
                }
            }
        }
    }
}
