//! Server-rendered marketing pages and the blog's public side.

pub mod content;
pub mod layout;
pub mod meta;
pub mod pages;
pub mod sitemap;
pub mod whatsapp;
