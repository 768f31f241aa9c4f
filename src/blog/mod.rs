//! Blog posts: the listing store, the slug registry derived from it, and the
//! admin ingestion flow that creates a post from an uploaded document.

pub mod dtos;
pub mod errors;
pub mod formatter;
pub mod handlers;
pub mod ingest;
pub mod model;
pub mod reconcile;
pub mod registry;
pub mod seo;
pub mod staging;
pub mod store;

pub use model::{PostRecord, SeoMeta};
pub use registry::PostRegistry;
pub use store::BlogStore;
