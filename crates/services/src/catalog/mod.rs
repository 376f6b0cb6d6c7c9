mod service;
mod status;

pub use service::CatalogService;
pub use status::{CatalogSource, SourceStatus};
