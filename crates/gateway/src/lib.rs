#![forbid(unsafe_code)]

pub mod demo;
pub mod http;
pub mod memory;
pub mod repository;

pub use http::{GatewayConfig, HttpGateway};
pub use memory::InMemoryGateway;
pub use repository::{CatalogGateway, Gateway, GatewayError, ScoringGateway};
