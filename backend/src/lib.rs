//! Notes backend library: note and account handlers over managed services.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod wiring;

pub use doc::ApiDoc;
pub use domain::TraceId;
pub use inbound::http::trace::Trace;
