//! Shared HTTP adapter state.
//!
//! Routes receive this via `web::Data` and forward to the gateway handlers,
//! so the HTTP surface answers exactly like the Lambda deployments.

use crate::inbound::gateway::{GatewayHandlers, HandlerPorts};

/// Dependency bundle for HTTP routes.
#[derive(Clone)]
pub struct HttpState {
    pub handlers: GatewayHandlers,
}

impl HttpState {
    pub fn new(handlers: GatewayHandlers) -> Self {
        Self { handlers }
    }
}

impl From<HandlerPorts> for HttpState {
    fn from(ports: HandlerPorts) -> Self {
        Self::new(GatewayHandlers::from(ports))
    }
}
