//! Serverless handler contract.
//!
//! Each handler maps one [`GatewayEvent`] to one [`GatewayResponse`].
//! [`GatewayHandlers`] bundles them so the Lambda entry point and the HTTP
//! adapter can route by [`HandlerKind`].

mod auth;
mod envelope;
mod notes;
pub mod payload;

pub use self::auth::AuthHandlers;
pub use self::envelope::{GatewayEvent, GatewayResponse, PATH_ID, UpstreamStatus};
pub use self::notes::NoteHandlers;
pub use crate::config::HandlerKind;

use std::sync::Arc;

use crate::domain::IdentityPoolSettings;
use crate::domain::ports::{AccountCommand, NotesCommand, NotesQuery};

/// Port implementations the handlers are built from.
#[derive(Clone)]
pub struct HandlerPorts {
    pub notes: Arc<dyn NotesCommand>,
    pub notes_query: Arc<dyn NotesQuery>,
    pub accounts: Arc<dyn AccountCommand>,
    pub identity_pool: IdentityPoolSettings,
}

/// All handlers behind one dispatch point.
#[derive(Clone)]
pub struct GatewayHandlers {
    notes: NoteHandlers,
    auth: AuthHandlers,
}

impl GatewayHandlers {
    pub fn new(notes: NoteHandlers, auth: AuthHandlers) -> Self {
        Self { notes, auth }
    }

    /// Run the handler named by `kind`.
    pub async fn dispatch(&self, kind: HandlerKind, event: &GatewayEvent) -> GatewayResponse {
        match kind {
            HandlerKind::Create => self.notes.create(event).await,
            HandlerKind::Get => self.notes.get(event).await,
            HandlerKind::List => self.notes.list(event).await,
            HandlerKind::Update => self.notes.update(event).await,
            HandlerKind::Delete => self.notes.delete(event).await,
            HandlerKind::Signup => self.auth.signup(event).await,
            HandlerKind::Login => self.auth.login(event).await,
            HandlerKind::ResetPassword => self.auth.reset_password(event).await,
        }
    }
}

impl From<HandlerPorts> for GatewayHandlers {
    fn from(ports: HandlerPorts) -> Self {
        Self::new(
            NoteHandlers::new(ports.notes, ports.notes_query),
            AuthHandlers::new(ports.accounts, ports.identity_pool),
        )
    }
}

