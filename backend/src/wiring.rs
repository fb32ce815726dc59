//! Adapter selection shared by the server and Lambda entry points.
//!
//! `NOTES_STORAGE=dynamodb` wires the DynamoDB table and the Cognito pool
//! from the default AWS configuration chain. `NOTES_STORAGE=memory` wires the
//! in-process repository and the fixture identity provider so the handlers
//! run without any AWS account.

use std::sync::Arc;

use aws_config::BehaviorVersion;
use mockable::{Clock, DefaultClock};
use tracing::info;

use crate::config::{NotesSettings, SettingsError, StorageKind};
use crate::domain::ports::{FixtureIdentityProvider, IdentityProvider, NoteRepository};
use crate::domain::{
    AccountService, IdentityPoolSettings, NoteIdGenerator, NoteService, TimestampNoteIds,
};
use crate::inbound::gateway::HandlerPorts;
use crate::outbound::{CognitoIdentityProvider, DynamoNoteRepository, InMemoryNoteRepository};

/// Build the handler ports selected by `settings`.
pub async fn build_handler_ports(
    settings: &NotesSettings,
    identity_pool: IdentityPoolSettings,
) -> Result<HandlerPorts, SettingsError> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let ids: Arc<dyn NoteIdGenerator> = Arc::new(TimestampNoteIds::new(Arc::clone(&clock)));
    let storage = settings.storage_kind()?;
    info!(?storage, table = settings.table_name(), "wiring note handlers");
    let ports = match storage {
        StorageKind::DynamoDb => {
            let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
            assemble_ports(
                Arc::new(DynamoNoteRepository::from_sdk_config(
                    &sdk_config,
                    settings.table_name(),
                )),
                Arc::new(CognitoIdentityProvider::from_sdk_config(&sdk_config)),
                ids,
                clock,
                identity_pool,
            )
        }
        StorageKind::Memory => assemble_ports(
            Arc::new(InMemoryNoteRepository::new()),
            Arc::new(FixtureIdentityProvider),
            ids,
            clock,
            identity_pool,
        ),
    };
    Ok(ports)
}

/// Wrap a repository and an identity provider in the handler services.
pub fn assemble_ports<R, P>(
    repository: Arc<R>,
    provider: Arc<P>,
    ids: Arc<dyn NoteIdGenerator>,
    clock: Arc<dyn Clock>,
    identity_pool: IdentityPoolSettings,
) -> HandlerPorts
where
    R: NoteRepository + 'static,
    P: IdentityProvider + 'static,
{
    let notes = Arc::new(NoteService::new(repository, ids));
    HandlerPorts {
        notes: notes.clone(),
        notes_query: notes,
        accounts: Arc::new(AccountService::new(provider, clock)),
        identity_pool,
    }
}
