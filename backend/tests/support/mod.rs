//! Shared fixtures for the handler integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use notes_backend::domain::ports::{FixtureIdentityProvider, IdentityProvider};
use notes_backend::domain::{IdentityPoolSettings, TimestampNoteIds};
use notes_backend::inbound::gateway::{GatewayHandlers, HandlerPorts};
use notes_backend::outbound::InMemoryNoteRepository;
use notes_backend::wiring::assemble_ports;

/// Clock pinned to one instant.
pub struct FrozenClock(pub DateTime<Utc>);

impl Clock for FrozenClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn frozen_clock() -> Arc<dyn Clock> {
    let at = Utc
        .timestamp_millis_opt(1_700_000_000_000)
        .single()
        .expect("valid timestamp");
    Arc::new(FrozenClock(at))
}

pub fn configured_pool() -> IdentityPoolSettings {
    IdentityPoolSettings::new(Some("eu-west-1_pool".into()), Some("client".into()))
}

pub fn unconfigured_pool() -> IdentityPoolSettings {
    IdentityPoolSettings::new(None, Some("client".into()))
}

/// Ports over the given table and identity provider with a frozen clock.
pub fn ports_with<P>(
    repository: Arc<InMemoryNoteRepository>,
    provider: Arc<P>,
    pool: IdentityPoolSettings,
) -> HandlerPorts
where
    P: IdentityProvider + 'static,
{
    let clock = frozen_clock();
    let ids = Arc::new(TimestampNoteIds::new(Arc::clone(&clock)));
    assemble_ports(repository, provider, ids, clock, pool)
}

pub fn in_memory_handlers() -> GatewayHandlers {
    GatewayHandlers::from(ports_with(
        Arc::new(InMemoryNoteRepository::new()),
        Arc::new(FixtureIdentityProvider),
        configured_pool(),
    ))
}
