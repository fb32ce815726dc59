//! Domain primitives, ports and services.
//!
//! Purpose: Define the note and account types used by every handler, the
//! ports that hide the managed services, and the services that implement the
//! handler use-cases on top of those ports. Nothing here knows about HTTP,
//! Lambda or any SDK.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — transport agnostic failure payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable failure category.
//! - Note, NoteId, NoteDraft — the persisted record and its inputs.
//! - NoteService, AccountService — use-case implementations.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod note;
pub mod note_id;
pub mod note_service;
pub mod ports;
pub mod trace_id;

pub use self::account_service::AccountService;
pub use self::auth::{
    AccountCredentials, CredentialValidationError, IdentityPool, IdentityPoolSettings,
    IdentityToken, MISSING_CONFIGURATION, PasswordReset, SyntheticUsername,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::note::{
    NOTE_NOT_FOUND, Note, NoteDraft, NoteId, NoteValidationError, UpdatedAttributes, UserId,
};
pub use self::note_id::{NoteIdGenerator, TimestampNoteIds};
pub use self::note_service::NoteService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
