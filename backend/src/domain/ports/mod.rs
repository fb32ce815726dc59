//! Domain ports for the hexagonal boundary.
//!
//! Driven ports hide the managed services (`NoteRepository`,
//! `IdentityProvider`, `NoteBoard`, `BoardAccount`). Driving ports
//! (`NotesCommand`, `NotesQuery`, `AccountCommand`) are what inbound adapters
//! call.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod board_account;
mod identity_provider;
mod note_board;
mod note_repository;
mod notes_command;

#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_command::AccountCommand;
#[cfg(test)]
pub use board_account::MockBoardAccount;
pub use board_account::BoardAccount;
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{
    FIXTURE_CONFIRMATION_CODE, FixtureIdentityProvider, IdentityProvider, IdentityProviderError,
};
#[cfg(test)]
pub use note_board::MockNoteBoard;
pub use note_board::{NoteBoard, NoteBoardError};
#[cfg(test)]
pub use note_repository::MockNoteRepository;
pub use note_repository::{NoteRepository, NoteRepositoryError};
#[cfg(test)]
pub use notes_command::{MockNotesCommand, MockNotesQuery};
pub use notes_command::{NotesCommand, NotesQuery};
