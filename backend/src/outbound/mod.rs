//! Outbound adapters implementing domain ports for managed services.
//!
//! - **dynamodb**: the note table (`NoteRepository`)
//! - **cognito**: the user pool (`IdentityProvider`)
//! - **memory**: an in-process `NoteRepository` for local runs and tests
//! - **supabase**: the board backend (`NoteBoard`, `BoardAccount`)
//!
//! Adapters translate between domain types and SDK or wire shapes. They hold
//! no business rules beyond the conditional writes the ports promise.

pub mod cognito;
pub mod dynamodb;
pub mod memory;
pub mod supabase;

pub use self::cognito::CognitoIdentityProvider;
pub use self::dynamodb::DynamoNoteRepository;
pub use self::memory::InMemoryNoteRepository;
pub use self::supabase::SupabaseClient;
