//! Notes board views driven by the CLI.
//!
//! The views keep their own state and talk to the board through the
//! [`NoteBoard`](crate::domain::ports::NoteBoard) and
//! [`BoardAccount`](crate::domain::ports::BoardAccount) ports.

mod notes_view;
mod notifier;
mod signup_view;

pub use self::notes_view::{EMPTY_BOARD, NotesView, SubmitOutcome};
pub use self::notifier::{Notifier, RecordingNotifier, Toast, ToastKind, TracingNotifier};
pub use self::signup_view::{SignUpOutcome, SignUpView};
