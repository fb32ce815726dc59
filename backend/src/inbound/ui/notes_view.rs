//! Notes board view.
//!
//! Holds the note list, the note form and the note being edited. Every
//! successful mutation is followed by a full re-fetch; failures raise an
//! error toast and leave the form as it was. Underlying error detail goes to
//! the log, never to the toast.

use std::fmt;
use std::sync::Arc;

use mockable::Clock;
use tracing::warn;

use super::notifier::{Notifier, Toast};
use crate::domain::ports::{BoardAccount, NoteBoard};
use crate::domain::{Note, NoteDraft, NoteId, UserId};

pub const EMPTY_BOARD: &str = "No notes yet. Create your first note!";
const FORM_INCOMPLETE: &str = "Title and content are required";

/// Result of submitting the note form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created,
    Updated,
    /// The form was incomplete and nothing was sent.
    Refused,
    Failed,
}

/// Board view state.
pub struct NotesView {
    board: Arc<dyn NoteBoard>,
    account: Arc<dyn BoardAccount>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    user_id: Option<UserId>,
    notes: Vec<Note>,
    title: String,
    content: String,
    editing: Option<Note>,
}

impl NotesView {
    pub fn new(
        board: Arc<dyn NoteBoard>,
        account: Arc<dyn BoardAccount>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        user_id: Option<UserId>,
    ) -> Self {
        Self {
            board,
            account,
            notifier,
            clock,
            user_id,
            notes: Vec::new(),
            title: String::new(),
            content: String::new(),
            editing: None,
        }
    }

    /// Initial fetch.
    pub async fn mount(&mut self) {
        self.refresh().await;
    }

    /// Re-fetch the list, newest first. On failure the previous list stays.
    pub async fn refresh(&mut self) {
        match self.board.list_recent_first().await {
            Ok(notes) => self.notes = notes,
            Err(err) => {
                warn!(error = %err, "fetching notes failed");
                self.notifier.notify(Toast::error("Error fetching notes"));
            }
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Select `note` for editing and copy it into the form.
    pub fn begin_edit(&mut self, note: &Note) {
        let draft = note.to_draft();
        self.title = draft.title().to_owned();
        self.content = draft.content().to_owned();
        self.editing = Some(note.clone());
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.clear_form();
    }

    /// Insert a new note or update the one being edited.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let draft = NoteDraft::new(self.title.clone(), self.content.clone());
        if draft.is_incomplete() {
            self.notifier.notify(Toast::error(FORM_INCOMPLETE));
            return SubmitOutcome::Refused;
        }

        let (result, success, failure, outcome) = match &self.editing {
            Some(note) => (
                self.board
                    .update(note.note_id(), &draft, self.clock.utc())
                    .await,
                "Note updated successfully",
                "Error updating note",
                SubmitOutcome::Updated,
            ),
            None => (
                self.board.insert(&draft, self.user_id.clone()).await,
                "Note created successfully",
                "Error creating note",
                SubmitOutcome::Created,
            ),
        };

        match result {
            Ok(()) => {
                self.notifier.notify(Toast::success(success));
                self.editing = None;
                self.clear_form();
                self.refresh().await;
                outcome
            }
            Err(err) => {
                warn!(error = %err, "saving note failed");
                self.notifier.notify(Toast::error(failure));
                SubmitOutcome::Failed
            }
        }
    }

    /// Delete a note and re-fetch. Returns whether the board accepted it.
    pub async fn delete(&mut self, id: &NoteId) -> bool {
        match self.board.delete(id).await {
            Ok(()) => {
                self.notifier.notify(Toast::success("Note deleted successfully"));
                self.refresh().await;
                true
            }
            Err(err) => {
                warn!(error = %err, note_id = %id, "deleting note failed");
                self.notifier.notify(Toast::error("Error deleting note"));
                false
            }
        }
    }

    /// End the board session.
    pub async fn sign_out(&mut self) -> bool {
        match self.account.sign_out().await {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "sign out failed");
                self.notifier.notify(Toast::error("Error signing out"));
                false
            }
        }
    }

    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn editing(&self) -> Option<&Note> {
        self.editing.as_ref()
    }

    /// Plain-text rendering of the board. Dates are shown in UTC.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn clear_form(&mut self) {
        self.title.clear();
        self.content.clear();
    }
}

impl fmt::Display for NotesView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = if self.editing.is_some() {
            "Update Note"
        } else {
            "Add Note"
        };
        writeln!(f, "My Notes\n")?;
        writeln!(f, "[{action}] title: {:?} content: {:?}\n", self.title, self.content)?;
        if self.notes.is_empty() {
            return writeln!(f, "{EMPTY_BOARD}");
        }
        for note in &self.notes {
            writeln!(f, "{} ({})", note.title(), note.note_id())?;
            writeln!(f, "{}", note.content())?;
            if let Some(created_at) = note.created_at() {
                writeln!(f, "{}", created_at.format("%B %-d, %Y"))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockBoardAccount, MockNoteBoard, NoteBoardError};
    use crate::inbound::ui::notifier::RecordingNotifier;
    use chrono::{DateTime, Local, TimeZone, Utc};
    use rstest::{fixture, rstest};

    struct FrozenClock(DateTime<Utc>);

    impl Clock for FrozenClock {
        fn local(&self) -> DateTime<Local> {
            self.0.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0)
            .single()
            .expect("valid timestamp")
    }

    fn note(id: &str, title: &str, created_at: DateTime<Utc>) -> Note {
        Note::new(NoteId::new(id).expect("id"), NoteDraft::new(title, "body")).with_created_at(created_at)
    }

    fn view(board: MockNoteBoard, notifier: Arc<RecordingNotifier>, now: DateTime<Utc>) -> NotesView {
        NotesView::new(
            Arc::new(board),
            Arc::new(MockBoardAccount::new()),
            notifier,
            Arc::new(FrozenClock(now)),
            None,
        )
    }

    fn failure() -> NoteBoardError {
        NoteBoardError::status(500_u16, "boom")
    }

    #[rstest]
    #[tokio::test]
    async fn fetch_failure_keeps_previous_list(now: DateTime<Utc>) {
        let mut board = MockNoteBoard::new();
        let mut calls = 0;
        board.expect_list_recent_first().times(2).returning(move || {
            calls += 1;
            if calls == 1 {
                Ok(vec![note("1", "first", now)])
            } else {
                Err(failure())
            }
        });
        let notifier = Arc::new(RecordingNotifier::new());
        let mut view = view(board, Arc::clone(&notifier), now);

        view.mount().await;
        view.refresh().await;

        assert_eq!(view.notes().len(), 1);
        assert_eq!(notifier.drain(), vec![Toast::error("Error fetching notes")]);
    }

    #[rstest]
    #[tokio::test]
    async fn incomplete_form_is_refused(now: DateTime<Utc>) {
        let mut board = MockNoteBoard::new();
        board.expect_insert().never();
        let notifier = Arc::new(RecordingNotifier::new());
        let mut view = view(board, Arc::clone(&notifier), now);
        view.set_title("only a title");

        assert_eq!(view.submit().await, SubmitOutcome::Refused);
        assert_eq!(notifier.drain(), vec![Toast::error("Title and content are required")]);
    }

    #[rstest]
    #[tokio::test]
    async fn create_clears_form_and_refetches(now: DateTime<Utc>) {
        let mut board = MockNoteBoard::new();
        board
            .expect_insert()
            .withf(|draft, owner| draft.title() == "T" && owner.is_none())
            .times(1)
            .return_once(|_, _| Ok(()));
        board
            .expect_list_recent_first()
            .times(1)
            .return_once(move || Ok(vec![note("9", "T", now)]));
        let notifier = Arc::new(RecordingNotifier::new());
        let mut view = view(board, Arc::clone(&notifier), now);
        view.set_title("T");
        view.set_content("C");

        assert_eq!(view.submit().await, SubmitOutcome::Created);
        assert_eq!(view.title(), "");
        assert_eq!(view.content(), "");
        assert_eq!(view.notes().len(), 1);
        assert_eq!(notifier.drain(), vec![Toast::success("Note created successfully")]);
    }

    #[rstest]
    #[tokio::test]
    async fn failed_update_keeps_form_and_selection(now: DateTime<Utc>) {
        let mut board = MockNoteBoard::new();
        board
            .expect_update()
            .withf(move |id, draft, at| id.as_ref() == "3" && draft.content() == "edited" && *at == now)
            .return_once(|_, _, _| Err(failure()));
        board.expect_list_recent_first().never();
        let notifier = Arc::new(RecordingNotifier::new());
        let mut view = view(board, Arc::clone(&notifier), now);
        view.begin_edit(&note("3", "old", now));
        view.set_content("edited");

        assert_eq!(view.submit().await, SubmitOutcome::Failed);
        assert_eq!(view.title(), "old");
        assert_eq!(view.content(), "edited");
        assert!(view.editing().is_some());
        assert_eq!(notifier.drain(), vec![Toast::error("Error updating note")]);
    }

    #[rstest]
    #[case(true, "Note deleted successfully")]
    #[case(false, "Error deleting note")]
    #[tokio::test]
    async fn delete_toasts(now: DateTime<Utc>, #[case] accepted: bool, #[case] message: &str) {
        let mut board = MockNoteBoard::new();
        board.expect_delete().return_once(move |_| {
            if accepted { Ok(()) } else { Err(failure()) }
        });
        board
            .expect_list_recent_first()
            .times(usize::from(accepted))
            .returning(|| Ok(Vec::new()));
        let notifier = Arc::new(RecordingNotifier::new());
        let mut view = view(board, Arc::clone(&notifier), now);

        assert_eq!(view.delete(&NoteId::new("1").expect("id")).await, accepted);
        let toasts = notifier.drain();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts.first().map(|t| t.message.as_str()), Some(message));
    }

    #[rstest]
    fn cancel_edit_clears_selection(now: DateTime<Utc>) {
        let mut view = view(MockNoteBoard::new(), Arc::new(RecordingNotifier::new()), now);
        view.begin_edit(&note("3", "old", now));
        view.cancel_edit();
        assert!(view.editing().is_none());
        assert_eq!(view.title(), "");
    }

    #[rstest]
    fn render_shows_empty_state(now: DateTime<Utc>) {
        let view = view(MockNoteBoard::new(), Arc::new(RecordingNotifier::new()), now);
        assert_eq!(
            view.render(),
            format!("My Notes\n\n[Add Note] title: \"\" content: \"\"\n\n{EMPTY_BOARD}\n")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn render_formats_creation_date(now: DateTime<Utc>) {
        let mut board = MockNoteBoard::new();
        board
            .expect_list_recent_first()
            .return_once(move || Ok(vec![note("1", "Groceries", now)]));
        let mut view = view(board, Arc::new(RecordingNotifier::new()), now);
        view.mount().await;

        let rendered = view.render();
        assert!(rendered.ends_with("Groceries (1)\nbody\nMarch 1, 2024\n\n"));
    }

    #[rstest]
    #[tokio::test]
    async fn sign_out_failure_toasts(now: DateTime<Utc>) {
        let mut account = MockBoardAccount::new();
        account.expect_sign_out().return_once(|| Err(failure()));
        let notifier = Arc::new(RecordingNotifier::new());
        let mut view = NotesView::new(
            Arc::new(MockNoteBoard::new()),
            Arc::new(account),
            Arc::clone(&notifier) as Arc<dyn Notifier>,
            Arc::new(FrozenClock(now)),
            None,
        );

        assert!(!view.sign_out().await);
        assert_eq!(notifier.drain(), vec![Toast::error("Error signing out")]);
    }
}
