//! Note domain service.
//!
//! Implements the note driving ports on top of a [`NoteRepository`],
//! translating repository failures into domain errors.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{NoteRepository, NoteRepositoryError, NotesCommand, NotesQuery};
use crate::domain::{
    Error, NOTE_NOT_FOUND, Note, NoteDraft, NoteId, NoteIdGenerator, UpdatedAttributes,
};

/// Note service implementing [`NotesCommand`] and [`NotesQuery`].
pub struct NoteService<R: ?Sized> {
    repository: Arc<R>,
    ids: Arc<dyn NoteIdGenerator>,
}

impl<R: ?Sized> NoteService<R> {
    /// Create a service over `repository`, minting keys from `ids`.
    pub fn new(repository: Arc<R>, ids: Arc<dyn NoteIdGenerator>) -> Self {
        Self { repository, ids }
    }
}

fn map_repository_error(error: NoteRepositoryError) -> Error {
    match error {
        NoteRepositoryError::Connection { message } | NoteRepositoryError::Query { message } => {
            Error::upstream(message)
        }
        err @ NoteRepositoryError::AlreadyExists { .. } => Error::conflict(err.to_string()),
        err @ NoteRepositoryError::Decode { .. } => Error::upstream(err.to_string()),
    }
}

#[async_trait]
impl<R> NotesCommand for NoteService<R>
where
    R: NoteRepository + ?Sized,
{
    async fn create(&self, draft: NoteDraft) -> Result<NoteId, Error> {
        let note = Note::new(self.ids.next_id(), draft);
        self.repository
            .put(&note)
            .await
            .map_err(map_repository_error)?;
        Ok(note.note_id().clone())
    }

    async fn update(&self, id: &NoteId, draft: NoteDraft) -> Result<UpdatedAttributes, Error> {
        self.repository
            .update(id, &draft)
            .await
            .map_err(map_repository_error)
    }

    async fn delete(&self, id: &NoteId) -> Result<(), Error> {
        self.repository.delete(id).await.map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> NotesQuery for NoteService<R>
where
    R: NoteRepository + ?Sized,
{
    async fn get(&self, id: &NoteId) -> Result<Note, Error> {
        self.repository
            .get(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(NOTE_NOT_FOUND))
    }

    async fn list(&self) -> Result<Vec<Note>, Error> {
        self.repository.scan().await.map_err(map_repository_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::note_id::MockNoteIdGenerator;
    use crate::domain::ports::MockNoteRepository;
    use rstest::{fixture, rstest};

    #[fixture]
    fn fixed_ids() -> Arc<dyn NoteIdGenerator> {
        let mut ids = MockNoteIdGenerator::new();
        ids.expect_next_id()
            .returning(|| NoteId::new("1700000000000").expect("valid id"));
        Arc::new(ids)
    }

    fn service(repo: MockNoteRepository, ids: Arc<dyn NoteIdGenerator>) -> NoteService<MockNoteRepository> {
        NoteService::new(Arc::new(repo), ids)
    }

    fn note_id(raw: &str) -> NoteId {
        NoteId::new(raw).expect("valid id")
    }

    #[rstest]
    #[tokio::test]
    async fn create_puts_generated_note(fixed_ids: Arc<dyn NoteIdGenerator>) {
        let mut repo = MockNoteRepository::new();
        repo.expect_put()
            .withf(|note| {
                note.note_id().as_ref() == "1700000000000"
                    && note.title() == "A"
                    && note.content() == "B"
            })
            .times(1)
            .return_once(|_| Ok(()));

        let id = service(repo, fixed_ids)
            .create(NoteDraft::new("A", "B"))
            .await
            .expect("create succeeds");
        assert_eq!(id.as_ref(), "1700000000000");
    }

    #[rstest]
    #[tokio::test]
    async fn create_collision_is_conflict(fixed_ids: Arc<dyn NoteIdGenerator>) {
        let mut repo = MockNoteRepository::new();
        repo.expect_put()
            .return_once(|_| Err(NoteRepositoryError::already_exists("1700000000000")));

        let err = service(repo, fixed_ids)
            .create(NoteDraft::new("A", "B"))
            .await
            .expect_err("collision fails");
        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(err.message(), "note 1700000000000 already exists");
    }

    #[rstest]
    #[tokio::test]
    async fn get_missing_is_not_found(fixed_ids: Arc<dyn NoteIdGenerator>) {
        let mut repo = MockNoteRepository::new();
        repo.expect_get().return_once(|_| Ok(None));

        let err = service(repo, fixed_ids)
            .get(&note_id("nope"))
            .await
            .expect_err("missing note");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), NOTE_NOT_FOUND);
    }

    #[rstest]
    #[tokio::test]
    async fn undecodable_item_is_upstream(fixed_ids: Arc<dyn NoteIdGenerator>) {
        let mut repo = MockNoteRepository::new();
        repo.expect_get()
            .return_once(|_| Err(NoteRepositoryError::decode("invalid type: number, expected a string")));

        let err = service(repo, fixed_ids)
            .get(&note_id("9"))
            .await
            .expect_err("bad item");
        assert_eq!(err.code(), ErrorCode::Upstream);
        assert_eq!(
            err.message(),
            "failed to decode note item: invalid type: number, expected a string"
        );
    }

    #[rstest]
    #[case(NoteRepositoryError::query("ResourceNotFoundException: table missing"), ErrorCode::Upstream)]
    #[case(NoteRepositoryError::connection("dispatch failure"), ErrorCode::Upstream)]
    #[case(NoteRepositoryError::decode("missing noteId"), ErrorCode::Upstream)]
    #[tokio::test]
    async fn list_maps_repository_failures(
        fixed_ids: Arc<dyn NoteIdGenerator>,
        #[case] failure: NoteRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockNoteRepository::new();
        repo.expect_scan().return_once(move || Err(failure));

        let err = service(repo, fixed_ids).list().await.expect_err("scan fails");
        assert_eq!(err.code(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn upstream_messages_pass_through(fixed_ids: Arc<dyn NoteIdGenerator>) {
        let mut repo = MockNoteRepository::new();
        repo.expect_delete()
            .return_once(|_| Err(NoteRepositoryError::query("Requested resource not found")));

        let err = service(repo, fixed_ids)
            .delete(&note_id("1"))
            .await
            .expect_err("delete fails");
        assert_eq!(err.message(), "Requested resource not found");
    }
}
