//! In-process note repository for local runs and tests.
//!
//! Mirrors the table adapter: inserts never overwrite, updates write
//! whatever key they are given, deletes of unknown keys succeed.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{NoteRepository, NoteRepositoryError};
use crate::domain::{Note, NoteDraft, NoteId, UpdatedAttributes};

/// Note repository held in memory, ordered by key.
#[derive(Debug, Default)]
pub struct InMemoryNoteRepository {
    notes: RwLock<BTreeMap<NoteId, Note>>,
}

impl InMemoryNoteRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with existing notes, later duplicates winning.
    pub fn with_notes(notes: impl IntoIterator<Item = Note>) -> Self {
        let notes = notes
            .into_iter()
            .map(|note| (note.note_id().clone(), note))
            .collect();
        Self {
            notes: RwLock::new(notes),
        }
    }

    pub async fn len(&self) -> usize {
        self.notes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.notes.read().await.is_empty()
    }
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn put(&self, note: &Note) -> Result<(), NoteRepositoryError> {
        let mut notes = self.notes.write().await;
        if notes.contains_key(note.note_id()) {
            return Err(NoteRepositoryError::already_exists(note.note_id().to_string()));
        }
        notes.insert(note.note_id().clone(), note.clone());
        Ok(())
    }

    async fn get(&self, id: &NoteId) -> Result<Option<Note>, NoteRepositoryError> {
        Ok(self.notes.read().await.get(id).cloned())
    }

    async fn scan(&self) -> Result<Vec<Note>, NoteRepositoryError> {
        Ok(self.notes.read().await.values().cloned().collect())
    }

    async fn update(
        &self,
        id: &NoteId,
        draft: &NoteDraft,
    ) -> Result<UpdatedAttributes, NoteRepositoryError> {
        self.notes
            .write()
            .await
            .entry(id.clone())
            .and_modify(|note| note.apply(draft))
            .or_insert_with(|| Note::new(id.clone(), draft.clone()));
        Ok(UpdatedAttributes::from(draft))
    }

    async fn delete(&self, id: &NoteId) -> Result<(), NoteRepositoryError> {
        self.notes.write().await.remove(id);
        Ok(())
    }
}
