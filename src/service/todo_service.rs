use std::sync::Arc;

use thiserror::Error;

use crate::models::todo::{NewTodo, Todo, TodoPatch};
use crate::repository::{StorageError, TodoRepository};

#[derive(Debug, Error)]
pub enum TodoError {
    #[error("Todo with id {id} does not exist")]
    NotFound { id: i32 },
    #[error("Already a pending task with this title")]
    Conflict,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Validation and mutation rules for todos.
///
/// Two rules live here and nowhere else: a title may belong to at most one
/// pending todo at a time, and updates are partial merges where absent, null
/// or blank patch fields leave the stored value untouched. The uniqueness
/// check is read-then-write; the store's partial unique index backstops it
/// against concurrent inserts.
pub struct TodoService {
    repository: Arc<dyn TodoRepository>,
}

impl TodoService {
    pub fn new(repository: Arc<dyn TodoRepository>) -> Self {
        TodoService { repository }
    }

    pub fn get_all_todos(&self) -> Result<Vec<Todo>, TodoError> {
        Ok(self.repository.find_all()?)
    }

    pub fn get_todo_by_id(&self, id: i32) -> Result<Todo, TodoError> {
        self.repository
            .find_by_id(id)?
            .ok_or(TodoError::NotFound { id })
    }

    /// Persists the candidate, unless it is itself pending and another
    /// pending todo already holds its title. Completed candidates are free
    /// to duplicate any title.
    pub fn add_todo(&self, new_todo: NewTodo) -> Result<Todo, TodoError> {
        if !new_todo.completed.unwrap_or(false)
            && self
                .repository
                .find_by_title_and_completed(&new_todo.title, false)?
                .is_some()
        {
            return Err(TodoError::Conflict);
        }
        Ok(self.repository.insert(new_todo)?)
    }

    pub fn delete_todo(&self, id: i32) -> Result<(), TodoError> {
        if !self.repository.exists_by_id(id)? {
            return Err(TodoError::NotFound { id });
        }
        self.repository.delete_by_id(id)?;
        Ok(())
    }

    /// Merges the patch into the stored todo, field by field.
    ///
    /// A text field is applied only when present, non-blank and different
    /// from the current value; `completed` only when present and different.
    /// The pending-uniqueness rule is enforced at two points: a changed
    /// title is re-checked while the record is currently pending, and a
    /// completed record flipping back to pending is checked against the
    /// title it will carry. Only a record that is completed and stays
    /// completed may take any title. The merged entity is persisted even
    /// when the patch turned out to be a complete no-op.
    pub fn update_todo(&self, id: i32, patch: TodoPatch) -> Result<Todo, TodoError> {
        let mut existing = self
            .repository
            .find_by_id(id)?
            .ok_or(TodoError::NotFound { id })?;

        if let Some(new_title) = patch.title {
            if !new_title.trim().is_empty() && new_title != existing.title {
                if !existing.completed
                    && self
                        .repository
                        .find_by_title_and_completed(&new_title, false)?
                        .is_some()
                {
                    return Err(TodoError::Conflict);
                }
                existing.title = new_title;
            }
        }

        if let Some(new_description) = patch.description {
            if !new_description.trim().is_empty()
                && existing.description.as_deref() != Some(new_description.as_str())
            {
                existing.description = Some(new_description);
            }
        }

        if let Some(new_completed) = patch.completed {
            if new_completed != existing.completed {
                // re-entering the pending set must not duplicate a pending title
                if !new_completed
                    && self
                        .repository
                        .find_by_title_and_completed(&existing.title, false)?
                        .is_some()
                {
                    return Err(TodoError::Conflict);
                }
                existing.completed = new_completed;
            }
        }

        Ok(self.repository.update(&existing)?)
    }
}
