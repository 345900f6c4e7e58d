pub mod database;
#[cfg(test)]
pub mod memory;
pub mod schema;

use diesel::r2d2;
use thiserror::Error;

use crate::models::todo::{NewTodo, Todo};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::PoolError),
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
}

/// Persistence operations consumed by the service layer.
///
/// `insert` assigns the id; `update` overwrites the row carrying the
/// entity's id and reports `diesel::result::Error::NotFound` when that row
/// is gone. `delete_by_id` is a plain SQL delete: removing an absent row is
/// not an error here, the existence check belongs to the service.
pub trait TodoRepository: Send + Sync {
    fn find_all(&self) -> Result<Vec<Todo>, StorageError>;
    fn find_by_id(&self, id: i32) -> Result<Option<Todo>, StorageError>;
    fn exists_by_id(&self, id: i32) -> Result<bool, StorageError>;
    fn find_by_title_and_completed(
        &self,
        title: &str,
        completed: bool,
    ) -> Result<Option<Todo>, StorageError>;
    fn insert(&self, new_todo: NewTodo) -> Result<Todo, StorageError>;
    fn update(&self, todo: &Todo) -> Result<Todo, StorageError>;
    fn delete_by_id(&self, id: i32) -> Result<(), StorageError>;
}
