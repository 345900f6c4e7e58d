use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Mutex;

use crate::models::todo::{NewTodo, Todo};
use crate::repository::{StorageError, TodoRepository};

/// Test double for the SQLite store, in the shape the real database leaves
/// behind: ids are assigned sequentially and never reused after a delete.
pub struct InMemoryDatabase {
    todos: Mutex<Vec<Todo>>,
    next_id: AtomicI32,
}

impl Default for InMemoryDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        InMemoryDatabase {
            todos: Mutex::new(vec![]),
            next_id: AtomicI32::new(1),
        }
    }
}

impl TodoRepository for InMemoryDatabase {
    fn find_all(&self) -> Result<Vec<Todo>, StorageError> {
        let todos = self.todos.lock().unwrap();
        Ok(todos.clone())
    }

    fn find_by_id(&self, id: i32) -> Result<Option<Todo>, StorageError> {
        let todos = self.todos.lock().unwrap();
        Ok(todos.iter().find(|todo| todo.id == id).cloned())
    }

    fn exists_by_id(&self, id: i32) -> Result<bool, StorageError> {
        let todos = self.todos.lock().unwrap();
        Ok(todos.iter().any(|todo| todo.id == id))
    }

    fn find_by_title_and_completed(
        &self,
        title: &str,
        completed: bool,
    ) -> Result<Option<Todo>, StorageError> {
        let todos = self.todos.lock().unwrap();
        Ok(todos
            .iter()
            .find(|todo| todo.title == title && todo.completed == completed)
            .cloned())
    }

    fn insert(&self, new_todo: NewTodo) -> Result<Todo, StorageError> {
        let mut todos = self.todos.lock().unwrap();
        let todo = Todo {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            title: new_todo.title,
            description: new_todo.description,
            completed: new_todo.completed.unwrap_or(false),
        };
        todos.push(todo.clone());
        Ok(todo)
    }

    fn update(&self, todo: &Todo) -> Result<Todo, StorageError> {
        let mut todos = self.todos.lock().unwrap();
        // same error value the SQLite store reports for a vanished row
        let index = todos
            .iter()
            .position(|stored| stored.id == todo.id)
            .ok_or(StorageError::Database(diesel::result::Error::NotFound))?;
        todos[index] = todo.clone();
        Ok(todo.clone())
    }

    fn delete_by_id(&self, id: i32) -> Result<(), StorageError> {
        let mut todos = self.todos.lock().unwrap();
        if let Some(index) = todos.iter().position(|todo| todo.id == id) {
            todos.remove(index);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_todo(title: &str, completed: bool) -> NewTodo {
        NewTodo {
            title: title.to_string(),
            description: None,
            completed: Some(completed),
        }
    }

    #[test]
    fn insert_assigns_sequential_ids() {
        let database = InMemoryDatabase::new();

        let first = database.insert(new_todo("First", false)).unwrap();
        let second = database.insert(new_todo("Second", true)).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let database = InMemoryDatabase::new();
        let first = database.insert(new_todo("First", false)).unwrap();
        database.delete_by_id(first.id).unwrap();

        let second = database.insert(new_todo("Second", false)).unwrap();

        assert_eq!(second.id, 2);
        assert!(database.find_by_id(first.id).unwrap().is_none());
    }

    #[test]
    fn find_by_title_and_completed_requires_both_to_match() {
        let database = InMemoryDatabase::new();
        database.insert(new_todo("Test1", true)).unwrap();

        assert!(database
            .find_by_title_and_completed("Test1", true)
            .unwrap()
            .is_some());
        assert!(database
            .find_by_title_and_completed("Test1", false)
            .unwrap()
            .is_none());
        assert!(database
            .find_by_title_and_completed("Other", true)
            .unwrap()
            .is_none());
    }

    #[test]
    fn update_overwrites_the_stored_todo() {
        let database = InMemoryDatabase::new();
        let mut todo = database.insert(new_todo("Original", false)).unwrap();

        todo.completed = true;
        database.update(&todo).unwrap();

        assert_eq!(database.find_by_id(todo.id).unwrap().unwrap(), todo);
    }

    #[test]
    fn update_of_unknown_id_reports_not_found() {
        let database = InMemoryDatabase::new();
        let todo = Todo {
            id: 42,
            title: "Ghost".to_string(),
            description: None,
            completed: false,
        };

        let result = database.update(&todo);

        assert!(matches!(
            result,
            Err(StorageError::Database(diesel::result::Error::NotFound))
        ));
    }

    #[test]
    fn delete_of_unknown_id_is_a_no_op() {
        let database = InMemoryDatabase::new();
        database.insert(new_todo("Kept", false)).unwrap();

        database.delete_by_id(99).unwrap();

        assert_eq!(database.find_all().unwrap().len(), 1);
    }
}
