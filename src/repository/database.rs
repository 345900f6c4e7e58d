use diesel::connection::SimpleConnection;
use diesel::dsl::{exists, select};
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::models::todo::{NewTodo, Todo};
use crate::repository::schema::todos::dsl::*;
use crate::repository::{StorageError, TodoRepository};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

type DBPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

/// Applied to every pooled connection. SQLite allows a single writer at a
/// time; the busy timeout makes a second writer wait for the lock instead
/// of failing immediately with `DatabaseBusy`, and WAL keeps readers
/// unblocked while a write is in flight.
#[derive(Debug)]
struct ConnectionOptions;

impl r2d2::CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute("PRAGMA busy_timeout = 5000; PRAGMA journal_mode = WAL;")
            .map_err(r2d2::Error::QueryError)
    }
}

/// SQLite-backed store behind an r2d2 connection pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: DBPool,
}

impl Database {
    pub fn new(database_url: &str) -> Self {
        let manager = ConnectionManager::<SqliteConnection>::new(database_url);
        let pool: DBPool = r2d2::Pool::builder()
            .connection_customizer(Box::new(ConnectionOptions))
            .build(manager)
            .expect("Failed to create pool.");
        let mut conn = pool
            .get()
            .expect("Failed to get a database connection from the pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Failed to run database migrations.");
        Database { pool }
    }
}

impl TodoRepository for Database {
    fn find_all(&self) -> Result<Vec<Todo>, StorageError> {
        let mut conn = self.pool.get()?;
        Ok(todos.load::<Todo>(&mut conn)?)
    }

    fn find_by_id(&self, todo_id: i32) -> Result<Option<Todo>, StorageError> {
        let mut conn = self.pool.get()?;
        Ok(todos.find(todo_id).first::<Todo>(&mut conn).optional()?)
    }

    fn exists_by_id(&self, todo_id: i32) -> Result<bool, StorageError> {
        let mut conn = self.pool.get()?;
        Ok(select(exists(todos.find(todo_id))).get_result(&mut conn)?)
    }

    fn find_by_title_and_completed(
        &self,
        todo_title: &str,
        is_completed: bool,
    ) -> Result<Option<Todo>, StorageError> {
        let mut conn = self.pool.get()?;
        Ok(todos
            .filter(title.eq(todo_title))
            .filter(completed.eq(is_completed))
            .first::<Todo>(&mut conn)
            .optional()?)
    }

    fn insert(&self, new_todo: NewTodo) -> Result<Todo, StorageError> {
        let mut conn = self.pool.get()?;
        Ok(diesel::insert_into(todos)
            .values(&new_todo)
            .get_result::<Todo>(&mut conn)?)
    }

    fn update(&self, todo: &Todo) -> Result<Todo, StorageError> {
        let mut conn = self.pool.get()?;
        Ok(diesel::update(todos.find(todo.id))
            .set(todo)
            .get_result::<Todo>(&mut conn)?)
    }

    fn delete_by_id(&self, todo_id: i32) -> Result<(), StorageError> {
        let mut conn = self.pool.get()?;
        diesel::delete(todos.find(todo_id)).execute(&mut conn)?;
        Ok(())
    }
}
