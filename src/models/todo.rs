use diesel::{AsChangeset, Insertable, Queryable};
use serde::{Deserialize, Serialize};

/// A stored todo. Doubles as the Diesel row type and the response body.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Queryable, AsChangeset)]
#[diesel(table_name = crate::repository::schema::todos)]
pub struct Todo {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

/// Creation payload. The id is assigned by the store; an unset `completed`
/// falls back to the column default (false).
#[derive(Serialize, Deserialize, Debug, Clone, Insertable)]
#[diesel(table_name = crate::repository::schema::todos)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

/// Partial update payload. Every field is optional; absent, null and blank
/// values leave the stored field untouched.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}
