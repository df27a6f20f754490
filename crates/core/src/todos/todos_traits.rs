//! To-do repository and service traits.

use async_trait::async_trait;
use diesel::sqlite::SqliteConnection;

use super::todos_model::{NewTodoItem, Todo};
use crate::errors::Result;
use crate::paging::{Page, PageRequest};

/// Trait defining the contract for to-do repository operations.
#[async_trait]
pub trait TodoRepositoryTrait: Send + Sync {
    /// Inserts a batch of items tagged with the (member, goal) pair.
    async fn insert_batch(
        &self,
        member_id: &str,
        goal_id: i64,
        items: Vec<NewTodoItem>,
    ) -> Result<Vec<Todo>>;

    /// Same as `insert_batch`, but inside the caller's transaction. Used
    /// by the join flow so the seed items commit with the participation.
    fn insert_batch_in_tx(
        &self,
        member_id: &str,
        goal_id: i64,
        items: Vec<NewTodoItem>,
        conn: &mut SqliteConnection,
    ) -> Result<Vec<Todo>>;

    /// One member's items for a goal, ordered by `sort_order`.
    fn list_page(&self, member_id: &str, goal_id: i64, page: PageRequest) -> Result<Page<Todo>>;
}

/// Trait for to-do service operations.
#[async_trait]
pub trait TodoServiceTrait: Send + Sync {
    async fn add_todos(
        &self,
        member_id: &str,
        goal_id: i64,
        items: Vec<NewTodoItem>,
    ) -> Result<Vec<Todo>>;

    fn get_todo_page(&self, member_id: &str, goal_id: i64, page: PageRequest)
        -> Result<Page<Todo>>;
}
