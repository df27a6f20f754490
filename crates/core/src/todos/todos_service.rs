use log::debug;
use std::sync::Arc;

use super::todos_model::{NewTodoItem, Todo};
use super::todos_traits::{TodoRepositoryTrait, TodoServiceTrait};
use crate::errors::Result;
use crate::paging::{Page, PageRequest};

/// Service for managing to-do items.
pub struct TodoService {
    repository: Arc<dyn TodoRepositoryTrait>,
}

impl TodoService {
    pub fn new(repository: Arc<dyn TodoRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl TodoServiceTrait for TodoService {
    async fn add_todos(
        &self,
        member_id: &str,
        goal_id: i64,
        items: Vec<NewTodoItem>,
    ) -> Result<Vec<Todo>> {
        for item in &items {
            item.validate()?;
        }
        debug!(
            "adding {} todos for member {} on goal {}",
            items.len(),
            member_id,
            goal_id
        );
        self.repository.insert_batch(member_id, goal_id, items).await
    }

    fn get_todo_page(
        &self,
        member_id: &str,
        goal_id: i64,
        page: PageRequest,
    ) -> Result<Page<Todo>> {
        self.repository.list_page(member_id, goal_id, page)
    }
}
