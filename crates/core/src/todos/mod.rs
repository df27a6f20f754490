//! To-do module - items a member tracks per joined goal.

mod todos_model;
mod todos_service;
mod todos_traits;

pub use todos_model::{NewTodoItem, Todo};
pub use todos_service::TodoService;
pub use todos_traits::{TodoRepositoryTrait, TodoServiceTrait};
