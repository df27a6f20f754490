use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use stride_core::paging::{Page, PageRequest};
use stride_core::todos::{NewTodoItem, Todo, TodoRepositoryTrait};
use stride_core::Result;

use super::model::TodoDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::schema::todos;

/// Repository for managing to-do items in the database.
pub struct TodoRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TodoRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn insert_rows(
        member_id: &str,
        goal_id: i64,
        items: Vec<NewTodoItem>,
        conn: &mut SqliteConnection,
    ) -> Result<Vec<Todo>> {
        let now = Utc::now().naive_utc();
        let rows: Vec<TodoDB> = items
            .into_iter()
            .map(|item| TodoDB {
                id: Uuid::new_v4().to_string(),
                member_id: member_id.to_string(),
                goal_id,
                content: item.content,
                sort_order: item.sort_order,
                is_completed: false,
                created_at: now,
                updated_at: now,
            })
            .collect();

        diesel::insert_into(todos::table)
            .values(&rows)
            .execute(conn)?;

        Ok(rows.into_iter().map(Todo::from).collect())
    }
}

#[async_trait]
impl TodoRepositoryTrait for TodoRepository {
    async fn insert_batch(
        &self,
        member_id: &str,
        goal_id: i64,
        items: Vec<NewTodoItem>,
    ) -> Result<Vec<Todo>> {
        let member_id = member_id.to_string();
        self.writer
            .exec(move |conn| Self::insert_rows(&member_id, goal_id, items, conn))
            .await
    }

    fn insert_batch_in_tx(
        &self,
        member_id: &str,
        goal_id: i64,
        items: Vec<NewTodoItem>,
        conn: &mut SqliteConnection,
    ) -> Result<Vec<Todo>> {
        Self::insert_rows(member_id, goal_id, items, conn)
    }

    fn list_page(&self, member_id: &str, goal_id: i64, page: PageRequest) -> Result<Page<Todo>> {
        let mut conn = get_connection(&self.pool)?;
        let base = || {
            todos::table
                .filter(todos::member_id.eq(member_id))
                .filter(todos::goal_id.eq(goal_id))
        };

        let total = base().count().get_result::<i64>(&mut conn)?;
        let rows = base()
            .select(TodoDB::as_select())
            .order((todos::sort_order.asc(), todos::created_at.asc()))
            .limit(page.size)
            .offset(page.offset())
            .load::<TodoDB>(&mut conn)?;

        Ok(Page::new(
            rows.into_iter().map(Todo::from).collect(),
            page,
            total,
        ))
    }
}
