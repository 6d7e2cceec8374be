// src/repositories/category_repository.rs

use std::sync::Arc;
use rusqlite::{params, OptionalExtension, Row};

use crate::db::ConnectionPool;
use crate::domain::Category;
use crate::error::{AppError, AppResult};
use crate::repositories::relation;

#[cfg_attr(test, mockall::automock)]
pub trait CategoryRepository: Send + Sync {
    fn list_all(&self) -> AppResult<Vec<Category>>;
    fn get_by_id(&self, id: i64) -> AppResult<Option<Category>>;
    fn create(&self, name: &str) -> AppResult<Category>;
    fn rename(&self, id: i64, name: &str) -> AppResult<()>;
    fn delete(&self, id: i64) -> AppResult<()>;
    fn exists(&self, id: i64) -> AppResult<bool>;
}

pub struct SqliteCategoryRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteCategoryRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_category(row: &Row) -> Result<Category, rusqlite::Error> {
        Ok(Category {
            id: row.get("id")?,
            name: row.get("name")?,
        })
    }
}

impl CategoryRepository for SqliteCategoryRepository {
    fn list_all(&self) -> AppResult<Vec<Category>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT id, name FROM categories ORDER BY id")?;

        let categories: Vec<Category> = stmt
            .query_map([], Self::row_to_category)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(categories)
    }

    fn get_by_id(&self, id: i64) -> AppResult<Option<Category>> {
        let conn = self.pool.get()?;

        let category = conn
            .query_row(
                "SELECT id, name FROM categories WHERE id = ?1",
                params![id],
                Self::row_to_category,
            )
            .optional()?;

        Ok(category)
    }

    fn create(&self, name: &str) -> AppResult<Category> {
        let conn = self.pool.get()?;

        conn.execute("INSERT INTO categories (name) VALUES (?1)", params![name])?;
        let id = conn.last_insert_rowid();

        log::debug!("Created category {} ({:?})", id, name);
        Ok(Category::new(id, name))
    }

    fn rename(&self, id: i64, name: &str) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "UPDATE categories SET name = ?1 WHERE id = ?2",
            params![name, id],
        )?;

        if rows_affected == 0 {
            return Err(AppError::category_not_found(id));
        }

        Ok(())
    }

    /// Removes the category and all of its links in one transaction.
    /// Movies that carried the category are kept.
    fn delete(&self, id: i64) -> AppResult<()> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        let unlinked = relation::unlink_by_category(&tx, id)?;
        let rows_affected = tx.execute("DELETE FROM categories WHERE id = ?1", params![id])?;

        if rows_affected == 0 {
            // dropping `tx` rolls the unlink back
            return Err(AppError::category_not_found(id));
        }

        tx.commit()?;

        log::debug!("Deleted category {} and {} movie links", id, unlinked);
        Ok(())
    }

    fn exists(&self, id: i64) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM categories WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }
}
