// src/repositories/relation.rs
//
// Movie <-> category junction rows
//
// RULES:
// - Every function runs inside the caller's transaction
// - Never opens or commits anything itself
// - Stops at the first failure and returns it

use std::collections::HashSet;

use rusqlite::{params, Connection};

use crate::domain::Category;
use crate::error::{AppError, AppResult};

/// Link a movie to each category in `category_ids`.
///
/// Repeated ids are linked once. Both ends must already exist; a missing one
/// aborts with `NotFound` and the caller's transaction is expected to roll back.
/// Returns the number of rows inserted.
pub fn link(conn: &Connection, movie_id: i64, category_ids: &[i64]) -> AppResult<usize> {
    if category_ids.is_empty() {
        return Ok(0);
    }

    if !row_exists(conn, "SELECT EXISTS(SELECT 1 FROM movies WHERE id = ?1)", movie_id)? {
        return Err(AppError::movie_not_found(movie_id));
    }

    let mut category_exists =
        conn.prepare("SELECT EXISTS(SELECT 1 FROM categories WHERE id = ?1)")?;
    let mut insert =
        conn.prepare("INSERT INTO category_movies (movie_id, category_id) VALUES (?1, ?2)")?;

    let mut seen = HashSet::with_capacity(category_ids.len());
    let mut inserted = 0;

    for &category_id in category_ids {
        if !seen.insert(category_id) {
            continue;
        }

        let exists: bool = category_exists.query_row(params![category_id], |row| row.get(0))?;
        if !exists {
            return Err(AppError::category_not_found(category_id));
        }

        inserted += insert.execute(params![movie_id, category_id])?;
    }

    log::debug!("Linked movie {} to {} categories", movie_id, inserted);
    Ok(inserted)
}

/// Remove every link of a movie. Returns the number of rows deleted.
pub fn unlink(conn: &Connection, movie_id: i64) -> AppResult<usize> {
    let removed = conn.execute(
        "DELETE FROM category_movies WHERE movie_id = ?1",
        params![movie_id],
    )?;
    Ok(removed)
}

/// Remove every link pointing at a category. Returns the number of rows deleted.
pub fn unlink_by_category(conn: &Connection, category_id: i64) -> AppResult<usize> {
    let removed = conn.execute(
        "DELETE FROM category_movies WHERE category_id = ?1",
        params![category_id],
    )?;
    Ok(removed)
}

/// Categories linked to a movie, in link order
pub fn categories_for_movie(conn: &Connection, movie_id: i64) -> AppResult<Vec<Category>> {
    let mut stmt = conn.prepare_cached(
        "SELECT c.id, c.name
         FROM categories c
         INNER JOIN category_movies cm ON c.id = cm.category_id
         WHERE cm.movie_id = ?1
         ORDER BY cm.rowid",
    )?;

    let categories = stmt
        .query_map(params![movie_id], |row| Ok(Category::new(row.get(0)?, row.get::<_, String>(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(categories)
}

pub fn count_for_movie(conn: &Connection, movie_id: i64) -> AppResult<usize> {
    count(conn, "SELECT COUNT(*) FROM category_movies WHERE movie_id = ?1", movie_id)
}

pub fn count_for_category(conn: &Connection, category_id: i64) -> AppResult<usize> {
    count(conn, "SELECT COUNT(*) FROM category_movies WHERE category_id = ?1", category_id)
}

fn count(conn: &Connection, sql: &str, id: i64) -> AppResult<usize> {
    let count: i64 = conn.query_row(sql, params![id], |row| row.get(0))?;
    Ok(count as usize)
}

fn row_exists(conn: &Connection, sql: &str, id: i64) -> AppResult<bool> {
    let exists: bool = conn.query_row(sql, params![id], |row| row.get(0))?;
    Ok(exists)
}
