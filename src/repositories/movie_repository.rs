// src/repositories/movie_repository.rs
//
// Movie persistence together with the movie's category links.
// Every multi-statement write is one transaction; an early return drops the
// transaction and SQLite rolls it back.

use std::sync::Arc;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::ConnectionPool;
use crate::domain::{format_calendar_date, parse_calendar_date, Movie, NewMovie};
use crate::error::{AppError, AppResult};
use crate::repositories::relation;

const MOVIE_COLUMNS: &str =
    "id, title, personal_rating, imdb_rating, file_link, last_viewed";

#[cfg_attr(test, mockall::automock)]
pub trait MovieRepository: Send + Sync {
    fn list_all(&self) -> AppResult<Vec<Movie>>;
    fn get_by_id(&self, id: i64) -> AppResult<Option<Movie>>;
    fn create(&self, movie: &NewMovie, category_ids: &[i64]) -> AppResult<Movie>;
    fn update(&self, movie: &Movie, category_ids: &[i64]) -> AppResult<()>;
    fn delete(&self, id: i64) -> AppResult<()>;
    fn touch_last_viewed(&self, id: i64, date: NaiveDate) -> AppResult<()>;
}

pub struct SqliteMovieRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteMovieRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map database row to Movie, without categories
    fn row_to_movie(row: &Row) -> Result<Movie, rusqlite::Error> {
        let id: i64 = row.get("id")?;
        let last_viewed_raw: Option<String> = row.get("last_viewed")?;

        Ok(Movie {
            id,
            title: row.get("title")?,
            personal_rating: row.get("personal_rating")?,
            imdb_rating: row.get("imdb_rating")?,
            file_link: row.get("file_link")?,
            last_viewed: read_last_viewed(id, last_viewed_raw.as_deref()),
            categories: Vec::new(),
        })
    }

    fn load_categories(conn: &Connection, movies: &mut [Movie]) -> AppResult<()> {
        for movie in movies.iter_mut() {
            movie.categories = relation::categories_for_movie(conn, movie.id)?;
        }
        Ok(())
    }
}

/// Stored dates longer than `YYYY-MM-DD` keep their leading date; anything
/// unreadable becomes "never viewed".
fn read_last_viewed(movie_id: i64, raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?;
    let parsed = parse_calendar_date(raw);
    if parsed.is_none() && !raw.trim().is_empty() {
        log::warn!("Movie {} has unreadable last_viewed {:?}; treating as absent", movie_id, raw);
    }
    parsed
}

fn write_last_viewed(date: Option<NaiveDate>) -> Option<String> {
    date.map(format_calendar_date)
}

impl MovieRepository for SqliteMovieRepository {
    /// Loads every movie and its categories inside one read transaction on a
    /// single pooled connection.
    fn list_all(&self) -> AppResult<Vec<Movie>> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        let mut movies: Vec<Movie> = {
            let mut stmt =
                tx.prepare(&format!("SELECT {} FROM movies ORDER BY id", MOVIE_COLUMNS))?;
            let rows = stmt
                .query_map([], Self::row_to_movie)?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        };

        Self::load_categories(&tx, &mut movies)?;
        tx.commit()?;

        Ok(movies)
    }

    fn get_by_id(&self, id: i64) -> AppResult<Option<Movie>> {
        let conn = self.pool.get()?;

        let movie = conn
            .query_row(
                &format!("SELECT {} FROM movies WHERE id = ?1", MOVIE_COLUMNS),
                params![id],
                Self::row_to_movie,
            )
            .optional()?;

        match movie {
            Some(mut movie) => {
                movie.categories = relation::categories_for_movie(&conn, movie.id)?;
                Ok(Some(movie))
            }
            None => Ok(None),
        }
    }

    fn create(&self, movie: &NewMovie, category_ids: &[i64]) -> AppResult<Movie> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        let last_viewed = movie.last_viewed_date();

        tx.execute(
            "INSERT INTO movies (title, personal_rating, imdb_rating, file_link, last_viewed)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                movie.title,
                movie.personal_rating,
                movie.imdb_rating,
                movie.file_link,
                write_last_viewed(last_viewed),
            ],
        )?;

        let id = tx.last_insert_rowid();
        if id <= 0 {
            return Err(AppError::MissingGeneratedId("movie"));
        }

        relation::link(&tx, id, category_ids)?;
        let categories = relation::categories_for_movie(&tx, id)?;

        tx.commit()?;

        log::debug!("Created movie {} ({:?}) with {} categories", id, movie.title, categories.len());

        Ok(Movie {
            id,
            title: movie.title.clone(),
            personal_rating: movie.personal_rating,
            imdb_rating: movie.imdb_rating,
            file_link: movie.file_link.clone(),
            last_viewed,
            categories,
        })
    }

    /// Overwrites the scalar fields and replaces the whole category set.
    fn update(&self, movie: &Movie, category_ids: &[i64]) -> AppResult<()> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        let rows_affected = tx.execute(
            "UPDATE movies
             SET title = ?1,
                 personal_rating = ?2,
                 imdb_rating = ?3,
                 file_link = ?4,
                 last_viewed = ?5
             WHERE id = ?6",
            params![
                movie.title,
                movie.personal_rating,
                movie.imdb_rating,
                movie.file_link,
                write_last_viewed(movie.last_viewed),
                movie.id,
            ],
        )?;

        if rows_affected == 0 {
            return Err(AppError::movie_not_found(movie.id));
        }

        relation::unlink(&tx, movie.id)?;
        relation::link(&tx, movie.id, category_ids)?;

        tx.commit()?;

        log::debug!("Updated movie {}", movie.id);
        Ok(())
    }

    fn delete(&self, id: i64) -> AppResult<()> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        let unlinked = relation::unlink(&tx, id)?;
        let rows_affected = tx.execute("DELETE FROM movies WHERE id = ?1", params![id])?;

        if rows_affected == 0 {
            return Err(AppError::movie_not_found(id));
        }

        tx.commit()?;

        log::debug!("Deleted movie {} and {} category links", id, unlinked);
        Ok(())
    }

    fn touch_last_viewed(&self, id: i64, date: NaiveDate) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "UPDATE movies SET last_viewed = ?1 WHERE id = ?2",
            params![format_calendar_date(date), id],
        )?;

        if rows_affected == 0 {
            return Err(AppError::movie_not_found(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::get_connection;
    use crate::domain::Category;
    use crate::repositories::category_repository::{CategoryRepository, SqliteCategoryRepository};
    use crate::repositories::test_support::temp_pool;

    struct Fixture {
        pool: Arc<ConnectionPool>,
        movies: SqliteMovieRepository,
        categories: SqliteCategoryRepository,
        _dir: tempfile::TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let (dir, pool) = temp_pool();
            Self {
                movies: SqliteMovieRepository::new(pool.clone()),
                categories: SqliteCategoryRepository::new(pool.clone()),
                pool,
                _dir: dir,
            }
        }

        fn category(&self, name: &str) -> Category {
            self.categories.create(name).unwrap()
        }

        fn relation_rows(&self, movie_id: i64) -> usize {
            let conn = get_connection(&self.pool).unwrap();
            relation::count_for_movie(&conn, movie_id).unwrap()
        }

        fn total_relation_rows(&self) -> i64 {
            let conn = get_connection(&self.pool).unwrap();
            conn.query_row("SELECT COUNT(*) FROM category_movies", [], |row| row.get(0))
                .unwrap()
        }
    }

    fn draft(title: &str) -> NewMovie {
        NewMovie::new(title, 7.0, 7.5, format!("/movies/{}.mp4", title.to_lowercase()))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_create_with_any_number_of_categories() {
        let fx = Fixture::new();
        let ids: Vec<i64> = ["Action", "Drama", "Crime"]
            .iter()
            .map(|name| fx.category(name).id)
            .collect();

        for n in [0usize, 1, 3] {
            let created = fx
                .movies
                .create(&draft(&format!("Movie{}", n)), &ids[..n])
                .unwrap();

            let listed = fx.movies.list_all().unwrap();
            let reloaded = listed.iter().find(|m| m.id == created.id).unwrap();

            assert_eq!(reloaded.category_ids(), ids[..n].to_vec());
            assert_eq!(reloaded, &created);
        }
    }

    #[test]
    fn test_create_returns_stored_movie() {
        let fx = Fixture::new();
        let action = fx.category("Action");

        let movie = fx.movies.create(&draft("Heat"), &[action.id]).unwrap();

        assert!(movie.id > 0);
        assert_eq!(movie.title, "Heat");
        assert_eq!(movie.categories, vec![action]);
        assert_eq!(fx.movies.get_by_id(movie.id).unwrap(), Some(movie));
    }

    #[test]
    fn test_create_rolls_back_on_unknown_category() {
        let fx = Fixture::new();
        let action = fx.category("Action");

        let result = fx.movies.create(&draft("Heat"), &[action.id, 9999]);

        assert!(matches!(result, Err(AppError::NotFound { entity: "Category", id: 9999 })));
        assert!(fx.movies.list_all().unwrap().is_empty());
        assert_eq!(fx.total_relation_rows(), 0);
    }

    #[test]
    fn test_create_rolls_back_on_storage_failure_after_insert() {
        let fx = Fixture::new();
        let action = fx.category("Action");
        {
            let conn = get_connection(&fx.pool).unwrap();
            conn.execute_batch(
                "CREATE TRIGGER reject_links BEFORE INSERT ON category_movies
                 BEGIN SELECT RAISE(ABORT, 'simulated failure'); END;",
            )
            .unwrap();
        }

        let result = fx.movies.create(&draft("Heat"), &[action.id]);

        let err = result.unwrap_err();
        assert!(err.is_persistence(), "unexpected error: {}", err);
        assert!(fx.movies.list_all().unwrap().is_empty());
        assert_eq!(fx.total_relation_rows(), 0);
    }

    #[test]
    fn test_update_replaces_category_set() {
        let fx = Fixture::new();
        let action = fx.category("Action");
        let drama = fx.category("Drama");
        let crime = fx.category("Crime");
        let mut movie = fx.movies.create(&draft("Heat"), &[action.id, drama.id]).unwrap();

        movie.title = "Heat (1995)".to_string();
        movie.personal_rating = 9.0;
        fx.movies.update(&movie, &[crime.id]).unwrap();

        let reloaded = fx.movies.get_by_id(movie.id).unwrap().unwrap();
        assert_eq!(reloaded.title, "Heat (1995)");
        assert_eq!(reloaded.personal_rating, 9.0);
        assert_eq!(reloaded.categories, vec![crime]);
        assert_eq!(fx.relation_rows(movie.id), 1);
    }

    #[test]
    fn test_update_to_empty_set() {
        let fx = Fixture::new();
        let action = fx.category("Action");
        let movie = fx.movies.create(&draft("Heat"), &[action.id]).unwrap();

        fx.movies.update(&movie, &[]).unwrap();

        assert_eq!(fx.relation_rows(movie.id), 0);
        assert!(fx.movies.list_all().unwrap()[0].categories.is_empty());
    }

    #[test]
    fn test_update_failure_keeps_previous_state() {
        let fx = Fixture::new();
        let action = fx.category("Action");
        let movie = fx.movies.create(&draft("Heat"), &[action.id]).unwrap();

        let mut changed = movie.clone();
        changed.title = "Changed".to_string();
        let result = fx.movies.update(&changed, &[404]);

        assert!(matches!(result, Err(AppError::NotFound { entity: "Category", .. })));
        assert_eq!(fx.movies.get_by_id(movie.id).unwrap(), Some(movie));
    }

    #[test]
    fn test_update_missing_movie_is_not_found() {
        let fx = Fixture::new();
        let ghost = draft("Ghost").into_movie(31, Vec::new());

        let result = fx.movies.update(&ghost, &[]);
        assert!(matches!(result, Err(AppError::NotFound { entity: "Movie", id: 31 })));
    }

    #[test]
    fn test_delete_removes_relation_rows() {
        let fx = Fixture::new();
        let action = fx.category("Action");
        let drama = fx.category("Drama");
        let heat = fx.movies.create(&draft("Heat"), &[action.id, drama.id]).unwrap();
        let alien = fx.movies.create(&draft("Alien"), &[drama.id]).unwrap();

        fx.movies.delete(heat.id).unwrap();

        assert_eq!(fx.relation_rows(heat.id), 0);
        let remaining = fx.movies.list_all().unwrap();
        assert_eq!(remaining, vec![alien]);
    }

    #[test]
    fn test_delete_rolls_back_on_storage_failure() {
        let fx = Fixture::new();
        let action = fx.category("Action");
        let drama = fx.category("Drama");
        let heat = fx.movies.create(&draft("Heat"), &[action.id, drama.id]).unwrap();
        {
            let conn = get_connection(&fx.pool).unwrap();
            conn.execute_batch(
                "CREATE TRIGGER reject_movie_delete BEFORE DELETE ON movies
                 BEGIN SELECT RAISE(ABORT, 'simulated failure'); END;",
            )
            .unwrap();
        }

        let err = fx.movies.delete(heat.id).unwrap_err();

        assert!(err.is_persistence(), "unexpected error: {}", err);
        assert_eq!(fx.movies.get_by_id(heat.id).unwrap(), Some(heat.clone()));
        assert_eq!(fx.relation_rows(heat.id), 2);
    }

    #[test]
    fn test_delete_missing_movie_is_not_found() {
        let fx = Fixture::new();
        let result = fx.movies.delete(12);
        assert!(matches!(result, Err(AppError::NotFound { entity: "Movie", id: 12 })));
    }

    #[test]
    fn test_deleting_category_keeps_movies() {
        let fx = Fixture::new();
        let action = fx.category("Action");
        let drama = fx.category("Drama");
        fx.movies.create(&draft("Heat"), &[action.id, drama.id]).unwrap();
        fx.movies.create(&draft("Alien"), &[action.id]).unwrap();

        fx.categories.delete(action.id).unwrap();

        let movies = fx.movies.list_all().unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].categories, vec![drama]);
        assert!(movies[1].categories.is_empty());
    }

    #[test]
    fn test_last_viewed_datetime_input_keeps_date() {
        let fx = Fixture::new();

        let movie = fx
            .movies
            .create(&draft("Heat").with_last_viewed("2024-03-05 10:00:00"), &[])
            .unwrap();

        let reloaded = fx.movies.get_by_id(movie.id).unwrap().unwrap();
        assert_eq!(reloaded.last_viewed, Some(date(2024, 3, 5)));

        let conn = get_connection(&fx.pool).unwrap();
        let stored: String = conn
            .query_row("SELECT last_viewed FROM movies WHERE id = ?1", [movie.id], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(stored, "2024-03-05");
    }

    #[test]
    fn test_blank_or_garbage_last_viewed_stored_as_null() {
        let fx = Fixture::new();

        for raw in ["", "   ", "someday"] {
            let movie = fx.movies.create(&draft("Heat").with_last_viewed(raw), &[]).unwrap();
            assert_eq!(movie.last_viewed, None);

            let conn = get_connection(&fx.pool).unwrap();
            let stored: Option<String> = conn
                .query_row("SELECT last_viewed FROM movies WHERE id = ?1", [movie.id], |row| {
                    row.get(0)
                })
                .unwrap();
            assert_eq!(stored, None);
        }
    }

    #[test]
    fn test_reading_stored_datetime_and_garbage() {
        let fx = Fixture::new();
        {
            let conn = get_connection(&fx.pool).unwrap();
            conn.execute_batch(
                "INSERT INTO movies (title, file_link, last_viewed) VALUES ('A', '/a.mp4', '2021-06-01 08:30:00');
                 INSERT INTO movies (title, file_link, last_viewed) VALUES ('B', '/b.mp4', 'garbage');",
            )
            .unwrap();
        }

        let movies = fx.movies.list_all().unwrap();
        assert_eq!(movies[0].last_viewed, Some(date(2021, 6, 1)));
        assert_eq!(movies[1].last_viewed, None);
    }

    #[test]
    fn test_touch_last_viewed() {
        let fx = Fixture::new();
        let movie = fx.movies.create(&draft("Heat"), &[]).unwrap();

        fx.movies.touch_last_viewed(movie.id, date(2025, 1, 2)).unwrap();

        let reloaded = fx.movies.get_by_id(movie.id).unwrap().unwrap();
        assert_eq!(reloaded.last_viewed, Some(date(2025, 1, 2)));

        let result = fx.movies.touch_last_viewed(movie.id + 1, date(2025, 1, 2));
        assert!(matches!(result, Err(AppError::NotFound { entity: "Movie", .. })));
    }

    #[test]
    fn test_get_by_id_missing() {
        let fx = Fixture::new();
        assert_eq!(fx.movies.get_by_id(1).unwrap(), None);
    }
}
