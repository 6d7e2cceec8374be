// src/services/catalog_service.rs
use crate::domain::{
    normalize_date_input, validate_category_name, validate_movie_changes, validate_new_movie,
    Category, Movie, NewMovie,
};
use crate::error::{AppError, AppResult};
use crate::repositories::{CategoryRepository, MovieRepository};
use crate::services::query::MovieFilter;
use crate::services::staleness;
use chrono::{Local, NaiveDate};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct CreateMovieRequest {
    pub title: String,
    pub personal_rating: f64,
    pub imdb_rating: f64,
    pub file_link: String,
    /// Raw text; unreadable input is stored as "never viewed"
    pub last_viewed: Option<String>,
    pub category_ids: Vec<i64>,
}

#[derive(Debug, Clone)]
pub struct UpdateMovieRequest {
    pub movie_id: i64,
    pub title: Option<String>,
    pub personal_rating: Option<f64>,
    pub imdb_rating: Option<f64>,
    pub file_link: Option<String>,
    /// `Some(None)` clears the date; raw text is read like `CreateMovieRequest::last_viewed`
    pub last_viewed: Option<Option<String>>,
    /// `None` keeps the current links; `Some` replaces them exactly
    pub category_ids: Option<Vec<i64>>,
}

pub struct CatalogService {
    movie_repo: Arc<dyn MovieRepository>,
    category_repo: Arc<dyn CategoryRepository>,
}

impl CatalogService {
    pub fn new(
        movie_repo: Arc<dyn MovieRepository>,
        category_repo: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            movie_repo,
            category_repo,
        }
    }

    pub fn list_movies(&self) -> AppResult<Vec<Movie>> {
        self.movie_repo.list_all()
    }

    pub fn get_movie(&self, movie_id: i64) -> AppResult<Movie> {
        self.movie_repo
            .get_by_id(movie_id)?
            .ok_or_else(|| AppError::movie_not_found(movie_id))
    }

    pub fn create_movie(&self, request: CreateMovieRequest) -> AppResult<Movie> {
        let mut draft = NewMovie::new(
            request.title.trim(),
            request.personal_rating,
            request.imdb_rating,
            request.file_link.trim(),
        );
        draft.last_viewed = request.last_viewed;

        validate_new_movie(&draft).map_err(AppError::Domain)?;

        let movie = self.movie_repo.create(&draft, &request.category_ids)?;
        log::info!("Created movie {} ({:?})", movie.id, movie.title);
        Ok(movie)
    }

    pub fn update_movie(&self, request: UpdateMovieRequest) -> AppResult<()> {
        let title = request.title.map(|t| t.trim().to_string());
        let file_link = request.file_link.map(|l| l.trim().to_string());

        validate_movie_changes(
            title.as_deref(),
            file_link.as_deref(),
            request.personal_rating,
            request.imdb_rating,
        )
        .map_err(AppError::Domain)?;

        let mut movie = self.get_movie(request.movie_id)?;

        movie.update_details(
            title,
            request.personal_rating,
            request.imdb_rating,
            file_link,
            request
                .last_viewed
                .map(|raw| normalize_date_input(raw.as_deref())),
        );

        let category_ids = request
            .category_ids
            .unwrap_or_else(|| movie.category_ids());
        self.movie_repo.update(&movie, &category_ids)
    }

    pub fn delete_movie(&self, movie_id: i64) -> AppResult<()> {
        self.movie_repo.delete(movie_id)?;
        log::info!("Deleted movie {}", movie_id);
        Ok(())
    }

    pub fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.category_repo.list_all()
    }

    pub fn create_category(&self, name: &str) -> AppResult<Category> {
        let name = name.trim();
        validate_category_name(name).map_err(AppError::Domain)?;
        self.category_repo.create(name)
    }

    pub fn rename_category(&self, category_id: i64, name: &str) -> AppResult<()> {
        let name = name.trim();
        validate_category_name(name).map_err(AppError::Domain)?;
        self.category_repo.rename(category_id, name)
    }

    /// Removes the category and its links; linked movies stay
    pub fn delete_category(&self, category_id: i64) -> AppResult<()> {
        self.category_repo.delete(category_id)?;
        log::info!("Deleted category {}", category_id);
        Ok(())
    }

    pub fn search_movies(&self, filter: &MovieFilter) -> AppResult<Vec<Movie>> {
        let movies = self.movie_repo.list_all()?;
        if !filter.is_active() {
            return Ok(movies);
        }
        Ok(filter.apply(&movies).into_iter().cloned().collect())
    }

    pub fn stale_movies(&self, as_of: NaiveDate) -> AppResult<Vec<Movie>> {
        let movies = self.movie_repo.list_all()?;
        Ok(staleness::find_stale(&movies, as_of)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn stale_movies_today(&self) -> AppResult<Vec<Movie>> {
        self.stale_movies(today())
    }

    /// Stamp today's local date as the last viewing
    pub fn record_viewing(&self, movie_id: i64) -> AppResult<NaiveDate> {
        let date = today();
        self.record_viewing_on(movie_id, date)?;
        Ok(date)
    }

    pub fn record_viewing_on(&self, movie_id: i64, date: NaiveDate) -> AppResult<()> {
        self.movie_repo.touch_last_viewed(movie_id, date)
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
