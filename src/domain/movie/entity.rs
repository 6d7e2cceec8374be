use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::calendar::{normalize_date_input, parse_calendar_date};
use crate::domain::category::Category;

/// A catalog entry: ratings, a playable reference and its categories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Identifier assigned by storage
    pub id: i64,

    pub title: String,

    /// Rating given by the user
    pub personal_rating: f64,

    /// External reference score
    pub imdb_rating: f64,

    /// Local path or URL
    pub file_link: String,

    /// Absent until the movie is first played
    pub last_viewed: Option<NaiveDate>,

    /// Linked categories, in link order
    pub categories: Vec<Category>,
}

impl Movie {
    /// Category names joined with ", " (empty when there are none)
    pub fn categories_as_string(&self) -> String {
        self.categories
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn category_ids(&self) -> Vec<i64> {
        self.categories.iter().map(|c| c.id).collect()
    }

    pub fn has_category(&self, category_id: i64) -> bool {
        self.categories.iter().any(|c| c.id == category_id)
    }

    /// Overwrite the fields that are `Some`; categories are handled by storage
    pub fn update_details(
        &mut self,
        title: Option<String>,
        personal_rating: Option<f64>,
        imdb_rating: Option<f64>,
        file_link: Option<String>,
        last_viewed: Option<Option<NaiveDate>>,
    ) {
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(rating) = personal_rating {
            self.personal_rating = rating;
        }
        if let Some(rating) = imdb_rating {
            self.imdb_rating = rating;
        }
        if let Some(link) = file_link {
            self.file_link = link;
        }
        if let Some(date) = last_viewed {
            self.last_viewed = date;
        }
    }
}

/// Draft of a movie that has not been stored yet.
///
/// `last_viewed` is raw input; it is normalized leniently when written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMovie {
    pub title: String,
    pub personal_rating: f64,
    pub imdb_rating: f64,
    pub file_link: String,
    pub last_viewed: Option<String>,
}

impl NewMovie {
    pub fn new(
        title: impl Into<String>,
        personal_rating: f64,
        imdb_rating: f64,
        file_link: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            personal_rating,
            imdb_rating,
            file_link: file_link.into(),
            last_viewed: None,
        }
    }

    pub fn with_last_viewed(mut self, raw: impl Into<String>) -> Self {
        self.last_viewed = Some(raw.into());
        self
    }

    /// The date that will actually be persisted
    pub fn last_viewed_date(&self) -> Option<NaiveDate> {
        normalize_date_input(self.last_viewed.as_deref())
    }

    /// Materialize the stored movie once storage has assigned its id
    pub fn into_movie(self, id: i64, categories: Vec<Category>) -> Movie {
        let last_viewed = self.last_viewed.as_deref().and_then(parse_calendar_date);
        Movie {
            id,
            title: self.title,
            personal_rating: self.personal_rating,
            imdb_rating: self.imdb_rating,
            file_link: self.file_link,
            last_viewed,
            categories,
        }
    }
}
