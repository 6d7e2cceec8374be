// src/services/staleness.rs
//
// Staleness Evaluator - advisory only. It reports candidates for removal and
// never deletes anything.

use chrono::{Months, NaiveDate};

use crate::domain::Movie;

/// Movies rated below this are candidates
pub const STALE_RATING_THRESHOLD: f64 = 6.0;

/// ...when not watched for longer than this
pub const STALE_AFTER_YEARS: u32 = 2;

/// Latest last-viewed date that still counts as recent.
/// Feb 29 minus whole years lands on Feb 28.
pub fn stale_cutoff(as_of: NaiveDate) -> NaiveDate {
    as_of
        .checked_sub_months(Months::new(STALE_AFTER_YEARS * 12))
        .unwrap_or(NaiveDate::MIN)
}

/// Low personal rating and last viewed strictly before the cutoff.
/// A movie that was never viewed is not stale.
pub fn is_stale(movie: &Movie, as_of: NaiveDate) -> bool {
    is_stale_before(movie, stale_cutoff(as_of))
}

pub fn find_stale<'a>(movies: &'a [Movie], as_of: NaiveDate) -> Vec<&'a Movie> {
    let cutoff = stale_cutoff(as_of);
    movies
        .iter()
        .filter(|movie| is_stale_before(movie, cutoff))
        .collect()
}

fn is_stale_before(movie: &Movie, cutoff: NaiveDate) -> bool {
    movie.personal_rating < STALE_RATING_THRESHOLD
        && movie.last_viewed.is_some_and(|viewed| viewed < cutoff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use crate::domain::NewMovie;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn movie(personal_rating: f64, last_viewed: Option<NaiveDate>) -> Movie {
        let mut movie = NewMovie::new("Cats", personal_rating, 2.8, "/m/cats.mp4")
            .into_movie(1, Vec::new());
        movie.last_viewed = last_viewed;
        movie
    }

    #[test]
    fn test_cutoff_is_two_calendar_years() {
        assert_eq!(stale_cutoff(date(2025, 6, 15)), date(2023, 6, 15));
        assert_eq!(stale_cutoff(date(2024, 2, 29)), date(2022, 2, 28));
    }

    #[test]
    fn test_boundary_is_strict() {
        let as_of = date(2025, 6, 15);
        let cutoff = stale_cutoff(as_of);

        let just_inside = movie(5.0, Some(cutoff + Duration::days(1)));
        let on_cutoff = movie(5.0, Some(cutoff));
        let just_outside = movie(5.0, Some(cutoff - Duration::days(1)));

        assert!(!is_stale(&just_inside, as_of));
        assert!(!is_stale(&on_cutoff, as_of));
        assert!(is_stale(&just_outside, as_of));
    }

    #[test]
    fn test_rating_threshold_is_strict() {
        let as_of = date(2025, 6, 15);
        let long_ago = Some(date(2020, 1, 1));

        assert!(is_stale(&movie(5.9, long_ago), as_of));
        assert!(!is_stale(&movie(6.0, long_ago), as_of));
        assert!(!is_stale(&movie(9.0, long_ago), as_of));
    }

    #[test]
    fn test_never_viewed_is_never_stale() {
        let as_of = date(2025, 6, 15);
        for rating in [0.0, 3.0, 5.99] {
            assert!(!is_stale(&movie(rating, None), as_of));
        }
    }

    #[test]
    fn test_nan_rating_is_not_stale() {
        let as_of = date(2025, 6, 15);
        assert!(!is_stale(&movie(f64::NAN, Some(date(2000, 1, 1))), as_of));
    }

    #[test]
    fn test_find_stale_keeps_order() {
        let as_of = date(2025, 6, 15);
        let mut movies = vec![
            movie(2.0, Some(date(2019, 1, 1))),
            movie(8.0, Some(date(2019, 1, 1))),
            movie(4.0, None),
            movie(5.5, Some(date(2022, 12, 31))),
            movie(5.5, Some(date(2025, 1, 1))),
        ];
        for (i, m) in movies.iter_mut().enumerate() {
            m.id = i as i64 + 1;
        }

        let stale: Vec<i64> = find_stale(&movies, as_of).iter().map(|m| m.id).collect();
        assert_eq!(stale, vec![1, 4]);
    }
}
