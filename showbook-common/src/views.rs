//! Typed view-models handed to the presentation layer
//!
//! Every page renders from one of these structs. The grouping and
//! past/upcoming partitioning live here as plain functions so they can be
//! tested without a database.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::db::{Artist, Venue};
use crate::time::{format_show_time, ShowTiming};

/// Venue entry inside a city listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueListItem {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// All venues sharing one (city, state)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueArea {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueListItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistListItem {
    pub id: i64,
    pub name: String,
}

/// One name-search match, for venues and artists alike
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<SearchHit>,
}

impl SearchResults {
    pub fn new(data: Vec<SearchHit>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// A show as listed on a venue page (counterpart is the artist)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueShow {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

/// A show as listed on an artist page (counterpart is the venue)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistShow {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: String,
}

/// Row of the all-shows listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowListing {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

/// Id/name pair for select inputs
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Choice {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueDetail {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<VenueShow>,
    pub upcoming_shows: Vec<VenueShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl VenueDetail {
    pub fn new(venue: Venue, shows: Partitioned<VenueShow>) -> Self {
        Self {
            id: venue.id,
            name: venue.name,
            genres: venue.genres,
            address: venue.address,
            city: venue.city,
            state: venue.state,
            phone: venue.phone,
            website: venue.website,
            facebook_link: venue.facebook_link,
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description,
            image_link: venue.image_link,
            past_shows_count: shows.past.len(),
            upcoming_shows_count: shows.upcoming.len(),
            past_shows: shows.past,
            upcoming_shows: shows.upcoming,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistDetail {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<ArtistShow>,
    pub upcoming_shows: Vec<ArtistShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl ArtistDetail {
    pub fn new(artist: Artist, shows: Partitioned<ArtistShow>) -> Self {
        Self {
            id: artist.id,
            name: artist.name,
            genres: artist.genres,
            city: artist.city,
            state: artist.state,
            phone: artist.phone,
            website: artist.website,
            facebook_link: artist.facebook_link,
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description,
            image_link: artist.image_link,
            past_shows_count: shows.past.len(),
            upcoming_shows_count: shows.upcoming.len(),
            past_shows: shows.past,
            upcoming_shows: shows.upcoming,
        }
    }
}

/// Shows split into past and upcoming, each in input order
#[derive(Debug, Clone, PartialEq)]
pub struct Partitioned<T> {
    pub past: Vec<T>,
    pub upcoming: Vec<T>,
}

impl<T> Default for Partitioned<T> {
    fn default() -> Self {
        Self {
            past: Vec::new(),
            upcoming: Vec::new(),
        }
    }
}

/// Split `(start_time, entry)` pairs around `now`
///
/// `make` receives the formatted start time.
pub fn partition_shows<R, T>(
    rows: impl IntoIterator<Item = (NaiveDateTime, R)>,
    now: NaiveDateTime,
    make: impl Fn(R, String) -> T,
) -> Partitioned<T> {
    let mut out = Partitioned::default();
    for (start_time, row) in rows {
        let entry = make(row, format_show_time(start_time));
        match ShowTiming::classify(start_time, now) {
            ShowTiming::Past => out.past.push(entry),
            ShowTiming::Upcoming => out.upcoming.push(entry),
        }
    }
    out
}

/// Case-insensitive substring match on a name
///
/// Folds full Unicode case, so `ÉLYSÉE` finds `Café Élysée`. An empty term
/// matches every name.
pub fn name_matches(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}

/// Group venues into (city, state) buckets, preserving first-seen order
pub fn group_by_area(
    venues: impl IntoIterator<Item = (String, String, VenueListItem)>,
) -> Vec<VenueArea> {
    let mut areas: Vec<VenueArea> = Vec::new();

    for (city, state, item) in venues {
        match areas
            .iter_mut()
            .find(|area| area.city == city && area.state == state)
        {
            Some(area) => area.venues.push(item),
            None => areas.push(VenueArea {
                city,
                state,
                venues: vec![item],
            }),
        }
    }

    areas
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn item(id: i64) -> VenueListItem {
        VenueListItem {
            id,
            name: format!("Venue {}", id),
            num_upcoming_shows: 0,
        }
    }

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2030, 6, day)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_group_by_area_preserves_first_seen_order() {
        let areas = group_by_area(vec![
            ("San Francisco".into(), "CA".into(), item(1)),
            ("New York".into(), "NY".into(), item(2)),
            ("San Francisco".into(), "CA".into(), item(3)),
        ]);

        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].city, "San Francisco");
        assert_eq!(
            areas[0].venues.iter().map(|v| v.id).collect::<Vec<_>>(),
            vec![1, 3]
        );
        assert_eq!(areas[1].city, "New York");
        assert_eq!(areas[1].venues[0].id, 2);
    }

    #[test]
    fn test_group_by_area_same_city_different_state() {
        let areas = group_by_area(vec![
            ("Portland".into(), "OR".into(), item(1)),
            ("Portland".into(), "ME".into(), item(2)),
        ]);

        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].state, "OR");
        assert_eq!(areas[1].state, "ME");
    }

    #[test]
    fn test_group_by_area_empty() {
        assert!(group_by_area(Vec::new()).is_empty());
    }

    #[test]
    fn test_partition_shows() {
        let now = at(15);
        let parts = partition_shows(
            vec![(at(1), "a"), (at(15), "b"), (at(30), "c")],
            now,
            |name, when| format!("{name}@{when}"),
        );

        assert_eq!(parts.past, vec!["a@June 01 2030 - 20:00:00".to_string()]);
        assert_eq!(parts.upcoming.len(), 2);
        assert!(parts.upcoming[0].starts_with("b@"));
        assert!(parts.upcoming[1].starts_with("c@"));
    }

    #[test]
    fn test_search_results_count_matches_len() {
        let results = SearchResults::new(vec![
            SearchHit { id: 1, name: "A".into(), num_upcoming_shows: 0 },
            SearchHit { id: 2, name: "B".into(), num_upcoming_shows: 3 },
        ]);
        assert_eq!(results.count, 2);
    }

    #[test]
    fn test_name_matches_folds_unicode_case() {
        assert!(name_matches("Café Élysée", "ÉLYSÉE"));
        assert!(name_matches("Café Élysée", "élysée"));
        assert!(name_matches("The Musical Hop", "musical"));
        assert!(name_matches("The Musical Hop", ""));
        assert!(!name_matches("The Musical Hop", "jazz"));
    }
}
