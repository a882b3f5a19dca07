//! Read models returned by the services and rendered by the pages.

use sea_orm::entity::prelude::DateTimeWithTimeZone;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    db::entities::{artist, venue},
    presentation::{DateFormat, format_datetime},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueSummary {
    pub id: Uuid,
    pub name: String,
    pub shows_count: u64,
    pub num_upcoming_shows: u64,
}

/// Venues sharing one exact `(city, state)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueArea {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistSummary {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: Uuid,
    pub name: String,
    pub num_upcoming_shows: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
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

/// A show on a venue page: who plays and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistAppearance {
    pub artist_id: Uuid,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTimeWithTimeZone,
}

impl ArtistAppearance {
    pub fn start_time_display(&self) -> String {
        format_datetime(&self.start_time, DateFormat::Full)
    }
}

/// A show on an artist page: where it is and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueBooking {
    pub venue_id: Uuid,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTimeWithTimeZone,
}

impl VenueBooking {
    pub fn start_time_display(&self) -> String {
        format_datetime(&self.start_time, DateFormat::Full)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowListing {
    pub show_id: Uuid,
    pub venue_id: Uuid,
    pub venue_name: String,
    pub artist_id: Uuid,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTimeWithTimeZone,
}

impl ShowListing {
    pub fn start_time_display(&self) -> String {
        format_datetime(&self.start_time, DateFormat::Full)
    }
}

/// Past and upcoming shows of one venue or artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowSplit<T> {
    pub past_shows: Vec<T>,
    pub upcoming_shows: Vec<T>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl<T> ShowSplit<T> {
    pub fn new(past_shows: Vec<T>, upcoming_shows: Vec<T>) -> Self {
        Self {
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

/// A venue or artist on the home page's recently listed columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentListing {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub state: String,
    pub listed_on: String,
}

impl From<&venue::Model> for RecentListing {
    fn from(venue: &venue::Model) -> Self {
        Self {
            id: venue.id,
            name: venue.name.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            listed_on: format_datetime(&venue.created_at, DateFormat::Medium),
        }
    }
}

impl From<&artist::Model> for RecentListing {
    fn from(artist: &artist::Model) -> Self {
        Self {
            id: artist.id,
            name: artist.name.clone(),
            city: artist.city.clone(),
            state: artist.state.clone(),
            listed_on: format_datetime(&artist.created_at, DateFormat::Medium),
        }
    }
}
