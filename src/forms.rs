//! Submitted form payloads and their validation into service inputs.

use chrono::{DateTime, NaiveDateTime, Utc};
use sea_orm::entity::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    db::entities::{artist, venue},
    error::AppError,
};

pub const STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

pub const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

const GENRE_SEPARATOR: &str = ", ";

const START_TIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_talent: Option<String>,
    pub seeking_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: String,
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_venue: Option<String>,
    pub seeking_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: String,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ShowForm {
    pub venue_id: String,
    pub artist_id: String,
    pub start_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowInput {
    pub venue_id: Uuid,
    pub artist_id: Uuid,
    pub start_time: DateTimeWithTimeZone,
}

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

/// Collects field problems so a form reports all of them at once.
#[derive(Default)]
struct Problems(Vec<String>);

impl Problems {
    fn required(&mut self, label: &str, value: &str) {
        if value.trim().is_empty() {
            self.0.push(format!("{label} is required"));
        }
    }

    fn state(&mut self, value: &str) {
        if !value.trim().is_empty() && !STATES.contains(&value) {
            self.0.push(format!("State '{value}' is not a valid choice"));
        }
    }

    fn link(&mut self, label: &str, value: &str) {
        let value = value.trim();
        if !value.is_empty() && !value.starts_with("http://") && !value.starts_with("https://") {
            self.0.push(format!("{label} must be an http(s) URL"));
        }
    }

    fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, AppError> {
        if self.0.is_empty() {
            Ok(value())
        } else {
            Err(AppError::validation(self.0))
        }
    }
}

impl VenueForm {
    pub fn validate(&self) -> Result<VenueInput, AppError> {
        let mut problems = Problems::default();
        problems.required("Name", &self.name);
        problems.required("City", &self.city);
        problems.required("State", &self.state);
        problems.state(&self.state);
        problems.required("Address", &self.address);
        problems.link("Image link", &self.image_link);
        problems.link("Facebook link", &self.facebook_link);
        problems.link("Website link", &self.website_link);

        problems.finish(|| VenueInput {
            name: self.name.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            address: self.address.clone(),
            phone: optional(&self.phone),
            image_link: optional(&self.image_link),
            facebook_link: optional(&self.facebook_link),
            website_link: optional(&self.website_link),
            seeking_talent: checked(self.seeking_talent.as_deref()),
            seeking_description: optional(&self.seeking_description),
        })
    }

    pub fn seeking_talent(&self) -> bool {
        checked(self.seeking_talent.as_deref())
    }

    pub fn is_state(&self, code: &str) -> bool {
        self.state == code
    }
}

impl From<&venue::Model> for VenueForm {
    fn from(model: &venue::Model) -> Self {
        Self {
            name: model.name.clone(),
            city: model.city.clone(),
            state: model.state.clone(),
            address: model.address.clone(),
            phone: model.phone.clone().unwrap_or_default(),
            image_link: model.image_link.clone().unwrap_or_default(),
            facebook_link: model.facebook_link.clone().unwrap_or_default(),
            website_link: model.website_link.clone().unwrap_or_default(),
            seeking_talent: model.seeking_talent.then(|| "y".to_string()),
            seeking_description: model.seeking_description.clone().unwrap_or_default(),
        }
    }
}

impl ArtistForm {
    pub fn validate(&self) -> Result<ArtistInput, AppError> {
        let mut problems = Problems::default();
        problems.required("Name", &self.name);
        problems.required("City", &self.city);
        problems.required("State", &self.state);
        problems.state(&self.state);
        for genre in &self.genres {
            if !GENRES.contains(&genre.as_str()) {
                problems.0.push(format!("Genre '{genre}' is not a valid choice"));
            }
        }
        problems.link("Image link", &self.image_link);
        problems.link("Facebook link", &self.facebook_link);
        problems.link("Website link", &self.website_link);

        problems.finish(|| ArtistInput {
            name: self.name.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            phone: optional(&self.phone),
            genres: self.genres.join(GENRE_SEPARATOR),
            image_link: optional(&self.image_link),
            facebook_link: optional(&self.facebook_link),
            website_link: optional(&self.website_link),
            seeking_venue: checked(self.seeking_venue.as_deref()),
            seeking_description: optional(&self.seeking_description),
        })
    }

    pub fn seeking_venue(&self) -> bool {
        checked(self.seeking_venue.as_deref())
    }

    pub fn is_state(&self, code: &str) -> bool {
        self.state == code
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|picked| picked == genre)
    }
}

impl From<&artist::Model> for ArtistForm {
    fn from(model: &artist::Model) -> Self {
        Self {
            name: model.name.clone(),
            city: model.city.clone(),
            state: model.state.clone(),
            phone: model.phone.clone().unwrap_or_default(),
            genres: model.genre_list().into_iter().map(str::to_string).collect(),
            image_link: model.image_link.clone().unwrap_or_default(),
            facebook_link: model.facebook_link.clone().unwrap_or_default(),
            website_link: model.website_link.clone().unwrap_or_default(),
            seeking_venue: model.seeking_venue.then(|| "y".to_string()),
            seeking_description: model.seeking_description.clone().unwrap_or_default(),
        }
    }
}

impl ShowForm {
    pub fn validate(&self) -> Result<ShowInput, AppError> {
        let mut problems = Problems::default();
        let venue_id = parse_id(&mut problems, "Venue ID", &self.venue_id);
        let artist_id = parse_id(&mut problems, "Artist ID", &self.artist_id);
        let start_time = match parse_start_time(&self.start_time) {
            Some(start_time) => Some(start_time),
            None => {
                problems
                    .0
                    .push(format!("Start time '{}' is not a valid date and time", self.start_time.trim()));
                None
            }
        };

        match (venue_id, artist_id, start_time) {
            (Some(venue_id), Some(artist_id), Some(start_time)) => Ok(ShowInput {
                venue_id,
                artist_id,
                start_time,
            }),
            _ => Err(AppError::validation(problems.0)),
        }
    }
}

fn parse_id(problems: &mut Problems, label: &str, value: &str) -> Option<Uuid> {
    let value = value.trim();
    if value.is_empty() {
        problems.0.push(format!("{label} is required"));
        return None;
    }
    match Uuid::parse_str(value) {
        Ok(id) => Some(id),
        Err(_) => {
            problems.0.push(format!("{label} '{value}' is not a valid id"));
            None
        }
    }
}

/// Accepts RFC 3339 or the naive layouts an HTML datetime input produces;
/// naive values are taken as UTC.
pub fn parse_start_time(value: &str) -> Option<DateTimeWithTimeZone> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc).fixed_offset());
    }
    START_TIME_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(value, layout).ok())
        .map(|naive| naive.and_utc().fixed_offset())
}

fn optional(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn checked(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("y" | "on" | "true" | "1")
    )
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn musical_hop() -> VenueForm {
        VenueForm {
            name: "The Musical Hop".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "1015 Folsom Street".to_string(),
            phone: "123-123-1234".to_string(),
            ..VenueForm::default()
        }
    }

    #[test]
    fn venue_form_keeps_submitted_values_and_blanks_become_none() {
        let input = musical_hop().validate().expect("form should be valid");
        assert_eq!(input.name, "The Musical Hop");
        assert_eq!(input.phone.as_deref(), Some("123-123-1234"));
        assert_eq!(input.website_link, None);
        assert!(!input.seeking_talent);
    }

    #[test]
    fn venue_form_reports_every_missing_field() {
        let err = VenueForm::default().validate().expect_err("empty form is invalid");
        let messages = err.messages();
        for label in ["Name", "City", "State", "Address"] {
            assert!(
                messages.contains(&format!("{label} is required")),
                "missing message for {label}: {messages:?}"
            );
        }
    }

    #[test]
    fn venue_form_rejects_unknown_states_and_non_http_links() {
        let form = VenueForm {
            state: "ZZ".to_string(),
            facebook_link: "facebook.com/hop".to_string(),
            ..musical_hop()
        };
        let messages = form.validate().expect_err("form is invalid").messages();
        assert!(messages.iter().any(|m| m.contains("'ZZ'")));
        assert!(messages.iter().any(|m| m.starts_with("Facebook link")));
    }

    #[test]
    fn checkbox_values_are_recognised() {
        for value in ["y", "on", "true", "1", "Y"] {
            let form = VenueForm {
                seeking_talent: Some(value.to_string()),
                ..musical_hop()
            };
            assert!(form.validate().expect("valid").seeking_talent, "{value}");
        }
        let form = VenueForm {
            seeking_talent: Some("no".to_string()),
            ..musical_hop()
        };
        assert!(!form.validate().expect("valid").seeking_talent);
    }

    #[test]
    fn artist_genres_are_joined_and_validated() {
        let form = ArtistForm {
            name: "Guns N Petals".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            genres: vec!["Rock n Roll".to_string(), "Jazz".to_string()],
            ..ArtistForm::default()
        };
        let input = form.validate().expect("form should be valid");
        assert_eq!(input.genres, "Rock n Roll, Jazz");

        let form = ArtistForm {
            genres: vec!["Polka".to_string()],
            ..form
        };
        let messages = form.validate().expect_err("unknown genre").messages();
        assert_eq!(messages, vec!["Genre 'Polka' is not a valid choice".to_string()]);
    }

    #[test]
    fn show_form_parses_ids_and_each_start_time_layout() {
        let venue_id = Uuid::new_v4();
        let artist_id = Uuid::new_v4();
        let expected = Utc
            .with_ymd_and_hms(2035, 4, 1, 20, 0, 0)
            .single()
            .expect("timestamp should be valid")
            .fixed_offset();

        for start_time in [
            "2035-04-01 20:00:00",
            "2035-04-01 20:00",
            "2035-04-01T20:00",
            "2035-04-01T20:00:00Z",
            "2035-04-01T22:00:00+02:00",
        ] {
            let form = ShowForm {
                venue_id: venue_id.to_string(),
                artist_id: artist_id.to_string(),
                start_time: start_time.to_string(),
            };
            let input = form.validate().expect("form should be valid");
            assert_eq!(input.start_time, expected, "{start_time}");
            assert_eq!(input.venue_id, venue_id);
            assert_eq!(input.artist_id, artist_id);
        }
    }

    #[test]
    fn show_form_reports_bad_ids_and_times_together() {
        let form = ShowForm {
            venue_id: "12".to_string(),
            artist_id: String::new(),
            start_time: "next friday".to_string(),
        };
        let messages = form.validate().expect_err("form is invalid").messages();
        assert_eq!(messages.len(), 3, "{messages:?}");
    }
}
