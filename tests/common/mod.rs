#![allow(dead_code)]

use axum::{
    Router,
    body::{self, Body},
    http::{HeaderMap, Request, StatusCode, header},
};
use chrono::{Duration, Utc};
use tower::ServiceExt; // for `oneshot`
use uuid::Uuid;

use venue_booking::{
    db::entities::{artist, show, venue},
    forms::{ArtistInput, ShowInput, VenueInput},
    services::ServiceContext,
    state::AppState,
};

pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl Reply {
    pub fn location(&self) -> &str {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
    }

    pub fn is_html(&self) -> bool {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.contains("text/html"))
            .unwrap_or(false)
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> Reply {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router should respond");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    Reply {
        status,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}

pub async fn get(app: &Router, uri: &str) -> Reply {
    let request = Request::get(uri).body(Body::empty()).expect("request");
    send(app, request).await
}

pub async fn delete(app: &Router, uri: &str) -> Reply {
    let request = Request::delete(uri).body(Body::empty()).expect("request");
    send(app, request).await
}

pub async fn post_form(app: &Router, uri: &str, fields: &[(&str, &str)]) -> Reply {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(encode_form(fields)))
        .expect("request");
    send(app, request).await
}

pub fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

pub fn venue_input(name: &str, city: &str, state: &str) -> VenueInput {
    VenueInput {
        name: name.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        address: "1015 Folsom Street".to_string(),
        phone: Some("123-123-1234".to_string()),
        image_link: None,
        facebook_link: None,
        website_link: None,
        seeking_talent: false,
        seeking_description: None,
    }
}

pub fn artist_input(name: &str, genres: &str) -> ArtistInput {
    ArtistInput {
        name: name.to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        phone: None,
        genres: genres.to_string(),
        image_link: None,
        facebook_link: None,
        website_link: None,
        seeking_venue: false,
        seeking_description: None,
    }
}

pub async fn seed_venue(state: &AppState, name: &str, city: &str, code: &str) -> venue::Model {
    ServiceContext::from_state(state)
        .venue()
        .create(venue_input(name, city, code))
        .await
        .expect("seed venue")
}

pub async fn seed_artist(state: &AppState, name: &str) -> artist::Model {
    ServiceContext::from_state(state)
        .artist()
        .create(artist_input(name, "Rock n Roll"))
        .await
        .expect("seed artist")
}

/// Books a show `days` from now; negative values land in the past.
pub async fn seed_show(state: &AppState, venue_id: Uuid, artist_id: Uuid, days: i64) -> show::Model {
    ServiceContext::from_state(state)
        .show()
        .create(ShowInput {
            venue_id,
            artist_id,
            start_time: (Utc::now() + Duration::days(days)).fixed_offset(),
        })
        .await
        .expect("seed show")
}
