mod common;

use axum::http::StatusCode;
use sea_orm::EntityTrait;
use uuid::Uuid;

use common::{get, post_form, seed_artist, seed_show, seed_venue};
use venue_booking::{db::entities::prelude::Show, test_helpers::test_app};

#[tokio::test]
async fn show_with_unknown_references_is_rejected_before_insert() {
    let (state, app) = test_app().await;
    let venue = seed_venue(&state, "The Musical Hop", "San Francisco", "CA").await;
    let missing_artist = Uuid::new_v4();
    let venue_id = venue.id.to_string();
    let artist_id = missing_artist.to_string();

    let page = post_form(
        &app,
        "/shows/create",
        &[
            ("venue_id", venue_id.as_str()),
            ("artist_id", artist_id.as_str()),
            ("start_time", "2035-04-01 20:00:00"),
        ],
    )
    .await;
    assert_eq!(page.status, StatusCode::BAD_REQUEST);
    assert!(page.body.contains(&format!("unknown artist {missing_artist}")));
    assert!(!page.body.contains("unknown venue"));

    let shows = Show::find().all(&state.db).await.expect("load shows");
    assert!(shows.is_empty());
}

#[tokio::test]
async fn malformed_show_form_lists_every_problem() {
    let (state, app) = test_app().await;

    let page = post_form(
        &app,
        "/shows/create",
        &[
            ("venue_id", "venue-one"),
            ("artist_id", ""),
            ("start_time", "next tuesday"),
        ],
    )
    .await;
    assert_eq!(page.status, StatusCode::BAD_REQUEST);
    assert!(page.body.contains("Artist ID is required"));
    assert!(page.body.contains("is not a valid id"));
    assert!(page.body.contains("is not a valid date and time"));

    let shows = Show::find().all(&state.db).await.expect("load shows");
    assert!(shows.is_empty());
}

#[tokio::test]
async fn created_show_is_listed_with_its_artist_and_venue() {
    let (state, app) = test_app().await;
    let venue = seed_venue(&state, "The Musical Hop", "San Francisco", "CA").await;
    let artist = seed_artist(&state, "Guns N Petals").await;
    let venue_id = venue.id.to_string();
    let artist_id = artist.id.to_string();

    let created = post_form(
        &app,
        "/shows/create",
        &[
            ("venue_id", venue_id.as_str()),
            ("artist_id", artist_id.as_str()),
            ("start_time", "2035-04-01T21:00"),
        ],
    )
    .await;
    assert_eq!(created.status, StatusCode::OK);
    assert!(created.body.contains("Show was successfully listed!"));

    let shows = Show::find().all(&state.db).await.expect("load shows");
    assert_eq!(shows.len(), 1);
    assert_eq!(shows[0].venue_id, venue.id);
    assert_eq!(shows[0].artist_id, artist.id);

    let listing = get(&app, "/shows").await;
    assert_eq!(listing.status, StatusCode::OK);
    assert!(listing.body.contains("Guns N Petals"));
    assert!(listing.body.contains("The Musical Hop"));
    assert!(listing.body.contains("Sunday April, 1, 2035 at 9:00PM"));
}

#[tokio::test]
async fn shows_listing_leaves_out_past_shows() {
    let (state, app) = test_app().await;
    let venue = seed_venue(&state, "The Musical Hop", "San Francisco", "CA").await;
    let past_artist = seed_artist(&state, "Matt Quevedo").await;
    let future_artist = seed_artist(&state, "The Wild Sax Band").await;
    seed_show(&state, venue.id, past_artist.id, -7).await;
    seed_show(&state, venue.id, future_artist.id, 7).await;

    let listing = get(&app, "/shows").await;
    assert_eq!(listing.status, StatusCode::OK);
    assert!(listing.body.contains("The Wild Sax Band"));
    assert!(!listing.body.contains("Matt Quevedo"));
}

#[tokio::test]
async fn venue_detail_splits_shows_around_now() {
    let (state, app) = test_app().await;
    let venue = seed_venue(&state, "The Musical Hop", "San Francisco", "CA").await;
    let artist = seed_artist(&state, "Guns N Petals").await;
    seed_show(&state, venue.id, artist.id, -1).await;
    seed_show(&state, venue.id, artist.id, 1).await;
    seed_show(&state, venue.id, artist.id, 2).await;

    let page = get(&app, &format!("/venues/{}", venue.id)).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("2 Upcoming Shows"));
    assert!(page.body.contains("1 Past Show<"));
}

#[tokio::test]
async fn creation_form_offers_a_default_start_time() {
    let (_state, app) = test_app().await;

    let page = get(&app, "/shows/create").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("name=\"start_time\" value=\"20"));
}
