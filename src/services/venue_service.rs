use std::collections::{BTreeMap, HashMap};

use sea_orm::entity::prelude::DateTimeWithTimeZone;
use sea_orm::{DatabaseConnection, Set, TransactionTrait};
use tracing::info;
use uuid::Uuid;

use crate::{
    db::dao::{DaoBase, DaoContext, DaoLayerError},
    db::entities::{artist, venue},
    error::AppError,
    forms::VenueInput,
    schedule::{self, ShowTally},
    services::{
        errors::{CrudErrors, CrudOp},
        listing::{ArtistAppearance, SearchHit, SearchResults, ShowSplit, VenueArea, VenueSummary},
    },
};

const ERRORS: CrudErrors = CrudErrors::new("Venue", "venue");

#[derive(Debug, Clone)]
pub struct VenueDetail {
    pub venue: venue::Model,
    pub shows: ShowSplit<ArtistAppearance>,
}

#[derive(Clone)]
pub struct VenueService {
    db: DatabaseConnection,
}

impl VenueService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn daos(&self) -> DaoContext<'_, DatabaseConnection> {
        DaoContext::new(&self.db)
    }

    pub async fn list_by_area(&self, now: DateTimeWithTimeZone) -> Result<Vec<VenueArea>, AppError> {
        let daos = self.daos();
        let venues = daos
            .venue()
            .list_by_locale()
            .await
            .map_err(|err| ERRORS.map_error(CrudOp::List, "", err))?;
        let tallies = self.tallies(&venues, &now).await?;
        Ok(group_by_area(venues, &tallies))
    }

    pub async fn search(
        &self,
        term: &str,
        now: DateTimeWithTimeZone,
    ) -> Result<SearchResults, AppError> {
        let venues = self
            .daos()
            .venue()
            .search_by_name(term)
            .await
            .map_err(|err| ERRORS.map_error(CrudOp::List, "", err))?;
        let tallies = self.tallies(&venues, &now).await?;
        let hits = venues
            .into_iter()
            .map(|venue| SearchHit {
                num_upcoming_shows: tallies.get(&venue.id).map_or(0, |t| t.upcoming),
                id: venue.id,
                name: venue.name,
            })
            .collect();
        Ok(SearchResults::new(hits))
    }

    pub async fn require(&self, id: Uuid) -> Result<venue::Model, AppError> {
        self.daos()
            .venue()
            .find_by_id(id)
            .await
            .map_err(|err| ERRORS.map_error(CrudOp::Find, "", err))
    }

    pub async fn detail(&self, id: Uuid, now: DateTimeWithTimeZone) -> Result<VenueDetail, AppError> {
        let venue = self.require(id).await?;
        let daos = self.daos();
        let load_err = |err: DaoLayerError| ERRORS.map_error(CrudOp::Find, "", err);

        let shows = daos.show().list_for_venue(id).await.map_err(load_err)?;
        let artist_ids: Vec<Uuid> = shows.iter().map(|show| show.artist_id).collect();
        let artists: HashMap<Uuid, artist::Model> = daos
            .artist()
            .find_many(&artist_ids)
            .await
            .map_err(load_err)?
            .into_iter()
            .map(|artist| (artist.id, artist))
            .collect();

        let appearances = shows.into_iter().filter_map(|show| {
            let artist = artists.get(&show.artist_id)?;
            Some(ArtistAppearance {
                artist_id: artist.id,
                artist_name: artist.name.clone(),
                artist_image_link: artist.image_link.clone(),
                start_time: show.start_time,
            })
        });
        let (past, upcoming) = schedule::partition(appearances, &now, |show| &show.start_time);

        Ok(VenueDetail {
            venue,
            shows: ShowSplit::new(past, upcoming),
        })
    }

    pub async fn recent(&self, limit: u64) -> Result<Vec<venue::Model>, AppError> {
        self.daos()
            .venue()
            .find_recent(limit)
            .await
            .map_err(|err| ERRORS.map_error(CrudOp::List, "", err))
    }

    pub async fn create(&self, input: VenueInput) -> Result<venue::Model, AppError> {
        let name = input.name.clone();
        let fail = |err: DaoLayerError| ERRORS.map_error(CrudOp::Create, &name, err);

        let txn = self.db.begin().await.map_err(|err| fail(err.into()))?;
        let model = DaoContext::new(&txn)
            .venue()
            .create(active_model(input))
            .await
            .map_err(fail)?;
        txn.commit().await.map_err(|err| fail(err.into()))?;

        info!(venue_id = %model.id, name = %model.name, "venue listed");
        Ok(model)
    }

    /// Replaces every editable field of the venue. Nothing is written when
    /// the id is unknown.
    pub async fn update(&self, id: Uuid, input: VenueInput) -> Result<venue::Model, AppError> {
        let name = input.name.clone();
        let fail = |err: DaoLayerError| ERRORS.map_error(CrudOp::Update, &name, err);

        let txn = self.db.begin().await.map_err(|err| fail(err.into()))?;
        let model = DaoContext::new(&txn)
            .venue()
            .update(id, move |active| apply_input(active, input))
            .await
            .map_err(fail)?;
        txn.commit().await.map_err(|err| fail(err.into()))?;

        info!(venue_id = %model.id, name = %model.name, "venue updated");
        Ok(model)
    }

    /// Deletes the venue together with its shows.
    pub async fn delete(&self, id: Uuid) -> Result<venue::Model, AppError> {
        let fail = |err: DaoLayerError| ERRORS.map_error(CrudOp::Delete, "", err);

        let txn = self.db.begin().await.map_err(|err| fail(err.into()))?;
        let daos = DaoContext::new(&txn);
        let model = daos.venue().find_by_id(id).await.map_err(fail)?;
        let removed_shows = daos.show().delete_for_venue(id).await.map_err(fail)?;
        daos.venue().delete(id).await.map_err(fail)?;
        txn.commit().await.map_err(|err| fail(err.into()))?;

        info!(venue_id = %id, name = %model.name, removed_shows, "venue deleted");
        Ok(model)
    }

    async fn tallies(
        &self,
        venues: &[venue::Model],
        now: &DateTimeWithTimeZone,
    ) -> Result<HashMap<Uuid, ShowTally>, AppError> {
        let ids: Vec<Uuid> = venues.iter().map(|venue| venue.id).collect();
        let rows = self
            .daos()
            .show()
            .start_times_for_venues(&ids)
            .await
            .map_err(|err| ERRORS.map_error(CrudOp::List, "", err))?;
        Ok(schedule::tally(rows, now))
    }
}

fn active_model(input: VenueInput) -> venue::ActiveModel {
    let mut active = venue::ActiveModel::default();
    apply_input(&mut active, input);
    active
}

fn apply_input(active: &mut venue::ActiveModel, input: VenueInput) {
    active.name = Set(input.name);
    active.city = Set(input.city);
    active.state = Set(input.state);
    active.address = Set(input.address);
    active.phone = Set(input.phone);
    active.image_link = Set(input.image_link);
    active.facebook_link = Set(input.facebook_link);
    active.website_link = Set(input.website_link);
    active.seeking_talent = Set(input.seeking_talent);
    active.seeking_description = Set(input.seeking_description);
}

/// Groups venues by exact `(city, state)`; groups come out ordered by state
/// then city, venues keep their incoming order.
pub fn group_by_area(
    venues: Vec<venue::Model>,
    tallies: &HashMap<Uuid, ShowTally>,
) -> Vec<VenueArea> {
    let mut areas: BTreeMap<(String, String), Vec<VenueSummary>> = BTreeMap::new();
    for venue in venues {
        let tally = tallies.get(&venue.id).copied().unwrap_or_default();
        areas
            .entry((venue.state, venue.city))
            .or_default()
            .push(VenueSummary {
                id: venue.id,
                name: venue.name,
                shows_count: tally.total,
                num_upcoming_shows: tally.upcoming,
            });
    }

    areas
        .into_iter()
        .map(|((state, city), venues)| VenueArea {
            city,
            state,
            venues,
        })
        .collect()
}
