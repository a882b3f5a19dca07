use std::collections::HashMap;

use sea_orm::entity::prelude::DateTimeWithTimeZone;
use sea_orm::{DatabaseConnection, Set, TransactionTrait};
use tracing::info;
use uuid::Uuid;

use crate::{
    db::dao::{DaoBase, DaoContext, DaoLayerError},
    db::entities::{artist, venue},
    error::AppError,
    forms::ArtistInput,
    schedule,
    services::{
        errors::{CrudErrors, CrudOp},
        listing::{ArtistSummary, SearchHit, SearchResults, ShowSplit, VenueBooking},
    },
};

const ERRORS: CrudErrors = CrudErrors::new("Artist", "artist");

#[derive(Debug, Clone)]
pub struct ArtistDetail {
    pub artist: artist::Model,
    pub genres: Vec<String>,
    pub shows: ShowSplit<VenueBooking>,
}

#[derive(Clone)]
pub struct ArtistService {
    db: DatabaseConnection,
}

impl ArtistService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn daos(&self) -> DaoContext<'_, DatabaseConnection> {
        DaoContext::new(&self.db)
    }

    pub async fn list(&self) -> Result<Vec<ArtistSummary>, AppError> {
        let artists = self
            .daos()
            .artist()
            .list_by_name()
            .await
            .map_err(|err| ERRORS.map_error(CrudOp::List, "", err))?;
        Ok(artists
            .into_iter()
            .map(|artist| ArtistSummary {
                id: artist.id,
                name: artist.name,
            })
            .collect())
    }

    pub async fn search(
        &self,
        term: &str,
        now: DateTimeWithTimeZone,
    ) -> Result<SearchResults, AppError> {
        let daos = self.daos();
        let list_err = |err: DaoLayerError| ERRORS.map_error(CrudOp::List, "", err);

        let artists = daos.artist().search_by_name(term).await.map_err(list_err)?;
        let ids: Vec<Uuid> = artists.iter().map(|artist| artist.id).collect();
        let rows = daos
            .show()
            .start_times_for_artists(&ids)
            .await
            .map_err(list_err)?;
        let tallies = schedule::tally(rows, &now);

        let hits = artists
            .into_iter()
            .map(|artist| SearchHit {
                num_upcoming_shows: tallies.get(&artist.id).map_or(0, |t| t.upcoming),
                id: artist.id,
                name: artist.name,
            })
            .collect();
        Ok(SearchResults::new(hits))
    }

    pub async fn require(&self, id: Uuid) -> Result<artist::Model, AppError> {
        self.daos()
            .artist()
            .find_by_id(id)
            .await
            .map_err(|err| ERRORS.map_error(CrudOp::Find, "", err))
    }

    pub async fn detail(
        &self,
        id: Uuid,
        now: DateTimeWithTimeZone,
    ) -> Result<ArtistDetail, AppError> {
        let artist = self.require(id).await?;
        let daos = self.daos();
        let load_err = |err: DaoLayerError| ERRORS.map_error(CrudOp::Find, "", err);

        let shows = daos.show().list_for_artist(id).await.map_err(load_err)?;
        let venue_ids: Vec<Uuid> = shows.iter().map(|show| show.venue_id).collect();
        let venues: HashMap<Uuid, venue::Model> = daos
            .venue()
            .find_many(&venue_ids)
            .await
            .map_err(load_err)?
            .into_iter()
            .map(|venue| (venue.id, venue))
            .collect();

        let bookings = shows.into_iter().filter_map(|show| {
            let venue = venues.get(&show.venue_id)?;
            Some(VenueBooking {
                venue_id: venue.id,
                venue_name: venue.name.clone(),
                venue_image_link: venue.image_link.clone(),
                start_time: show.start_time,
            })
        });
        let (past, upcoming) = schedule::partition(bookings, &now, |show| &show.start_time);
        let genres = artist.genre_list().into_iter().map(str::to_string).collect();

        Ok(ArtistDetail {
            artist,
            genres,
            shows: ShowSplit::new(past, upcoming),
        })
    }

    pub async fn recent(&self, limit: u64) -> Result<Vec<artist::Model>, AppError> {
        self.daos()
            .artist()
            .find_recent(limit)
            .await
            .map_err(|err| ERRORS.map_error(CrudOp::List, "", err))
    }

    pub async fn create(&self, input: ArtistInput) -> Result<artist::Model, AppError> {
        let name = input.name.clone();
        let fail = |err: DaoLayerError| ERRORS.map_error(CrudOp::Create, &name, err);

        let txn = self.db.begin().await.map_err(|err| fail(err.into()))?;
        let mut active = artist::ActiveModel::default();
        apply_input(&mut active, input);
        let model = DaoContext::new(&txn)
            .artist()
            .create(active)
            .await
            .map_err(fail)?;
        txn.commit().await.map_err(|err| fail(err.into()))?;

        info!(artist_id = %model.id, name = %model.name, "artist listed");
        Ok(model)
    }

    pub async fn update(&self, id: Uuid, input: ArtistInput) -> Result<artist::Model, AppError> {
        let name = input.name.clone();
        let fail = |err: DaoLayerError| ERRORS.map_error(CrudOp::Update, &name, err);

        let txn = self.db.begin().await.map_err(|err| fail(err.into()))?;
        let model = DaoContext::new(&txn)
            .artist()
            .update(id, move |active| apply_input(active, input))
            .await
            .map_err(fail)?;
        txn.commit().await.map_err(|err| fail(err.into()))?;

        info!(artist_id = %model.id, name = %model.name, "artist updated");
        Ok(model)
    }
}

fn apply_input(active: &mut artist::ActiveModel, input: ArtistInput) {
    active.name = Set(input.name);
    active.city = Set(input.city);
    active.state = Set(input.state);
    active.phone = Set(input.phone);
    active.genres = Set(input.genres);
    active.image_link = Set(input.image_link);
    active.facebook_link = Set(input.facebook_link);
    active.website_link = Set(input.website_link);
    active.seeking_venue = Set(input.seeking_venue);
    active.seeking_description = Set(input.seeking_description);
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
    use uuid::Uuid;

    use super::ArtistService;
    use crate::{db::entities::artist, error::AppError, forms::ArtistInput};

    fn input(name: &str) -> ArtistInput {
        ArtistInput {
            name: name.to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: None,
            genres: "Jazz".to_string(),
            image_link: None,
            facebook_link: None,
            website_link: None,
            seeking_venue: false,
            seeking_description: None,
        }
    }

    #[tokio::test]
    async fn detail_of_unknown_artist_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<artist::Model>::new()])
            .into_connection();
        let service = ArtistService::new(db);

        let err = service
            .detail(Uuid::new_v4(), chrono::Utc::now().fixed_offset())
            .await
            .expect_err("artist should be missing");
        assert!(matches!(&err, AppError::NotFound(message) if message == "Artist not found"));
    }

    #[tokio::test]
    async fn update_failure_names_the_artist() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("lookup failed".to_string())])
            .into_connection();
        let service = ArtistService::new(db);

        let err = service
            .update(Uuid::new_v4(), input("Guns N Petals"))
            .await
            .expect_err("update should fail");
        assert!(matches!(err, AppError::Persistence { .. }));
        assert_eq!(
            err.to_string(),
            "There was an error trying to update artist, Guns N Petals."
        );
    }
}
