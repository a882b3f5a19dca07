use std::collections::HashMap;

use sea_orm::entity::prelude::DateTimeWithTimeZone;
use sea_orm::{DatabaseConnection, Set, TransactionTrait};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    db::dao::{DaoBase, DaoContext, DaoLayerError},
    db::entities::{artist, show, venue},
    error::AppError,
    forms::ShowInput,
    schedule,
    services::{
        errors::{CrudErrors, CrudOp},
        listing::ShowListing,
    },
};

const ERRORS: CrudErrors = CrudErrors::new("Show", "show");

#[derive(Clone)]
pub struct ShowService {
    db: DatabaseConnection,
}

impl ShowService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Shows that have not started yet, soonest first.
    pub async fn list_upcoming(
        &self,
        now: DateTimeWithTimeZone,
    ) -> Result<Vec<ShowListing>, AppError> {
        let daos = DaoContext::new(&self.db);
        let list_err = |err: DaoLayerError| ERRORS.map_error(CrudOp::List, "", err);

        let shows: Vec<show::Model> = daos
            .show()
            .list_by_start_time()
            .await
            .map_err(list_err)?
            .into_iter()
            .filter(|show| schedule::is_upcoming(&show.start_time, &now))
            .collect();

        let venue_ids: Vec<Uuid> = shows.iter().map(|show| show.venue_id).collect();
        let artist_ids: Vec<Uuid> = shows.iter().map(|show| show.artist_id).collect();
        let venues: HashMap<Uuid, venue::Model> = daos
            .venue()
            .find_many(&venue_ids)
            .await
            .map_err(list_err)?
            .into_iter()
            .map(|venue| (venue.id, venue))
            .collect();
        let artists: HashMap<Uuid, artist::Model> = daos
            .artist()
            .find_many(&artist_ids)
            .await
            .map_err(list_err)?
            .into_iter()
            .map(|artist| (artist.id, artist))
            .collect();

        Ok(shows
            .into_iter()
            .filter_map(|show| {
                let venue = venues.get(&show.venue_id)?;
                let artist = artists.get(&show.artist_id)?;
                Some(ShowListing {
                    show_id: show.id,
                    venue_id: venue.id,
                    venue_name: venue.name.clone(),
                    artist_id: artist.id,
                    artist_name: artist.name.clone(),
                    artist_image_link: artist.image_link.clone(),
                    start_time: show.start_time,
                })
            })
            .collect())
    }

    /// Books an artist at a venue. Both must exist; otherwise nothing is
    /// written and a referential integrity error names the missing side.
    pub async fn create(&self, input: ShowInput) -> Result<show::Model, AppError> {
        let fail = |err: DaoLayerError| ERRORS.map_error(CrudOp::Create, "", err);

        let txn = self.db.begin().await.map_err(|err| fail(err.into()))?;
        let daos = DaoContext::new(&txn);

        let mut missing = Vec::new();
        if !daos.venue().exists(input.venue_id).await.map_err(fail)? {
            missing.push(format!("venue {}", input.venue_id));
        }
        if !daos.artist().exists(input.artist_id).await.map_err(fail)? {
            missing.push(format!("artist {}", input.artist_id));
        }
        if !missing.is_empty() {
            warn!(missing = ?missing, "show rejected");
            return Err(AppError::referential_integrity(format!(
                "Show could not be listed: unknown {}.",
                missing.join(" and ")
            )));
        }

        let model = daos
            .show()
            .create(show::ActiveModel {
                venue_id: Set(input.venue_id),
                artist_id: Set(input.artist_id),
                start_time: Set(input.start_time),
                ..Default::default()
            })
            .await
            .map_err(fail)?;
        txn.commit().await.map_err(|err| fail(err.into()))?;

        info!(
            show_id = %model.id,
            venue_id = %model.venue_id,
            artist_id = %model.artist_id,
            "show listed"
        );
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use uuid::Uuid;

    use super::ShowService;
    use crate::{
        db::entities::{artist, venue},
        error::AppError,
        forms::ShowInput,
    };

    #[tokio::test]
    async fn create_rejects_unknown_venue_and_artist() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<venue::Model>::new()])
            .append_query_results([Vec::<artist::Model>::new()])
            .into_connection();
        let service = ShowService::new(db.clone());
        let venue_id = Uuid::new_v4();

        let err = service
            .create(ShowInput {
                venue_id,
                artist_id: Uuid::new_v4(),
                start_time: (Utc::now() + Duration::days(3)).fixed_offset(),
            })
            .await
            .expect_err("show should be rejected");

        match err {
            AppError::ReferentialIntegrity(message) => {
                assert!(message.contains(&format!("venue {venue_id}")));
                assert!(message.contains("artist"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        let log = format!("{:?}", db.into_transaction_log());
        assert!(!log.contains("INSERT"), "{log}");
    }
}
