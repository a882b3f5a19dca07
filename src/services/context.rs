use sea_orm::DatabaseConnection;

use crate::{
    services::{
        artist_service::ArtistService, show_service::ShowService, venue_service::VenueService,
    },
    state::AppState,
};

#[derive(Clone)]
pub struct ServiceContext {
    db: DatabaseConnection,
}

impl ServiceContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(&state.db)
    }

    pub fn venue(&self) -> VenueService {
        VenueService::new(self.db.clone())
    }

    pub fn artist(&self) -> ArtistService {
        ArtistService::new(self.db.clone())
    }

    pub fn show(&self) -> ShowService {
        ShowService::new(self.db.clone())
    }
}
