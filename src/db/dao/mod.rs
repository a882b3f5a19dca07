pub mod artist_dao;
pub mod base;
pub mod base_traits;
mod context;
pub mod error;
pub mod show_dao;
pub mod venue_dao;

pub use artist_dao::ArtistDao;
pub use base::DaoBase;
pub use base_traits::{
    HasCreatedAtColumn, HasIdActiveModel, SearchableByName, TimestampedActiveModel,
};
pub use context::DaoContext;
pub use error::{DaoLayerError, DaoResult};
pub use show_dao::{ShowDao, ShowStart};
pub use venue_dao::VenueDao;
