use sea_orm::ConnectionTrait;

use super::{ArtistDao, ShowDao, VenueDao};

/// Hands out DAOs bound to one connection, so every DAO used inside a unit
/// of work shares the same transaction.
pub struct DaoContext<'c, C> {
    conn: &'c C,
}

impl<'c, C> DaoContext<'c, C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    pub fn venue(&self) -> VenueDao<'c, C> {
        VenueDao::new(self.conn)
    }

    pub fn artist(&self) -> ArtistDao<'c, C> {
        ArtistDao::new(self.conn)
    }

    pub fn show(&self) -> ShowDao<'c, C> {
        ShowDao::new(self.conn)
    }
}
