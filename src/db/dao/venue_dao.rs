use sea_orm::{ColumnTrait, ConnectionTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::DaoBase;
use super::error::DaoResult;
use crate::db::entities::{prelude::Venue, venue};

#[derive(Clone)]
pub struct VenueDao<'c, C> {
    conn: &'c C,
}

impl<'c, C> VenueDao<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }
}

impl<C> DaoBase for VenueDao<'_, C>
where
    C: ConnectionTrait + Send + Sync,
{
    type Entity = Venue;
    type Conn = C;

    fn conn(&self) -> &C {
        self.conn
    }
}

impl<C> VenueDao<'_, C>
where
    C: ConnectionTrait + Send + Sync,
{
    /// Every venue ordered by state, city and name, ready for grouping.
    pub async fn list_by_locale(&self) -> DaoResult<Vec<venue::Model>> {
        self.find_all(|query| {
            query
                .order_by_asc(venue::Column::State)
                .order_by_asc(venue::Column::City)
                .order_by_asc(venue::Column::Name)
        })
        .await
    }

    pub async fn find_many(&self, ids: &[Uuid]) -> DaoResult<Vec<venue::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids = ids.to_vec();
        self.find_all(move |query| query.filter(venue::Column::Id.is_in(ids)))
            .await
    }
}
