use sea_orm::{ColumnTrait, ConnectionTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::DaoBase;
use super::error::DaoResult;
use crate::db::entities::{artist, prelude::Artist};

#[derive(Clone)]
pub struct ArtistDao<'c, C> {
    conn: &'c C,
}

impl<'c, C> ArtistDao<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }
}

impl<C> DaoBase for ArtistDao<'_, C>
where
    C: ConnectionTrait + Send + Sync,
{
    type Entity = Artist;
    type Conn = C;

    fn conn(&self) -> &C {
        self.conn
    }
}

impl<C> ArtistDao<'_, C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub async fn list_by_name(&self) -> DaoResult<Vec<artist::Model>> {
        self.find_all(|query| query.order_by_asc(artist::Column::Name))
            .await
    }

    pub async fn find_many(&self, ids: &[Uuid]) -> DaoResult<Vec<artist::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids = ids.to_vec();
        self.find_all(move |query| query.filter(artist::Column::Id.is_in(ids)))
            .await
    }
}
