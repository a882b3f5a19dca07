use sea_orm::entity::prelude::DateTimeWithTimeZone;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

use super::DaoBase;
use super::error::DaoResult;
use crate::db::entities::{prelude::Show, show};

/// `(owner id, start_time)` pairs used to tally shows per venue or artist.
pub type ShowStart = (Uuid, DateTimeWithTimeZone);

#[derive(Clone)]
pub struct ShowDao<'c, C> {
    conn: &'c C,
}

impl<'c, C> ShowDao<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }
}

impl<C> DaoBase for ShowDao<'_, C>
where
    C: ConnectionTrait + Send + Sync,
{
    type Entity = Show;
    type Conn = C;

    fn conn(&self) -> &C {
        self.conn
    }
}

impl<C> ShowDao<'_, C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub async fn list_by_start_time(&self) -> DaoResult<Vec<show::Model>> {
        self.find_all(|query| query.order_by_asc(show::Column::StartTime))
            .await
    }

    pub async fn list_for_venue(&self, venue_id: Uuid) -> DaoResult<Vec<show::Model>> {
        self.find_all(move |query| {
            query
                .filter(show::Column::VenueId.eq(venue_id))
                .order_by_asc(show::Column::StartTime)
        })
        .await
    }

    pub async fn list_for_artist(&self, artist_id: Uuid) -> DaoResult<Vec<show::Model>> {
        self.find_all(move |query| {
            query
                .filter(show::Column::ArtistId.eq(artist_id))
                .order_by_asc(show::Column::StartTime)
        })
        .await
    }

    pub async fn start_times_for_venues(&self, venue_ids: &[Uuid]) -> DaoResult<Vec<ShowStart>> {
        self.start_times(show::Column::VenueId, venue_ids).await
    }

    pub async fn start_times_for_artists(
        &self,
        artist_ids: &[Uuid],
    ) -> DaoResult<Vec<ShowStart>> {
        self.start_times(show::Column::ArtistId, artist_ids).await
    }

    pub async fn delete_for_venue(&self, venue_id: Uuid) -> DaoResult<u64> {
        let result = Show::delete_many()
            .filter(show::Column::VenueId.eq(venue_id))
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected)
    }

    async fn start_times(&self, owner: show::Column, ids: &[Uuid]) -> DaoResult<Vec<ShowStart>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = Show::find()
            .select_only()
            .column(owner)
            .column(show::Column::StartTime)
            .filter(owner.is_in(ids.to_vec()))
            .into_tuple::<ShowStart>()
            .all(self.conn)
            .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};
    use uuid::Uuid;

    use super::ShowDao;
    use crate::db::dao::{DaoBase, DaoLayerError};
    use crate::db::entities::show;

    #[tokio::test]
    async fn start_times_skip_the_query_without_ids() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let dao = ShowDao::new(&db);

        let rows = dao
            .start_times_for_venues(&[])
            .await
            .expect("empty id list should not query");
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn delete_for_venue_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 3,
            }])
            .into_connection();
        let dao = ShowDao::new(&db);

        let removed = dao
            .delete_for_venue(Uuid::new_v4())
            .await
            .expect("delete should succeed");
        assert_eq!(removed, 3);
    }

    #[tokio::test]
    async fn find_by_id_reports_missing_show() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([Vec::<show::Model>::new()])
            .into_connection();
        let dao = ShowDao::new(&db);

        let err = dao.find_by_id(id).await.expect_err("show should be missing");
        assert!(matches!(
            err,
            DaoLayerError::NotFound { entity: "shows", id: missing } if missing == id
        ));
    }

    #[tokio::test]
    async fn list_for_artist_maps_database_errors() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_errors([DbErr::Custom("query failed".to_string())])
            .into_connection();
        let dao = ShowDao::new(&db);

        let err = dao
            .list_for_artist(Uuid::new_v4())
            .await
            .expect_err("query should fail");
        assert!(matches!(err, DaoLayerError::Db(_)));
    }
}
