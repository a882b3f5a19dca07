use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityName, EntityTrait, FromQueryResult, IntoActiveModel,
    PrimaryKeyTrait, QueryOrder, QuerySelect, Select,
};
use uuid::Uuid;

use super::base_traits::{
    HasCreatedAtColumn, HasIdActiveModel, SearchableByName, TimestampedActiveModel,
};
use super::error::{DaoLayerError, DaoResult};

/// Shared CRUD over one entity, run against whatever connection the DAO was
/// built with: the pool for reads, an open transaction for a unit of work.
#[async_trait::async_trait]
pub trait DaoBase: Send + Sync + Sized
where
    <Self::Entity as EntityTrait>::Model:
        FromQueryResult + IntoActiveModel<<Self::Entity as EntityTrait>::ActiveModel> + Send + Sync,
    <Self::Entity as EntityTrait>::ActiveModel:
        ActiveModelTrait<Entity = Self::Entity> + HasIdActiveModel + TimestampedActiveModel + Send,
    <<Self::Entity as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType:
        From<Uuid> + Send + Sync,
    Self::Entity: HasCreatedAtColumn,
{
    type Entity: EntityTrait + Send + Sync;
    type Conn: ConnectionTrait + Send + Sync;

    fn conn(&self) -> &Self::Conn;

    fn entity_name() -> &'static str {
        Self::Entity::default().table_name()
    }

    async fn create(
        &self,
        data: impl IntoActiveModel<<Self::Entity as EntityTrait>::ActiveModel> + Send,
    ) -> DaoResult<<Self::Entity as EntityTrait>::Model> {
        let now = Utc::now().fixed_offset();
        let mut active = data.into_active_model();
        active.set_id(Uuid::new_v4());
        active.set_created_at(now);
        active.set_updated_at(now);
        Ok(active.insert(self.conn()).await?)
    }

    async fn find_by_id(&self, id: Uuid) -> DaoResult<<Self::Entity as EntityTrait>::Model> {
        let model = Self::Entity::find_by_id(id).one(self.conn()).await?;

        model.ok_or(DaoLayerError::NotFound {
            entity: Self::entity_name(),
            id,
        })
    }

    async fn exists(&self, id: Uuid) -> DaoResult<bool> {
        let model = Self::Entity::find_by_id(id).one(self.conn()).await?;
        Ok(model.is_some())
    }

    async fn find_all(
        &self,
        apply: impl FnOnce(Select<Self::Entity>) -> Select<Self::Entity> + Send,
    ) -> DaoResult<Vec<<Self::Entity as EntityTrait>::Model>> {
        let query = apply(Self::Entity::find());
        Ok(query.all(self.conn()).await?)
    }

    async fn find_recent(&self, limit: u64) -> DaoResult<Vec<<Self::Entity as EntityTrait>::Model>> {
        let models = Self::Entity::find()
            .order_by_desc(Self::Entity::created_at_column())
            .limit(limit)
            .all(self.conn())
            .await?;
        Ok(models)
    }

    /// Case-insensitive substring match on the entity's name column. An empty
    /// term matches every row.
    ///
    /// Matching happens here rather than in SQL: SQLite's `LOWER` only folds
    /// ASCII, so names like "CAFÉ" would never match their own text.
    async fn search_by_name(
        &self,
        term: &str,
    ) -> DaoResult<Vec<<Self::Entity as EntityTrait>::Model>>
    where
        Self::Entity: SearchableByName,
    {
        let needle = term.to_lowercase();
        let models = Self::Entity::find()
            .order_by_asc(Self::Entity::name_column())
            .all(self.conn())
            .await?;
        Ok(models
            .into_iter()
            .filter(|model| name_matches(Self::Entity::name_of(model), &needle))
            .collect())
    }

    async fn update<F>(&self, id: Uuid, apply: F) -> DaoResult<<Self::Entity as EntityTrait>::Model>
    where
        F: for<'a> FnOnce(&'a mut <Self::Entity as EntityTrait>::ActiveModel) + Send,
    {
        let model = Self::Entity::find_by_id(id)
            .one(self.conn())
            .await?
            .ok_or(DaoLayerError::NotFound {
                entity: Self::entity_name(),
                id,
            })?;

        let mut active = model.into_active_model();
        apply(&mut active);
        active.set_updated_at(Utc::now().fixed_offset());

        Ok(active.update(self.conn()).await?)
    }

    async fn delete(&self, id: Uuid) -> DaoResult<Uuid> {
        let result = Self::Entity::delete_by_id(id).exec(self.conn()).await?;

        if result.rows_affected == 0 {
            return Err(DaoLayerError::NotFound {
                entity: Self::entity_name(),
                id,
            });
        }

        Ok(id)
    }
}

/// `needle` is expected already lowercased.
pub(crate) fn name_matches(name: &str, needle: &str) -> bool {
    needle.is_empty() || name.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::name_matches;

    #[test]
    fn empty_needle_matches_any_name() {
        assert!(name_matches("The Musical Hop", ""));
    }

    #[test]
    fn matching_folds_non_ascii_letters() {
        assert!(name_matches("CAFÉ ÜBER", "café"));
        assert!(name_matches("CAFÉ ÜBER", "über"));
        assert!(name_matches("CAFÉ ÜBER", "café über"));
        assert!(!name_matches("CAFÉ ÜBER", "cafe"));
    }

    #[test]
    fn wildcard_characters_are_plain_text() {
        assert!(!name_matches("The Musical Hop", "%"));
        assert!(!name_matches("The Musical Hop", "t_e"));
        assert!(name_matches("100% Jazz_Club", "% jazz_"));
    }
}
