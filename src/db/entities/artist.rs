use listing_entity_derive::listing_entity;
use sea_orm::entity::prelude::*;

#[listing_entity(searchable = "name")]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "artists")]
pub struct Model {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    /// Comma separated, in the order they were picked on the form.
    pub genres: String,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    #[sea_orm(default_value = false)]
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    #[sea_orm(has_many)]
    pub shows: HasMany<super::show::Entity>,
}

impl Model {
    pub fn genre_list(&self) -> Vec<&str> {
        self.genres
            .split(',')
            .map(str::trim)
            .filter(|genre| !genre.is_empty())
            .collect()
    }
}

impl ActiveModelBehavior for ActiveModel {}
