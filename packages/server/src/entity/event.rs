use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub title: String,
    pub description: Option<String>,
    pub event_date: DateTimeUtc,
    pub venue: String,
    pub registration_start: Option<DateTimeUtc>,
    pub registration_end: Option<DateTimeUtc>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,

    /// The registration form attaches to the first active event. At most one
    /// event is expected to be active at a time; this is a data-entry
    /// invariant, not enforced at write time.
    pub is_active: bool,

    #[sea_orm(has_many)]
    pub registrations: HasMany<super::registration::Entity>,

    #[sea_orm(has_many)]
    pub winners: HasMany<super::winner::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
