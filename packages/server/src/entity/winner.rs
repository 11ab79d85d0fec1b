use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A tournament result entry, created by an administrator. Display code must
/// tolerate event or school references that no longer resolve.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "winner")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub event_id: Uuid,
    #[sea_orm(belongs_to, from = "event_id", to = "id")]
    pub event: BelongsTo<super::event::Entity>,

    pub school_id: Uuid,
    #[sea_orm(belongs_to, from = "school_id", to = "id")]
    pub school: BelongsTo<super::school::Entity>,

    /// Final placing, 1-based.
    pub position: i32,
    pub student_names: String,
    pub video_url: Option<String>,
    pub image_url: Option<String>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
