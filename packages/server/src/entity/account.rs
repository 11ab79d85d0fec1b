use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A sign-in identity. The credential (password hash) lives here and nowhere
/// else; roles are derived at sign-in time, never stored on this row.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "account")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
