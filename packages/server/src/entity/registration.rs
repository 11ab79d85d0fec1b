use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A tournament or contact submission. Created once by a public form; after
/// creation only `status` ever changes, and rows are never deleted.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "registration")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// NULL for contact-form submissions and for tournament submissions made
    /// while no event was flagged active.
    pub event_id: Option<Uuid>,
    #[sea_orm(belongs_to, from = "event_id", to = "id")]
    pub event: BelongsTo<Option<super::event::Entity>>,

    /// NULL unless the submission was tied to a known school profile.
    pub school_id: Option<Uuid>,
    #[sea_orm(belongs_to, from = "school_id", to = "id")]
    pub school: BelongsTo<Option<super::school::Entity>>,

    pub full_name: String,
    /// Submitter email. Ownership key for the school-scoped dashboard view.
    pub email: String,
    pub phone: Option<String>,
    pub organization: Option<String>,
    /// Submitter's self-declared role (teacher, student, parent, other).
    pub role: String,
    /// What the submission is about ("event" for tournament forms, "partner"
    /// for contact forms).
    pub interest: String,

    pub student1_name: Option<String>,
    pub student1_email: Option<String>,
    pub student2_name: Option<String>,
    pub student2_email: Option<String>,

    pub notes: Option<String>,

    /// One of: pending, approved, rejected.
    pub status: String,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
