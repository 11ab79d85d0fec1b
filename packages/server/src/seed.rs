use sea_orm::*;
use tracing::info;
use uuid::Uuid;

use crate::entity::admin_user;

/// Role recorded on seeded allow-list rows.
const ADMIN_ROLE: &str = "admin";

/// Seed the admin allow-list from configuration.
///
/// Emails already present are left untouched, so repeated startups are safe.
pub async fn seed_admin_users(db: &DatabaseConnection, emails: &[String]) -> Result<(), DbErr> {
    let mut inserted = 0u32;
    for email in emails {
        let model = admin_user::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email.clone()),
            role: Set(ADMIN_ROLE.to_string()),
            created_at: Set(chrono::Utc::now()),
        };

        let result = admin_user::Entity::insert(model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(admin_user::Column::Email)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match result {
            Ok(n) if n > 0 => inserted += 1,
            Ok(_) => {}
            Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    if inserted > 0 {
        info!("Seeded {} new admin emails", inserted);
    }

    Ok(())
}
