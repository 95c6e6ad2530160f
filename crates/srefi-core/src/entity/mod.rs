pub mod accounts;
pub mod submissions;

pub mod prelude {
    pub use super::accounts::Entity as Accounts;
    pub use super::submissions::Entity as Submissions;
}

use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Schema};

/// Creates the `submissions` and `accounts` tables when they are missing.
pub async fn setup_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut submissions_table = schema.create_table_from_entity(submissions::Entity);
    submissions_table.if_not_exists();
    db.execute(backend.build(&submissions_table)).await?;

    let mut accounts_table = schema.create_table_from_entity(accounts::Entity);
    accounts_table.if_not_exists();
    db.execute(backend.build(&accounts_table)).await?;

    tracing::debug!("Database schema ready");
    Ok(())
}
