//! Database configuration module.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`. Tables
//! are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the database schema always matches
//! the Rust struct definitions without manual SQL.

use crate::entities::{
    Accrual, AmountOfAccrual, Contract, ContractTemplate, Employee, Field, HourlyPayment,
    PercentageOfSales, Rate, SalaryCertificate, Sale, Schedule,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from the `DATABASE_URL` environment variable, falling
/// back to a local `SQLite` file.
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/salary_engine.sqlite?mode=rwc".to_string())
}

/// Establishes a connection to the database.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all tables from the entity definitions. Safe to call on an
/// existing database: every statement carries `IF NOT EXISTS`.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut statements = vec![
        schema.create_table_from_entity(Employee),
        schema.create_table_from_entity(ContractTemplate),
        schema.create_table_from_entity(Contract),
        schema.create_table_from_entity(Rate),
        schema.create_table_from_entity(AmountOfAccrual),
        schema.create_table_from_entity(PercentageOfSales),
        schema.create_table_from_entity(HourlyPayment),
        schema.create_table_from_entity(SalaryCertificate),
        schema.create_table_from_entity(Field),
        schema.create_table_from_entity(Accrual),
        schema.create_table_from_entity(Sale),
        schema.create_table_from_entity(Schedule),
    ];

    for statement in &mut statements {
        statement.if_not_exists();
        db.execute(builder.build(&*statement)).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        contract::Model as ContractModel, field::Model as FieldModel,
        salary_certificate::Model as CertificateModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Tables exist once we can query them
        let _: Vec<ContractModel> = Contract::find().limit(1).all(&db).await?;
        let _: Vec<CertificateModel> = SalaryCertificate::find().limit(1).all(&db).await?;
        let _: Vec<FieldModel> = Field::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;

        let _: Vec<ContractModel> = Contract::find().limit(1).all(&db).await?;
        Ok(())
    }
}
