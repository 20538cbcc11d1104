//! Shared test utilities for `SalaryEngine`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{entities, errors::Result};
use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, Set, prelude::*};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds a `NaiveDate` from literals.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Creates an active test employee with only a surname set.
pub async fn create_test_employee(
    db: &DatabaseConnection,
    surname: &str,
) -> Result<entities::employee::Model> {
    entities::employee::ActiveModel {
        surname: Set(Some(surname.to_string())),
        name: Set("Анна".to_string()),
        patronymic: Set(None),
        is_active: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Creates an active contract template with no rules attached.
pub async fn create_test_template(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::contract_template::Model> {
    entities::contract_template::ActiveModel {
        name: Set(name.to_string()),
        is_active: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Creates a contract binding an employee to a template.
pub async fn create_test_contract(
    db: &DatabaseConnection,
    employee_id: i64,
    template_id: i64,
    number: i32,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
) -> Result<entities::contract::Model> {
    entities::contract::ActiveModel {
        employee_id: Set(employee_id),
        template_id: Set(template_id),
        number: Set(number),
        start_date: Set(start_date),
        end_date: Set(end_date),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Creates a certificate through the validated creation path.
pub async fn create_test_certificate(
    db: &DatabaseConnection,
    contract_id: i64,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<entities::salary_certificate::Model> {
    crate::core::certificate::create_certificate(db, contract_id, start_date, end_date).await
}

/// Attaches a rate rule to a template.
pub async fn add_rate_rule(
    db: &DatabaseConnection,
    template_id: i64,
    name: &str,
    value: f64,
) -> Result<entities::rate::Model> {
    entities::rate::ActiveModel {
        template_id: Set(template_id),
        name: Set(name.to_string()),
        value: Set(value),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Attaches an amount-of-accrual rule to a template.
pub async fn add_accrual_rule(
    db: &DatabaseConnection,
    template_id: i64,
    required_field: &str,
    value: f64,
) -> Result<entities::amount_of_accrual::Model> {
    entities::amount_of_accrual::ActiveModel {
        template_id: Set(template_id),
        required_field: Set(required_field.to_string()),
        value: Set(value),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Attaches a percentage-of-sales rule to a template.
pub async fn add_percentage_rule(
    db: &DatabaseConnection,
    template_id: i64,
    name: &str,
    percentage_value: f64,
) -> Result<entities::percentage_of_sales::Model> {
    entities::percentage_of_sales::ActiveModel {
        template_id: Set(template_id),
        name: Set(name.to_string()),
        percentage_value: Set(percentage_value),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Attaches an hourly-payment rule to a template.
pub async fn add_hourly_rule(
    db: &DatabaseConnection,
    template_id: i64,
    name: &str,
    value: f64,
) -> Result<entities::hourly_payment::Model> {
    entities::hourly_payment::ActiveModel {
        template_id: Set(template_id),
        name: Set(name.to_string()),
        value: Set(value),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Inserts one accrual row.
pub async fn add_accrual(
    db: &DatabaseConnection,
    employee_id: i64,
    date: NaiveDate,
    name: Option<&str>,
    base: Option<&str>,
    sum: f64,
) -> Result<entities::accrual::Model> {
    entities::accrual::ActiveModel {
        employee_id: Set(employee_id),
        date: Set(date),
        name: Set(name.map(str::to_string)),
        base: Set(base.map(str::to_string)),
        sum: Set(sum),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Inserts one sale row.
pub async fn add_sale(
    db: &DatabaseConnection,
    employee_id: i64,
    date: NaiveDate,
    sum: f64,
) -> Result<entities::sale::Model> {
    entities::sale::ActiveModel {
        employee_id: Set(employee_id),
        date: Set(date),
        sum: Set(sum),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Inserts one schedule row.
pub async fn add_schedule(
    db: &DatabaseConnection,
    employee_id: i64,
    date: NaiveDate,
    time: f64,
) -> Result<entities::schedule::Model> {
    entities::schedule::ActiveModel {
        employee_id: Set(employee_id),
        date: Set(date),
        time: Set(time),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Sets up a complete test environment with an employee and an open-ended
/// contract starting 2024-01-01. Returns (db, employee, contract).
pub async fn setup_with_contract() -> Result<(
    DatabaseConnection,
    entities::employee::Model,
    entities::contract::Model,
)> {
    let db = setup_test_db().await?;
    let employee = create_test_employee(&db, "Иванова").await?;
    let template = create_test_template(&db, "Тренер").await?;
    let contract =
        create_test_contract(&db, employee.id, template.id, 1, date(2024, 1, 1), None).await?;
    Ok((db, employee, contract))
}

/// Sets up a complete test environment with a January 2024 certificate.
/// Returns (db, employee, contract, certificate) for calculation tests.
pub async fn setup_with_certificate() -> Result<(
    DatabaseConnection,
    entities::employee::Model,
    entities::contract::Model,
    entities::salary_certificate::Model,
)> {
    let (db, employee, contract) = setup_with_contract().await?;
    let certificate =
        create_test_certificate(&db, contract.id, date(2024, 1, 1), date(2024, 1, 31)).await?;
    Ok((db, employee, contract, certificate))
}
