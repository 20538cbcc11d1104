//! Contract template seeding from templates.toml.
//!
//! Operators manage templates through the admin surface; this module only
//! bootstraps a fresh database from a TOML file so a new installation starts
//! with a usable rule catalog. A template whose name already exists is left
//! untouched.

use crate::{
    entities::{
        ContractTemplate, amount_of_accrual, contract_template, hourly_payment,
        percentage_of_sales, rate,
    },
    errors::{Error, Result},
};
use sea_orm::{DatabaseConnection, Set, TransactionTrait, prelude::*};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire templates.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// List of contract templates to seed
    pub templates: Vec<TemplateConfig>,
}

/// Configuration for a single contract template and its rules
#[derive(Debug, Deserialize, Clone)]
pub struct TemplateConfig {
    /// Template name
    pub name: String,
    /// Fixed recurring charges
    #[serde(default)]
    pub rates: Vec<RateConfig>,
    /// Expected accrual groups and their unit prices
    #[serde(default)]
    pub accruals: Vec<AccrualRuleConfig>,
    /// Percentage of the period's sales, at most one
    pub percentage_of_sales: Option<PercentageConfig>,
    /// Per-hour rate, at most one
    pub hourly_payment: Option<HourlyConfig>,
}

/// One fixed recurring charge
#[derive(Debug, Deserialize, Clone)]
pub struct RateConfig {
    /// Line item name
    pub name: String,
    /// Fixed amount per certificate
    pub value: f64,
}

/// One expected accrual group
#[derive(Debug, Deserialize, Clone)]
pub struct AccrualRuleConfig {
    /// Accrual group name to expect
    pub required_field: String,
    /// Expected per-unit price
    pub value: f64,
}

/// The percentage-of-sales rule
#[derive(Debug, Deserialize, Clone)]
pub struct PercentageConfig {
    /// Line item name
    pub name: String,
    /// Percentage in [0, 100]
    pub percentage_value: f64,
}

/// The hourly-payment rule
#[derive(Debug, Deserialize, Clone)]
pub struct HourlyConfig {
    /// Line item name
    pub name: String,
    /// Rate per worked hour
    pub value: f64,
}

/// Loads template configuration from a TOML file and validates it.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read template config file: {e}"),
    })?;

    let config: Config = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse templates.toml: {e}"),
    })?;
    validate_config(&config)?;
    Ok(config)
}

/// Loads template configuration from the default location (./templates.toml)
pub fn load_default_config() -> Result<Config> {
    load_config("templates.toml")
}

fn validate_config(config: &Config) -> Result<()> {
    for template in &config.templates {
        if template.name.trim().is_empty() {
            return Err(Error::Config {
                message: "Template name cannot be empty".to_string(),
            });
        }
        if let Some(percentage) = &template.percentage_of_sales
            && !(0.0..=100.0).contains(&percentage.percentage_value)
        {
            return Err(Error::Config {
                message: format!(
                    "Template \"{}\": percentage_value {} is outside [0, 100]",
                    template.name, percentage.percentage_value
                ),
            });
        }
    }
    Ok(())
}

/// Inserts every configured template whose name is not yet present, together
/// with its rules, each in one transaction.
pub async fn seed_templates(db: &DatabaseConnection, config: &Config) -> Result<usize> {
    let mut seeded = 0;
    for template_config in &config.templates {
        let existing = ContractTemplate::find()
            .filter(contract_template::Column::Name.eq(template_config.name.as_str()))
            .one(db)
            .await?;
        if existing.is_some() {
            continue;
        }

        let txn = db.begin().await?;
        let template = contract_template::ActiveModel {
            name: Set(template_config.name.clone()),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        for rate_config in &template_config.rates {
            rate::ActiveModel {
                template_id: Set(template.id),
                name: Set(rate_config.name.clone()),
                value: Set(rate_config.value),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }
        for accrual_config in &template_config.accruals {
            amount_of_accrual::ActiveModel {
                template_id: Set(template.id),
                required_field: Set(accrual_config.required_field.clone()),
                value: Set(accrual_config.value),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }
        if let Some(percentage) = &template_config.percentage_of_sales {
            percentage_of_sales::ActiveModel {
                template_id: Set(template.id),
                name: Set(percentage.name.clone()),
                percentage_value: Set(percentage.percentage_value),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }
        if let Some(hourly) = &template_config.hourly_payment {
            hourly_payment::ActiveModel {
                template_id: Set(template.id),
                name: Set(hourly.name.clone()),
                value: Set(hourly.value),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }
        txn.commit().await?;

        tracing::info!(template = %template.name, "seeded contract template");
        seeded += 1;
    }
    Ok(seeded)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::entities::{AmountOfAccrual, HourlyPayment, PercentageOfSales, Rate};
    use crate::test_utils::setup_test_db;

    const SAMPLE: &str = r#"
        [[templates]]
        name = "Тренер"

        [[templates.rates]]
        name = "Аренда зала"
        value = 1500.0

        [[templates.accruals]]
        required_field = "Массаж"
        value = 500.0

        [templates.percentage_of_sales]
        name = "Продажа абонементов"
        percentage_value = 10.0

        [[templates]]
        name = "Администратор"

        [templates.hourly_payment]
        name = "Административная деятельность"
        value = 300.0
    "#;

    #[test]
    fn test_parse_template_config() {
        let config: Config = toml::from_str(SAMPLE).unwrap();
        validate_config(&config).unwrap();

        assert_eq!(config.templates.len(), 2);
        let trainer = &config.templates[0];
        assert_eq!(trainer.name, "Тренер");
        assert_eq!(trainer.rates.len(), 1);
        assert_eq!(trainer.accruals[0].required_field, "Массаж");
        assert_eq!(
            trainer.percentage_of_sales.as_ref().unwrap().percentage_value,
            10.0
        );
        assert!(trainer.hourly_payment.is_none());

        let admin = &config.templates[1];
        assert!(admin.rates.is_empty());
        assert_eq!(admin.hourly_payment.as_ref().unwrap().value, 300.0);
    }

    #[test]
    fn test_percentage_out_of_range_rejected() {
        let toml_str = r#"
            [[templates]]
            name = "Тренер"

            [templates.percentage_of_sales]
            name = "Продажи"
            percentage_value = 120.0
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        let result = validate_config(&config);
        assert!(matches!(result.unwrap_err(), Error::Config { .. }));
    }

    #[tokio::test]
    async fn test_seed_templates_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let config: Config = toml::from_str(SAMPLE).unwrap();

        assert_eq!(seed_templates(&db, &config).await?, 2);
        assert_eq!(seed_templates(&db, &config).await?, 0);

        assert_eq!(ContractTemplate::find().all(&db).await?.len(), 2);
        assert_eq!(Rate::find().all(&db).await?.len(), 1);
        assert_eq!(AmountOfAccrual::find().all(&db).await?.len(), 1);
        assert_eq!(PercentageOfSales::find().all(&db).await?.len(), 1);
        assert_eq!(HourlyPayment::find().all(&db).await?.len(), 1);

        Ok(())
    }
}
