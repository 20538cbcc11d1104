//! Line-item aggregation ("calculate").
//!
//! Evaluates every rule kind attached to the certificate's contract template
//! against the raw event streams for the certificate's period and
//! (re)materializes the automatic line items. The operation is idempotent:
//! every existing automatic field is deleted and re-derived inside one database
//! transaction, so re-running it after new raw events arrive fully reflects the
//! new totals and never double-counts stale lines. Manual fields are untouched.
//!
//! Each rule kind is an independent evaluator with a uniform shape
//! (`contract + period -> Vec<LineItemDraft>`); the aggregator concatenates
//! their results in a fixed order. Adding a new rule kind is additive.

use crate::{
    entities::{
        Accrual, AmountOfAccrual, Contract, Field, HourlyPayment, PercentageOfSales, Rate,
        SalaryCertificate, accrual, amount_of_accrual, contract, field, hourly_payment,
        percentage_of_sales, rate, salary_certificate,
    },
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{Set, TransactionTrait, prelude::*};

/// Unit label for piecework and fixed lines
pub const UNIT_PIECES: &str = "шт.";
/// Unit label for hourly lines
pub const UNIT_HOURS: &str = "ч.";

/// One automatic line item before it is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemDraft {
    /// Service name shown on the document
    pub name: String,
    /// Per-unit price
    pub price: f64,
    /// Quantity; fractional for hours
    pub count: f64,
    /// Unit label
    pub unit: &'static str,
}

/// Recalculates the automatic line items of a certificate.
///
/// Fails with a lock error and no side effects when the certificate is blocked
/// or its original is signed. On success returns the full current line item set
/// (automatic first, then manual).
pub async fn calculate(db: &DatabaseConnection, certificate_id: i64) -> Result<Vec<field::Model>> {
    let certificate = SalaryCertificate::find_by_id(certificate_id)
        .one(db)
        .await?
        .ok_or(Error::CertificateNotFound { id: certificate_id })?;
    ensure_unlocked(&certificate)?;

    let contract = Contract::find_by_id(certificate.contract_id)
        .one(db)
        .await?
        .ok_or(Error::ContractNotFound {
            id: certificate.contract_id,
        })?;

    let start = certificate.start_date;
    let end = certificate.end_date;

    let mut drafts = Vec::new();
    drafts.extend(evaluate_accrual_rules(db, &contract, start, end).await?);
    drafts.extend(evaluate_rate_rules(db, &contract).await?);
    drafts.extend(evaluate_sales_percentage(db, &contract, start, end).await?);
    drafts.extend(evaluate_hourly_payment(db, &contract, start, end).await?);

    // Delete-then-recreate inside one transaction, so a concurrent reader
    // never observes a certificate with zero automatic fields.
    let txn = db.begin().await?;
    Field::delete_many()
        .filter(field::Column::SalaryCertificateId.eq(certificate.id))
        .filter(field::Column::IsAuto.eq(true))
        .exec(&txn)
        .await?;
    for draft in &drafts {
        field::ActiveModel {
            salary_certificate_id: Set(certificate.id),
            name: Set(draft.name.clone()),
            price: Set(draft.price),
            count: Set(draft.count),
            unit: Set(draft.unit.to_string()),
            is_auto: Set(true),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }
    txn.commit().await?;

    tracing::debug!(
        certificate = certificate.number,
        lines = drafts.len(),
        "recalculated automatic fields"
    );

    crate::core::certificate::get_line_items(db, certificate.id).await
}

/// Fails when the certificate is closed to mutation.
pub(crate) const fn ensure_unlocked(certificate: &salary_certificate::Model) -> Result<()> {
    if certificate.is_blocked {
        return Err(Error::CertificateBlocked {
            number: certificate.number,
        });
    }
    if certificate.original_signed {
        return Err(Error::CertificateSigned {
            number: certificate.number,
        });
    }
    Ok(())
}

fn same_price(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Evaluates the amount-of-accrual rules.
///
/// Accrual rows for the period are grouped in memory by their derived name.
/// Every group matching a required `(name, price)` entry becomes a line with
/// the observed count; a group carrying a required name at an unexpected price
/// still folds into its rule (warned, observed price kept) so the name appears
/// once. Required entries never observed become zero-quantity lines, so
/// expected-but-unobserved charge categories stay visible. Observed groups
/// matching no rule are included as well - visibility over omission.
async fn evaluate_accrual_rules(
    db: &DatabaseConnection,
    contract: &contract::Model,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<LineItemDraft>> {
    let rules = AmountOfAccrual::find()
        .filter(amount_of_accrual::Column::TemplateId.eq(contract.template_id))
        .all(db)
        .await?;

    let rows = Accrual::find()
        .filter(accrual::Column::EmployeeId.eq(contract.employee_id))
        .filter(accrual::Column::Date.between(start, end))
        .all(db)
        .await?;

    // Group by derived name, first-seen order. Rows of one group are expected
    // to share one unit price; an inconsistent row is reported and the first
    // observed price kept.
    let mut groups: Vec<(String, f64, u32)> = Vec::new();
    for row in rows {
        let key = row.derived_name();
        if let Some((name, price, count)) = groups.iter_mut().find(|(name, _, _)| *name == key) {
            if !same_price(row.sum, *price) {
                tracing::warn!(
                    group = %name,
                    kept = *price,
                    observed = row.sum,
                    "accrual group has inconsistent unit prices, keeping the first observed"
                );
            }
            *count += 1;
        } else {
            groups.push((key, row.sum, 1));
        }
    }

    // Two matching passes keep one line per name: exact (name, price) matches
    // first, then a name-only pass that folds a group observed at an
    // unexpected price into its rule instead of emitting both a zero-count
    // rule line and a stray group line.
    let mut rule_lines: Vec<Option<LineItemDraft>> = vec![None; rules.len()];
    let mut consumed = vec![false; groups.len()];
    for (r, rule) in rules.iter().enumerate() {
        let matched = (0..groups.len()).find(|&i| {
            !consumed[i]
                && groups[i].0 == rule.required_field
                && same_price(groups[i].1, rule.value)
        });
        if let Some(i) = matched {
            consumed[i] = true;
            let (name, price, count) = &groups[i];
            rule_lines[r] = Some(LineItemDraft {
                name: name.clone(),
                price: *price,
                count: f64::from(*count),
                unit: UNIT_PIECES,
            });
        }
    }
    for (r, rule) in rules.iter().enumerate() {
        if rule_lines[r].is_some() {
            continue;
        }
        let matched =
            (0..groups.len()).find(|&i| !consumed[i] && groups[i].0 == rule.required_field);
        if let Some(i) = matched {
            consumed[i] = true;
            let (name, price, count) = &groups[i];
            tracing::warn!(
                group = %name,
                expected = rule.value,
                observed = *price,
                "accrual group observed at an unexpected unit price"
            );
            rule_lines[r] = Some(LineItemDraft {
                name: name.clone(),
                price: *price,
                count: f64::from(*count),
                unit: UNIT_PIECES,
            });
        } else {
            rule_lines[r] = Some(LineItemDraft {
                name: rule.required_field.clone(),
                price: rule.value,
                count: 0.0,
                unit: UNIT_PIECES,
            });
        }
    }

    let mut drafts: Vec<LineItemDraft> = rule_lines.into_iter().flatten().collect();
    for (i, (name, price, count)) in groups.iter().enumerate() {
        if !consumed[i] {
            drafts.push(LineItemDraft {
                name: name.clone(),
                price: *price,
                count: f64::from(*count),
                unit: UNIT_PIECES,
            });
        }
    }

    Ok(drafts)
}

/// Evaluates the rate rules: one fixed line per rule, no date filtering.
async fn evaluate_rate_rules(
    db: &DatabaseConnection,
    contract: &contract::Model,
) -> Result<Vec<LineItemDraft>> {
    let rules = Rate::find()
        .filter(rate::Column::TemplateId.eq(contract.template_id))
        .all(db)
        .await?;

    Ok(rules
        .into_iter()
        .map(|rule| LineItemDraft {
            name: rule.name,
            price: rule.value,
            count: 1.0,
            unit: UNIT_PIECES,
        })
        .collect())
}

/// Evaluates the percentage-of-sales rule, when the template carries one.
/// A period with no sale rows yields a zero-priced line, not an error.
async fn evaluate_sales_percentage(
    db: &DatabaseConnection,
    contract: &contract::Model,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<LineItemDraft>> {
    let Some(rule) = PercentageOfSales::find()
        .filter(percentage_of_sales::Column::TemplateId.eq(contract.template_id))
        .one(db)
        .await?
    else {
        return Ok(Vec::new());
    };

    let rows = crate::entities::Sale::find()
        .filter(crate::entities::sale::Column::EmployeeId.eq(contract.employee_id))
        .filter(crate::entities::sale::Column::Date.between(start, end))
        .all(db)
        .await?;
    let sale_sum: f64 = rows.iter().map(|row| row.sum).sum();

    Ok(vec![LineItemDraft {
        name: rule.name,
        price: sale_sum * rule.percentage_value / 100.0,
        count: 1.0,
        unit: UNIT_PIECES,
    }])
}

/// Evaluates the hourly-payment rule, when the template carries one.
/// An employee with zero schedule rows in the window gets a zero-hour line,
/// never an error.
async fn evaluate_hourly_payment(
    db: &DatabaseConnection,
    contract: &contract::Model,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<LineItemDraft>> {
    let Some(rule) = HourlyPayment::find()
        .filter(hourly_payment::Column::TemplateId.eq(contract.template_id))
        .one(db)
        .await?
    else {
        return Ok(Vec::new());
    };

    let rows = crate::entities::Schedule::find()
        .filter(crate::entities::schedule::Column::EmployeeId.eq(contract.employee_id))
        .filter(crate::entities::schedule::Column::Date.between(start, end))
        .all(db)
        .await?;
    let hours: f64 = rows.iter().map(|row| row.time).sum();

    Ok(vec![LineItemDraft {
        name: rule.name,
        price: rule.value,
        count: hours,
        unit: UNIT_HOURS,
    }])
}
