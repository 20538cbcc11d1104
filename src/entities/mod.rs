//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod accrual;
pub mod amount_of_accrual;
pub mod contract;
pub mod contract_template;
pub mod employee;
pub mod field;
pub mod hourly_payment;
pub mod percentage_of_sales;
pub mod rate;
pub mod salary_certificate;
pub mod sale;
pub mod schedule;

// Re-export specific types to avoid conflicts
pub use accrual::{Column as AccrualColumn, Entity as Accrual, Model as AccrualModel};
pub use amount_of_accrual::{
    Column as AmountOfAccrualColumn, Entity as AmountOfAccrual, Model as AmountOfAccrualModel,
};
pub use contract::{Column as ContractColumn, Entity as Contract, Model as ContractModel};
pub use contract_template::{
    Column as ContractTemplateColumn, Entity as ContractTemplate, Model as ContractTemplateModel,
};
pub use employee::{Column as EmployeeColumn, Entity as Employee, Model as EmployeeModel};
pub use field::{Column as FieldColumn, Entity as Field, Model as FieldModel};
pub use hourly_payment::{
    Column as HourlyPaymentColumn, Entity as HourlyPayment, Model as HourlyPaymentModel,
};
pub use percentage_of_sales::{
    Column as PercentageOfSalesColumn, Entity as PercentageOfSales, Model as PercentageOfSalesModel,
};
pub use rate::{Column as RateColumn, Entity as Rate, Model as RateModel};
pub use salary_certificate::{
    Column as SalaryCertificateColumn, Entity as SalaryCertificate, Model as SalaryCertificateModel,
};
pub use sale::{Column as SaleColumn, Entity as Sale, Model as SaleModel};
pub use schedule::{Column as ScheduleColumn, Entity as Schedule, Model as ScheduleModel};
