//! Insurance CRM core library
//!
//! Client records, policy renewals, a sales pipeline and a task list for
//! insurance agents, presented through a generic tabular view engine over any
//! async [`RecordSource`](store::RecordSource).

pub mod crm;
pub mod error;
pub mod model;
pub mod notify;
pub mod report;
pub mod store;
pub mod view;

pub use error::Error;
