//! Insurance CRM screens built on the view engine.
//!
//! Each submodule holds one screen's derivations: the column schema it shows,
//! the search fields and filters it offers, its summary figures, and the
//! record writes it performs through a [`Reporter`](crate::report::Reporter).

pub mod clients;
pub mod dashboard;
pub mod metrics;
pub mod pipeline;
pub mod policies;
pub mod tasks;

pub use dashboard::Dashboard;
pub use metrics::Metric;
pub use metrics::MetricFormat;
pub use pipeline::Pipeline;
pub use pipeline::Stage;
pub use policies::PolicySummary;
pub use policies::RenewalStatus;
pub use tasks::TaskFilter;
pub use tasks::TaskStatus;
pub use tasks::TaskSummary;
