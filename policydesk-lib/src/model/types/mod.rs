//! CRM data types

mod money;

pub use money::*;
