//! Billing download.

mod billing;

pub use billing::*;
