//! Domain models for the MedLab dashboard.
//!
//! Every collection implements [`Record`], which is all the query engine,
//! the store and the view layer need to know about a row.

mod booking;
mod catalog;
mod franchise;
mod inventory;
mod invoice;
mod labels;
mod patient;
mod record;
mod report;
mod settings;
mod staff;

pub use booking::*;
pub use catalog::*;
pub use franchise::*;
pub use inventory::*;
pub use invoice::*;
pub use labels::{ActiveStatus, Gender, Tone, UnknownLabel};
pub use patient::*;
pub use record::{EntityKind, FieldError, FieldValue, Record, ValidationError};
pub use report::*;
pub use settings::*;
pub use staff::*;

pub(crate) use labels::label_enum;
pub(crate) use record::Checks;
