//! Types shared by the geocreate crates: attribute schemas, attribute values,
//! point features and the configuration of a dataset to create.
//!
//! Nothing in here talks to GDAL; see `geocreate_gdal` for that.

mod attributes;
mod config;
pub mod csv;
mod driver;
mod feature;
mod schema;
mod value;

pub use attributes::*;
pub use config::*;
pub use driver::*;
pub use feature::*;
pub use schema::*;
pub use value::*;
