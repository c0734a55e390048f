#![deny(unsafe_code)]
#![deny(unused_must_use)]
#![deny(unused_features)]
#![warn(unused_crate_dependencies)]

pub mod profile;
pub mod schema;

pub use profile::*;

pub type Db = diesel::sqlite::Sqlite;
