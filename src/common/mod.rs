//! Date types shared between CONTROL file records
mod date;

pub use self::date::*;
