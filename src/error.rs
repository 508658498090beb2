// SPDX-License-Identifier: MPL-2.0
//! Crate error type.
//!
//! Store operations never fail (they degrade to no-ops); errors only
//! surface from configuration file I/O.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config Error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config Error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn display_formats_io_error() {
        let err = Error::from(std::io::Error::other("disk failure"));
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn io_error_keeps_its_source() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "boom").into();
        match &err {
            Error::Io(inner) => assert_eq!(inner.kind(), std::io::ErrorKind::NotFound),
            _ => panic!("expected Io variant"),
        }
        assert!(err.source().is_some());
    }

    #[test]
    fn toml_parse_failure_maps_to_config_variant() {
        let parse: std::result::Result<toml::Value, _> = toml::from_str("not = valid = toml");
        let err: Error = parse.unwrap_err().into();
        assert!(matches!(err, Error::ConfigParse(_)));
        assert!(err.to_string().starts_with("Config Error: "));
        assert!(err.source().is_some());
    }
}
