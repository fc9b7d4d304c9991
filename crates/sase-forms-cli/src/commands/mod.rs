//! CLI Commands

pub mod schemas;
pub mod session;
pub mod validate;

use anyhow::{bail, Result};

/// Split a `name=value` argument
pub fn parse_assignment(raw: &str) -> Result<(String, String)> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => bail!("expected NAME=VALUE, got '{raw}'"),
    }
}
