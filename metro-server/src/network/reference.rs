//! Built-in reference network.

use super::file::{NetworkFile, NetworkFileError};
use super::model::NetworkModel;

/// Canonical definition of the Red Line, also shipped as `data/red_line.json`.
pub const RED_LINE_JSON: &str = include_str!("../../data/red_line.json");

/// The 11-station Red Line chain from Shaheed Sthal to Mansarovar Park.
///
/// Used when no network file is configured.
pub fn red_line() -> Result<NetworkModel, NetworkFileError> {
    Ok(NetworkFile::from_json(RED_LINE_JSON)?.into_model()?)
}
