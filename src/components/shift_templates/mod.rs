mod actor;
mod handle;
pub mod intervals;
pub mod models;
pub mod validation;

pub use handle::ShiftTemplateHandle;
pub use models::{GlobalTolerances, SegmentType, ShiftTemplate, ShiftType, TimeSlot};
pub use validation::{resolve_template, validate, validate_template, ValidationError};

use crate::error::{AppResult, Error};
use std::path::Path;
use tracing::debug;

/// Load a template from a JSON or TOML file, chosen by extension
pub fn load_template_file(path: &Path) -> AppResult<ShiftTemplate> {
    let content = std::fs::read_to_string(path)?;

    let template: ShiftTemplate = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => toml::from_str(&content)?,
        Some("json") | None => serde_json::from_str(&content)?,
        Some(other) => {
            return Err(Error::Other(format!(
                "Unsupported template file extension '.{}' (use .json or .toml)",
                other
            )))
        }
    };

    debug!("Loaded shift template from {}", path.display());
    Ok(template)
}
