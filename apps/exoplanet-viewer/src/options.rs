//! Page-supplied startup options.

use serde::Deserialize;

use crate::dataset::DATASET_PATH;
use crate::system::{RingSpec, SystemOptions};

/// Optional JSON object passed to `viewer_init`. Every field has a default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerOptions {
    pub dataset_path: String,
    pub atmosphere: bool,
    /// `[inner, outer]` ring radii in planet radii; no ring when absent.
    pub ring: Option<[f32; 2]>,
    /// Initial viewport in CSS pixels; the window size when absent.
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            dataset_path: DATASET_PATH.to_string(),
            atmosphere: true,
            ring: None,
            width: None,
            height: None,
        }
    }
}

impl ViewerOptions {
    /// Absent or blank input yields the defaults.
    pub fn from_json(json: Option<&str>) -> Result<Self, serde_json::Error> {
        match json.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(s) => serde_json::from_str(s),
        }
    }

    pub fn system(&self) -> SystemOptions {
        SystemOptions {
            atmosphere: self.atmosphere,
            ring: self
                .ring
                .filter(|&[inner, outer]| inner.is_finite() && outer.is_finite() && inner < outer)
                .map(|[inner, outer]| RingSpec { inner, outer }),
        }
    }
}
