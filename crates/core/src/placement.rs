//! Furniture placements exchanged with the front end and the model.

use std::f64::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::layout::LayoutId;

/// The only y-rotations (radians) an arranged asset may take.
pub const ALLOWED_Y_ROTATIONS: [f64; 4] = [0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2];

/// Room half-extent along x and z.
pub const ROOM_BOUND: f64 = 1.0;

/// Minimum centre-to-centre distance requested from the model.
pub const MIN_SEPARATION: f64 = 0.25;

/// Pose of a single furniture asset.
///
/// `rotation` is in radians; only the y component is meaningful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetPlacement {
    pub asset_id: String,
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    #[serde(default)]
    pub scale: Option<[f64; 3]>,
}

impl AssetPlacement {
    pub fn x(&self) -> f64 {
        self.position[0]
    }

    pub fn y(&self) -> f64 {
        self.position[1]
    }

    pub fn z(&self) -> f64 {
        self.position[2]
    }

    pub fn rotation_y(&self) -> f64 {
        self.rotation[1]
    }
}

/// Body of `POST /shuffle-arrangement`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrangementRequest {
    #[serde(rename = "layoutId")]
    pub layout_id: LayoutId,
    pub arrange: Vec<AssetPlacement>,
}

impl ArrangementRequest {
    /// Reject requests that cannot produce a meaningful shuffle.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.arrange.is_empty() {
            return Err(CoreError::Validation(
                "arrange must contain at least one asset".to_string(),
            ));
        }
        if let Some(idx) = self.arrange.iter().position(|a| a.asset_id.trim().is_empty()) {
            return Err(CoreError::Validation(format!(
                "arrange[{idx}].asset_id must not be empty"
            )));
        }
        Ok(())
    }
}

/// Body returned by `POST /shuffle-arrangement`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrangementResponse {
    pub arrange: Vec<AssetPlacement>,
}
