//! Invariant checks for a model-proposed furniture arrangement.
//!
//! Non-conforming output is rejected, never clamped or repaired. The only
//! adjustment made is snapping an accepted y-rotation to the exact constant
//! it was matched against.

use std::collections::{HashMap, VecDeque};

use crate::error::CoreError;
use crate::placement::{AssetPlacement, ALLOWED_Y_ROTATIONS, ROOM_BOUND};

/// Slack when matching rotation.y against the allowed quarter turns.
pub const ROTATION_TOLERANCE: f64 = 1e-6;

/// Slack on the room bounds for values printed with rounding.
const BOUND_TOLERANCE: f64 = 1e-9;

fn violation(msg: String) -> CoreError {
    CoreError::MalformedOutput(format!("arrangement rule violated: {msg}"))
}

/// Check `output` against the request it answers and return the accepted
/// placements in the model's order.
pub fn verify(
    input: &[AssetPlacement],
    output: Vec<AssetPlacement>,
) -> Result<Vec<AssetPlacement>, CoreError> {
    if input.len() != output.len() {
        return Err(violation(format!(
            "expected {} assets, got {}",
            input.len(),
            output.len()
        )));
    }

    let mut originals: HashMap<&str, VecDeque<&AssetPlacement>> = HashMap::new();
    for item in input {
        originals.entry(item.asset_id.as_str()).or_default().push_back(item);
    }

    let mut accepted = Vec::with_capacity(output.len());
    for mut item in output {
        let original = originals
            .get_mut(item.asset_id.as_str())
            .and_then(VecDeque::pop_front)
            .ok_or_else(|| {
                violation(format!("unexpected or duplicated asset_id '{}'", item.asset_id))
            })?;

        check_position(original, &item)?;
        item.rotation[1] = snap_rotation(&item)?;
        check_scale(original, &item)?;
        accepted.push(item);
    }

    check_desk_pairs(&accepted)?;
    Ok(accepted)
}

fn check_position(original: &AssetPlacement, item: &AssetPlacement) -> Result<(), CoreError> {
    if item.y() != original.y() {
        return Err(violation(format!(
            "'{}' moved vertically from y={} to y={}",
            item.asset_id,
            original.y(),
            item.y()
        )));
    }
    for (axis, value) in [("x", item.x()), ("z", item.z())] {
        if !value.is_finite() || value.abs() > ROOM_BOUND + BOUND_TOLERANCE {
            return Err(violation(format!(
                "'{}' has {axis}={value} outside [-{ROOM_BOUND}, {ROOM_BOUND}]",
                item.asset_id
            )));
        }
    }
    Ok(())
}

fn snap_rotation(item: &AssetPlacement) -> Result<f64, CoreError> {
    let y = item.rotation_y();
    ALLOWED_Y_ROTATIONS
        .iter()
        .copied()
        .find(|allowed| (y - allowed).abs() <= ROTATION_TOLERANCE)
        .ok_or_else(|| {
            violation(format!(
                "'{}' has rotation.y={y}, not a quarter turn",
                item.asset_id
            ))
        })
}

fn check_scale(original: &AssetPlacement, item: &AssetPlacement) -> Result<(), CoreError> {
    let same = match (original.scale, item.scale) {
        (Some(a), Some(b)) => a.iter().zip(b.iter()).all(|(x, y)| x.to_bits() == y.to_bits()),
        (None, None) => true,
        _ => false,
    };
    if same {
        Ok(())
    } else {
        Err(violation(format!(
            "'{}' scale changed from {:?} to {:?}",
            item.asset_id, original.scale, item.scale
        )))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PairedKind {
    Chair,
    Desk,
}

/// Classify an asset id as chair or desk, returning the text after the
/// keyword (`"chair2"` → `(Chair, "2")`) used to match pairs.
fn paired_kind(asset_id: &str) -> Option<(PairedKind, String)> {
    let lower = asset_id.to_ascii_lowercase();
    for (keyword, kind) in [("chair", PairedKind::Chair), ("desk", PairedKind::Desk)] {
        if let Some(pos) = lower.find(keyword) {
            return Some((kind, lower[pos + keyword.len()..].to_string()));
        }
    }
    None
}

/// Every chair must share rotation.y with its desk.
///
/// A chair is paired with the desk carrying the same suffix; failing that,
/// with the only desk in the room. Chairs with no resolvable desk are not
/// checked.
fn check_desk_pairs(items: &[AssetPlacement]) -> Result<(), CoreError> {
    let mut chairs = Vec::new();
    let mut desks = Vec::new();
    for item in items {
        match paired_kind(&item.asset_id) {
            Some((PairedKind::Chair, suffix)) => chairs.push((suffix, item)),
            Some((PairedKind::Desk, suffix)) => desks.push((suffix, item)),
            None => {}
        }
    }

    for (suffix, chair) in &chairs {
        let desk = desks
            .iter()
            .find(|(desk_suffix, _)| desk_suffix == suffix)
            .or(if desks.len() == 1 { desks.first() } else { None })
            .map(|(_, desk)| *desk);

        if let Some(desk) = desk {
            if chair.rotation_y() != desk.rotation_y() {
                return Err(violation(format!(
                    "'{}' rotation.y={} differs from '{}' rotation.y={}",
                    chair.asset_id,
                    chair.rotation_y(),
                    desk.asset_id,
                    desk.rotation_y()
                )));
            }
        }
    }
    Ok(())
}
