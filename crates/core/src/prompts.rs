//! Instruction templates sent to the inference backend.
//!
//! The arrangement template is the whole contract for the shuffle call:
//! every rule it lists is re-checked in [`crate::arrangement`].

use std::fmt::Write as _;
use std::sync::LazyLock;

use crate::error::CoreError;
use crate::layout::LayoutId;
use crate::placement::{AssetPlacement, MIN_SEPARATION, ROOM_BOUND};

/// System instruction for the layout selection call.
pub static SELECTION_INSTRUCTION: LazyLock<String> = LazyLock::new(build_selection_instruction);

fn build_selection_instruction() -> String {
    let mut out = String::from(
        "You are a 3D Layout Assistant for the 'DecideRoom' app.\n\
         You must analyze the user's personality and pick exactly one of these 3D layouts:\n\n",
    );
    for layout in LayoutId::ALL {
        let _ = writeln!(
            out,
            "Layout ID '{}': '{}' ({})",
            layout.as_str(),
            layout.alias(),
            layout.tags()
        );
    }
    out.push_str(
        "\nOutput ONLY a JSON object: {\"layoutId\": \"Energetic\" | \"Calm\" | \"Sample\", \
         \"explanation\": \"...\"}\n\
         Keep the explanation to one or two sentences. Do not wrap the JSON in markdown.",
    );
    out
}

/// Build the user content for the arrangement shuffle call.
pub fn arrangement_prompt(
    layout: LayoutId,
    placements: &[AssetPlacement],
) -> Result<String, CoreError> {
    let items = serde_json::to_string(placements)
        .map_err(|e| CoreError::Internal(format!("failed to serialize placements: {e}")))?;

    Ok(format!(
        "You are rearranging furniture in a 3D room styled as the '{alias}' ({layout}) layout.\n\
         Keep the {layout} style in mind when choosing where each piece goes.\n\n\
         Current arrangement:\n{items}\n\n\
         Produce a new arrangement that follows ALL of these rules:\n\
         1. Every position x and z must be within [-{bound}, {bound}].\n\
         2. Every pair of assets must be at least {sep} units apart in the x/z plane.\n\
         3. Spread the assets as far apart as possible so that nothing overlaps.\n\
         4. Return exactly the same asset_id values, the same number of items, \
            no renaming, no additions, no removals.\n\
         5. Keep position[1] (the y coordinate) of every asset exactly as given.\n\
         6. rotation[1] must be one of 0, 1.57079632679, 3.14159265359, 4.71238898038.\n\
         7. If an asset has a scale, return that scale exactly as given.\n\
         8. The chair and the desk must stay near each other and share the same rotation[1].\n\n\
         Output ONLY a JSON array of objects with the keys \
         \"asset_id\", \"position\", \"rotation\" and \"scale\", in the same shape as the input. \
         Do not wrap the JSON in markdown.",
        alias = layout.alias(),
        layout = layout.as_str(),
        items = items,
        bound = ROOM_BOUND,
        sep = MIN_SEPARATION,
    ))
}
