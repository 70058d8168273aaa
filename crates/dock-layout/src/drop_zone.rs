use dock_core::DropZone;

/// Fraction of the target height treated as the top band.
const TOP_BAND: f32 = 0.3;

/// Fraction of the target height where the bottom band starts.
const BOTTOM_BAND: f32 = 0.7;

/// Classify a pointer position, relative to the target pane's top-left
/// corner, into one of the five drop zones.
///
/// Side bands are checked first and have a fixed width; the top and bottom
/// bands are proportional to the target height. Pure and deterministic.
pub fn resolve_drop_zone(
    pointer_x: f32,
    pointer_y: f32,
    target_width: f32,
    target_height: f32,
    edge_threshold: f32,
) -> DropZone {
    if pointer_x < edge_threshold {
        DropZone::Left
    } else if pointer_x > target_width - edge_threshold {
        DropZone::Right
    } else if pointer_y < TOP_BAND * target_height {
        DropZone::Top
    } else if pointer_y > BOTTOM_BAND * target_height {
        DropZone::Bottom
    } else {
        DropZone::Center
    }
}
