//! Nearest-humanoid target selection.

use defender_core::types::Position;

/// Pick the candidate closest to `from` by Manhattan distance.
///
/// Ties go to the first minimal candidate in iteration order. Returns
/// `None` when there are no candidates.
pub fn select_nearest<T>(
    from: &Position,
    candidates: impl IntoIterator<Item = (T, Position)>,
) -> Option<(T, Position)> {
    let mut best: Option<(T, Position, f32)> = None;
    for (id, pos) in candidates {
        let d = from.manhattan_to(&pos);
        match &best {
            Some((_, _, best_d)) if d >= *best_d => {}
            _ => best = Some((id, pos, d)),
        }
    }
    best.map(|(id, pos, _)| (id, pos))
}
