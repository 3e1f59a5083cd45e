use glam::Vec2;
use metro_dash_core::WorldRect;

/// Distance between a building edge and its outermost windows.
pub const WINDOW_INSET: f32 = 10.0;
/// Distance between the origins of neighbouring windows.
pub const WINDOW_SPACING: f32 = 10.0;
/// Side length of a single window.
pub const WINDOW_SIZE: f32 = 5.0;

const LIT_THRESHOLD: f64 = 0.3;

/// Stable per-building selection of which window cells are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WindowPattern {
    seed: u64,
}

impl WindowPattern {
    /// Derives the pattern for the building generated at `index`.
    #[must_use]
    pub const fn for_building(index: u32) -> Self {
        Self {
            seed: mix(0x9e37_79b9_7f4a_7c15 ^ index as u64),
        }
    }

    /// Window rectangles drawn on a building occupying `rect`.
    pub fn windows(&self, rect: WorldRect) -> impl Iterator<Item = WorldRect> + '_ {
        let origin = rect.origin();
        let limit = origin + rect.size() - Vec2::splat(WINDOW_INSET);
        let columns = cell_count(limit.x - (origin.x + WINDOW_INSET));
        let rows = cell_count(limit.y - (origin.y + WINDOW_INSET));

        (0..columns).flat_map(move |column| {
            (0..rows).filter_map(move |row| {
                if !self.is_drawn(column, row) {
                    return None;
                }
                let cell = Vec2::new(
                    origin.x + WINDOW_INSET + column as f32 * WINDOW_SPACING,
                    origin.y + WINDOW_INSET + row as f32 * WINDOW_SPACING,
                );
                Some(WorldRect::from_origin_and_size(
                    cell,
                    Vec2::splat(WINDOW_SIZE),
                ))
            })
        })
    }

    fn is_drawn(&self, column: u32, row: u32) -> bool {
        let cell = (u64::from(column) << 32) | u64::from(row);
        let value = mix(self.seed ^ cell) >> 11;
        let unit = value as f64 / (1u64 << 53) as f64;
        unit > LIT_THRESHOLD
    }
}

/// Number of window origins strictly inside a span starting at zero.
fn cell_count(span: f32) -> u32 {
    if span <= 0.0 {
        0
    } else {
        (span / WINDOW_SPACING).ceil() as u32
    }
}

const fn mix(value: u64) -> u64 {
    let mut z = value.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
