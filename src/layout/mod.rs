//! Pane layout geometry: container size, pane count and mode to rectangles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A pane rectangle in container coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayoutRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl LayoutRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Area in square units
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Whether the point lies inside the rectangle
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x
            && y >= self.y
            && u64::from(x) < u64::from(self.x) + u64::from(self.width)
            && u64::from(y) < u64::from(self.y) + u64::from(self.height)
    }
}

/// How panes share the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    /// First pane on the left half, the rest stacked on the right half
    #[default]
    Tile,
    /// Side-by-side columns
    OneRow,
    /// Stacked rows
    OneColumn,
    /// Every pane gets the whole container; only the focused one is drawn
    Fullscreen,
}

impl LayoutMode {
    /// Cycle Tile -> OneRow -> OneColumn -> Fullscreen -> Tile
    pub fn cycle(&self) -> Self {
        match self {
            LayoutMode::Tile => LayoutMode::OneRow,
            LayoutMode::OneRow => LayoutMode::OneColumn,
            LayoutMode::OneColumn => LayoutMode::Fullscreen,
            LayoutMode::Fullscreen => LayoutMode::Tile,
        }
    }

    /// Returns the display name for the status line
    pub fn display_name(&self) -> &'static str {
        match self {
            LayoutMode::Tile => "TILE",
            LayoutMode::OneRow => "ROW",
            LayoutMode::OneColumn => "COLUMN",
            LayoutMode::Fullscreen => "FULL",
        }
    }
}

/// Error for unrecognized layout mode names
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown layout mode: {0:?}")]
pub struct UnknownLayoutMode(pub String);

impl FromStr for LayoutMode {
    type Err = UnknownLayoutMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "tile" => Ok(LayoutMode::Tile),
            "onerow" | "row" => Ok(LayoutMode::OneRow),
            "onecolumn" | "column" => Ok(LayoutMode::OneColumn),
            "fullscreen" | "full" => Ok(LayoutMode::Fullscreen),
            _ => Err(UnknownLayoutMode(s.to_string())),
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LayoutMode::Tile => "tile",
            LayoutMode::OneRow => "one-row",
            LayoutMode::OneColumn => "one-column",
            LayoutMode::Fullscreen => "fullscreen",
        };
        f.write_str(name)
    }
}

/// Compute pane rectangles for a container.
///
/// Rules:
/// - 0 panes: empty vec
/// - non-positive width or height: `pane_count` zero-sized rects
/// - 1 pane: the full container, whatever the mode
/// - otherwise per [`LayoutMode`]; in split modes the last segment absorbs the
///   rounding remainder so the rects tile the container exactly
pub fn calculate_layout(width: i64, height: i64, pane_count: usize, mode: LayoutMode) -> Vec<LayoutRect> {
    if pane_count == 0 {
        return vec![];
    }
    if width <= 0 || height <= 0 {
        return vec![LayoutRect::default(); pane_count];
    }

    let width = u32::try_from(width).unwrap_or(u32::MAX);
    let height = u32::try_from(height).unwrap_or(u32::MAX);
    let full = LayoutRect::new(0, 0, width, height);

    if pane_count == 1 {
        return vec![full];
    }

    match mode {
        LayoutMode::Fullscreen => vec![full; pane_count],
        LayoutMode::OneRow => split_even(width, pane_count)
            .into_iter()
            .map(|(x, w)| LayoutRect::new(x, 0, w, height))
            .collect(),
        LayoutMode::OneColumn => split_even(height, pane_count)
            .into_iter()
            .map(|(y, h)| LayoutRect::new(0, y, width, h))
            .collect(),
        LayoutMode::Tile => {
            let left_width = width / 2;
            let right_width = width - left_width;

            let mut rects = Vec::with_capacity(pane_count);
            rects.push(LayoutRect::new(0, 0, left_width, height));
            rects.extend(
                split_even(height, pane_count - 1)
                    .into_iter()
                    .map(|(y, h)| LayoutRect::new(left_width, y, right_width, h)),
            );
            rects
        }
    }
}

/// Split `total` into `parts` (offset, length) segments of `total / parts`,
/// the last segment taking whatever is left.
fn split_even(total: u32, parts: usize) -> Vec<(u32, u32)> {
    let parts_u32 = u32::try_from(parts).unwrap_or(u32::MAX);
    let segment = total / parts_u32;

    let mut segments = Vec::with_capacity(parts);
    let mut accumulated = 0u32;
    for i in 0..parts {
        let len = if i == parts - 1 {
            // Last segment gets remaining length
            total - accumulated
        } else {
            segment
        };
        segments.push((accumulated, len));
        accumulated += len;
    }
    segments
}

/// Index of the rect containing the point, if any.
///
/// In fullscreen every rect overlaps, so callers should resolve hits against
/// the focused pane instead.
pub fn pane_at(rects: &[LayoutRect], x: u32, y: u32) -> Option<usize> {
    rects.iter().position(|r| r.contains(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total_area(rects: &[LayoutRect]) -> u64 {
        rects.iter().map(LayoutRect::area).sum()
    }

    #[test]
    fn zero_panes_returns_empty() {
        assert!(calculate_layout(100, 50, 0, LayoutMode::Tile).is_empty());
    }

    #[test]
    fn non_positive_size_returns_zero_sized_rects() {
        let rects = calculate_layout(0, 50, 3, LayoutMode::OneRow);
        assert_eq!(rects, vec![LayoutRect::default(); 3]);
        let rects = calculate_layout(100, -5, 2, LayoutMode::Tile);
        assert_eq!(rects.len(), 2);
        assert!(rects.iter().all(|r| r.area() == 0));
    }

    #[test]
    fn one_pane_is_full_size_in_every_mode() {
        for mode in [
            LayoutMode::Tile,
            LayoutMode::OneRow,
            LayoutMode::OneColumn,
            LayoutMode::Fullscreen,
        ] {
            assert_eq!(
                calculate_layout(120, 40, 1, mode),
                vec![LayoutRect::new(0, 0, 120, 40)]
            );
        }
    }

    #[test]
    fn tile_puts_first_pane_on_left_half_and_stacks_the_rest() {
        let rects = calculate_layout(101, 50, 4, LayoutMode::Tile);
        assert_eq!(rects.len(), 4);
        assert_eq!(rects[0], LayoutRect::new(0, 0, 50, 50));
        // 50 / 3 = 16, last absorbs the remainder
        assert_eq!(rects[1], LayoutRect::new(50, 0, 51, 16));
        assert_eq!(rects[2], LayoutRect::new(50, 16, 51, 16));
        assert_eq!(rects[3], LayoutRect::new(50, 32, 51, 18));
    }

    #[test]
    fn split_modes_tile_the_container_exactly() {
        for (w, h, n) in [(100, 50, 2), (101, 47, 3), (7, 3, 4), (1920, 1080, 4)] {
            for mode in [LayoutMode::Tile, LayoutMode::OneRow, LayoutMode::OneColumn] {
                let rects = calculate_layout(w, h, n, mode);
                assert_eq!(total_area(&rects), (w * h) as u64, "{mode} {w}x{h} n={n}");
            }
        }
    }

    #[test]
    fn one_row_last_column_absorbs_remainder() {
        let rects = calculate_layout(100, 30, 3, LayoutMode::OneRow);
        assert_eq!(rects[0].width, 33);
        assert_eq!(rects[1].width, 33);
        assert_eq!(rects[2].width, 34);
        assert_eq!(rects[2].x, 66);
    }

    #[test]
    fn one_column_stacks_rows() {
        let rects = calculate_layout(80, 25, 2, LayoutMode::OneColumn);
        assert_eq!(rects[0], LayoutRect::new(0, 0, 80, 12));
        assert_eq!(rects[1], LayoutRect::new(0, 12, 80, 13));
    }

    #[test]
    fn fullscreen_gives_every_pane_the_container() {
        let rects = calculate_layout(80, 25, 3, LayoutMode::Fullscreen);
        assert!(rects.iter().all(|r| *r == LayoutRect::new(0, 0, 80, 25)));
    }

    #[test]
    fn mode_parses_from_common_spellings() {
        assert_eq!("oneRow".parse::<LayoutMode>(), Ok(LayoutMode::OneRow));
        assert_eq!("one-column".parse::<LayoutMode>(), Ok(LayoutMode::OneColumn));
        assert!("grid".parse::<LayoutMode>().is_err());
    }

    #[test]
    fn pane_at_finds_containing_rect() {
        let rects = calculate_layout(100, 50, 3, LayoutMode::Tile);
        assert_eq!(pane_at(&rects, 10, 10), Some(0));
        assert_eq!(pane_at(&rects, 60, 40), Some(2));
        assert_eq!(pane_at(&rects, 100, 10), None);
    }
}
