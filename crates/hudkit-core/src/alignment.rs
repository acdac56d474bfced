//! Alignment flags and the pure functions behind them.
//!
//! Everything here works on *effective* values (scaled, padding included)
//! and has no state of its own; [`crate::Layout`] and the pre-draw pass feed
//! it and write the results back.

use bitflags::bitflags;

use crate::Vec2;

bitflags! {
    /// Copies the parent's width and/or height into the element.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct DimAlignment: u8 {
        const MATCH_WIDTH    = 1 << 0;
        const MATCH_HEIGHT   = 1 << 1;
        /// Match the parent's size minus its padding.
        const IGNORE_PADDING = 1 << 2;

        const BOTH = Self::MATCH_WIDTH.bits() | Self::MATCH_HEIGHT.bits();
    }
}

bitflags! {
    /// Where within the parent's bounds the element's alignment point sits.
    ///
    /// Without `INNER_*` the element is placed flush *outside* the chosen
    /// edge; `TOP | INNER_V` puts it flush inside the top edge. If both bits
    /// of a pair are set, `TOP` and `LEFT` win.
    ///
    /// `INNER_V` / `INNER_H` shrink the alignment interval by the element's
    /// full effective height / width on each side (`max -= size`,
    /// `min += size`), not by half of it: the interval starts out at
    /// `(parent + size) / 2`, so removing the whole size leaves the
    /// element's edge on the parent's edge.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ParentAlignment: u8 {
        const TOP         = 1 << 0;
        const BOTTOM      = 1 << 1;
        const LEFT        = 1 << 2;
        const RIGHT       = 1 << 3;
        const INNER_H     = 1 << 4;
        const INNER_V     = 1 << 5;
        /// Keep clear of the parent's padding.
        const USE_PADDING = 1 << 6;

        const INNER  = Self::INNER_H.bits() | Self::INNER_V.bits();
        const CENTER = 0;
    }
}

/// Parent geometry as seen by a child during pre-draw.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ParentGeometry {
    /// Effective size, padding included.
    pub size: Vec2,
    /// Effective padding.
    pub padding: Vec2,
    pub scale: f32,
}

pub fn effective_scale(local_scale: f32, parent_scale: Option<f32>, ignore_parent_scale: bool) -> f32 {
    match parent_scale {
        Some(parent) if !ignore_parent_scale => local_scale * parent,
        _ => local_scale,
    }
}

/// Width and height the element should take on, if any.
///
/// An axis yields `Some` only when its match flag is set and the current
/// size differs from the target, so repeated passes never rewrite a size
/// that already matches.
pub fn dimension_targets(
    size: Vec2,
    parent: &ParentGeometry,
    flags: DimAlignment,
) -> (Option<f32>, Option<f32>) {
    if flags.is_empty() {
        return (None, None);
    }

    let mut target = parent.size;
    if flags.contains(DimAlignment::IGNORE_PADDING) {
        target -= parent.padding;
    }

    let width = (flags.contains(DimAlignment::MATCH_WIDTH) && size.x != target.x).then_some(target.x);
    let height =
        (flags.contains(DimAlignment::MATCH_HEIGHT) && size.y != target.y).then_some(target.y);
    (width, height)
}

/// Offset of the element's centre from the parent's centre.
pub fn offset_alignment(size: Vec2, parent: &ParentGeometry, flags: ParentAlignment) -> Vec2 {
    let mut max = (parent.size + size) * 0.5;

    if flags.contains(ParentAlignment::USE_PADDING) {
        max -= parent.padding * 0.5;
    }
    if flags.contains(ParentAlignment::INNER_V) {
        max.y -= size.y;
    }
    if flags.contains(ParentAlignment::INNER_H) {
        max.x -= size.x;
    }
    let min = -max;

    let y = if flags.contains(ParentAlignment::TOP) {
        max.y
    } else if flags.contains(ParentAlignment::BOTTOM) {
        min.y
    } else {
        0.0
    };
    let x = if flags.contains(ParentAlignment::LEFT) {
        min.x
    } else if flags.contains(ParentAlignment::RIGHT) {
        max.x
    } else {
        0.0
    };

    Vec2::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parent(w: f32, h: f32) -> ParentGeometry {
        ParentGeometry {
            size: Vec2::new(w, h),
            padding: Vec2::ZERO,
            scale: 1.0,
        }
    }

    #[test]
    fn scale_inherits_unless_ignored() {
        assert_eq!(effective_scale(2.0, Some(0.5), false), 1.0);
        assert_eq!(effective_scale(2.0, Some(0.5), true), 2.0);
        assert_eq!(effective_scale(2.0, None, false), 2.0);
    }

    #[test]
    fn outer_alignment_sits_outside_the_edge() {
        let p = parent(200.0, 100.0);
        let k = Vec2::new(20.0, 20.0);
        let off = offset_alignment(k, &p, ParentAlignment::TOP | ParentAlignment::RIGHT);
        assert_eq!(off, Vec2::new(110.0, 60.0));
    }

    #[test]
    fn inner_alignment_sits_inside_the_edge() {
        let p = parent(200.0, 100.0);
        let k = Vec2::new(20.0, 20.0);
        let flags = ParentAlignment::TOP | ParentAlignment::RIGHT | ParentAlignment::INNER;
        assert_eq!(offset_alignment(k, &p, flags), Vec2::new(90.0, 40.0));

        let flags = ParentAlignment::BOTTOM | ParentAlignment::LEFT | ParentAlignment::INNER;
        assert_eq!(offset_alignment(k, &p, flags), Vec2::new(-90.0, -40.0));
    }

    #[test]
    fn top_and_left_win_ties() {
        let p = parent(100.0, 100.0);
        let k = Vec2::new(10.0, 10.0);
        let all = ParentAlignment::TOP
            | ParentAlignment::BOTTOM
            | ParentAlignment::LEFT
            | ParentAlignment::RIGHT;
        assert_eq!(offset_alignment(k, &p, all), Vec2::new(-55.0, 55.0));
    }

    #[test]
    fn center_is_zero() {
        let p = parent(100.0, 40.0);
        let off = offset_alignment(Vec2::new(30.0, 30.0), &p, ParentAlignment::CENTER);
        assert_eq!(off, Vec2::ZERO);
    }

    #[test]
    fn use_padding_pulls_in_by_half_the_parent_padding() {
        let p = ParentGeometry {
            size: Vec2::new(100.0, 100.0),
            padding: Vec2::new(20.0, 10.0),
            scale: 1.0,
        };
        let k = Vec2::new(10.0, 10.0);
        let flags = ParentAlignment::TOP
            | ParentAlignment::RIGHT
            | ParentAlignment::INNER
            | ParentAlignment::USE_PADDING;
        // (100 + 10) / 2 - 20 / 2 - 10 = 35, (100 + 10) / 2 - 10 / 2 - 10 = 40
        assert_eq!(offset_alignment(k, &p, flags), Vec2::new(35.0, 40.0));
    }

    #[test]
    fn dimension_targets_skip_matching_axes() {
        let p = parent(100.0, 50.0);
        assert_eq!(
            dimension_targets(Vec2::new(100.0, 10.0), &p, DimAlignment::BOTH),
            (None, Some(50.0))
        );
        assert_eq!(
            dimension_targets(Vec2::new(1.0, 1.0), &p, DimAlignment::MATCH_WIDTH),
            (Some(100.0), None)
        );
        assert_eq!(
            dimension_targets(Vec2::new(1.0, 1.0), &p, DimAlignment::empty()),
            (None, None)
        );
    }

    #[test]
    fn ignore_padding_matches_the_inner_box() {
        let p = ParentGeometry {
            size: Vec2::new(100.0, 60.0),
            padding: Vec2::new(10.0, 6.0),
            scale: 1.0,
        };
        let flags = DimAlignment::BOTH | DimAlignment::IGNORE_PADDING;
        assert_eq!(
            dimension_targets(Vec2::ZERO, &p, flags),
            (Some(90.0), Some(54.0))
        );
    }
}
