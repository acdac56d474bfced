use crate::alignment::{DimAlignment, ParentAlignment, ParentGeometry};
use crate::{Rect, Vec2};

/// Geometry and input flags of a positioned element.
///
/// Fields named `size`, `padding` and `offset` hold *unscaled* values.
/// The accessor methods (`width`, `set_width`, `padding_scaled`, ...) work in
/// effective units, i.e. multiplied by [`Layout::scale`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub local_scale: f32,
    /// Parent's effective scale as of the last pre-draw pass.
    pub parent_scale: f32,
    pub ignore_parent_scale: bool,
    pub size: Vec2,
    pub padding: Vec2,
    pub offset: Vec2,
    pub dim_alignment: DimAlignment,
    pub parent_alignment: ParentAlignment,
    pub capture_cursor: bool,
    pub share_cursor: bool,
    pub(crate) offset_alignment: Vec2,
    pub(crate) moused_over: bool,
    pub(crate) has_parent_scale: bool,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            local_scale: 1.0,
            parent_scale: 1.0,
            ignore_parent_scale: false,
            size: Vec2::ZERO,
            padding: Vec2::ZERO,
            offset: Vec2::ZERO,
            dim_alignment: DimAlignment::empty(),
            parent_alignment: ParentAlignment::CENTER,
            capture_cursor: false,
            share_cursor: false,
            offset_alignment: Vec2::ZERO,
            moused_over: false,
            has_parent_scale: false,
        }
    }
}

impl Layout {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            ..Self::default()
        }
    }

    pub fn with_padding(mut self, padding: Vec2) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.local_scale = scale;
        self
    }

    pub fn with_dim_alignment(mut self, flags: DimAlignment) -> Self {
        self.dim_alignment = flags;
        self
    }

    pub fn with_parent_alignment(mut self, flags: ParentAlignment) -> Self {
        self.parent_alignment = flags;
        self
    }

    pub fn capturing(mut self) -> Self {
        self.capture_cursor = true;
        self
    }

    pub fn sharing(mut self) -> Self {
        self.share_cursor = true;
        self
    }

    /// Effective scale. Inherits the parent's unless this element is a root
    /// or `ignore_parent_scale` is set.
    pub fn scale(&self) -> f32 {
        let parent = self.has_parent_scale.then_some(self.parent_scale);
        crate::alignment::effective_scale(self.local_scale, parent, self.ignore_parent_scale)
    }

    pub fn width(&self) -> f32 {
        (self.size.x + self.padding.x) * self.scale()
    }

    pub fn height(&self) -> f32 {
        (self.size.y + self.padding.y) * self.scale()
    }

    /// Effective size, padding included.
    pub fn size_scaled(&self) -> Vec2 {
        Vec2::new(self.width(), self.height())
    }

    /// Sets the effective width. Padding is subtracted only when `width`
    /// exceeds it.
    pub fn set_width(&mut self, width: f32) {
        let pad = self.padding.x * self.scale();
        let width = if width > pad { width - pad } else { width };
        self.size.x = width / self.scale();
    }

    pub fn set_height(&mut self, height: f32) {
        let pad = self.padding.y * self.scale();
        let height = if height > pad { height - pad } else { height };
        self.size.y = height / self.scale();
    }

    pub fn set_size_scaled(&mut self, size: Vec2) {
        self.set_width(size.x);
        self.set_height(size.y);
    }

    pub fn padding_scaled(&self) -> Vec2 {
        self.padding * self.scale()
    }

    pub fn set_padding_scaled(&mut self, padding: Vec2) {
        self.padding = padding / self.scale();
    }

    pub fn offset_scaled(&self) -> Vec2 {
        self.offset * self.scale()
    }

    pub fn set_offset_scaled(&mut self, offset: Vec2) {
        self.offset = offset / self.scale();
    }

    /// Alignment offset computed by the last pre-draw pass.
    pub fn offset_alignment(&self) -> Vec2 {
        self.offset_alignment
    }

    /// True while this element holds the cursor and the pointer is inside it.
    pub fn is_moused_over(&self) -> bool {
        self.moused_over
    }

    pub(crate) fn as_parent(&self) -> ParentGeometry {
        ParentGeometry {
            size: self.size_scaled(),
            padding: self.padding_scaled(),
            scale: self.scale(),
        }
    }

    /// Applies one frame of parent-relative layout: refreshes the cached
    /// parent scale, then dimension alignment, then the alignment offset.
    /// Roots (`parent == None`) reset to an unaligned, unscaled origin.
    pub(crate) fn apply_parent(&mut self, parent: Option<&ParentGeometry>) {
        let Some(parent) = parent else {
            self.has_parent_scale = false;
            self.parent_scale = 1.0;
            self.offset_alignment = Vec2::ZERO;
            return;
        };

        self.has_parent_scale = true;
        self.parent_scale = parent.scale;

        let (width, height) =
            crate::alignment::dimension_targets(self.size_scaled(), parent, self.dim_alignment);
        if let Some(width) = width {
            self.set_width(width);
        }
        if let Some(height) = height {
            self.set_height(height);
        }

        self.offset_alignment =
            crate::alignment::offset_alignment(self.size_scaled(), parent, self.parent_alignment);
    }

    /// Cursor hit box centred on `position`. Each axis is at least
    /// `min_extent` wide so tiny elements stay clickable.
    pub fn hit_box(&self, position: Vec2, min_extent: f32) -> Rect {
        Rect::from_center(position, self.size_scaled().max(Vec2::splat(min_extent)))
    }
}
