//! # Element tree, alignment, and cursor capture
//!
//! hudkit is a retained-mode HUD engine. Client code builds a tree of
//! elements once and mutates it over time; every frame the host runs three
//! passes over it:
//!
//! - input — routes the pointer to exactly one element;
//! - pre-draw — settles scale, size and position top-down;
//! - draw — lets each element emit primitives into a [`Scene`].
//!
//! ## Building a tree
//!
//! Nodes live in a [`HudTree`] arena and are addressed by [`NodeId`].
//! Positioned nodes carry a [`Layout`]: unscaled size, padding and offset,
//! a local scale, and two alignment flag sets.
//!
//! ```rust
//! use hudkit_core::*;
//!
//! let mut tree = HudTree::new();
//! let window = tree.insert_positioned(Group, Layout::new(200.0, 100.0));
//! let close = tree.insert_positioned(
//!     Panel::new(Color::WHITE),
//!     Layout::new(20.0, 20.0)
//!         .with_parent_alignment(ParentAlignment::TOP | ParentAlignment::RIGHT | ParentAlignment::INNER),
//! );
//! tree.register(window, close);
//!
//! tree.run_pre_draw(window).unwrap();
//! assert_eq!(tree.position(close), Vec2::new(90.0, 40.0));
//! ```
//!
//! ## Alignment
//!
//! - [`DimAlignment`] copies the parent's width and/or height.
//! - [`ParentAlignment`] pins the element to an edge or corner of its
//!   parent, outside the edge by default or inside with `INNER_*`.
//!
//! An element's origin is never stored; it is derived from the parent's
//! position and the alignment offset computed in the last pre-draw.
//!
//! ## Cursor capture
//!
//! Elements with `capture_cursor` claim the pointer when it is inside their
//! bounds. Children are asked before their parent and later siblings before
//! earlier ones, so the topmost element wins. A parent with `share_cursor`
//! yields its capture while its children run and takes it back if none of
//! them wanted it. The cursor is freed at the start of every input frame.
//!
//! Every hook call is caught on its own, so one panicking element does not
//! stop its siblings or ancestors. [`Runtime`] wraps all of this for hosts
//! with several roots and logs the faults.

pub mod access;
pub mod alignment;
pub mod color;
pub mod cursor;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod node;
pub mod prelude;
pub mod runtime;
pub mod scene;
pub mod tree;

pub use access::*;
pub use alignment::{DimAlignment, ParentAlignment};
pub use color::*;
pub use cursor::*;
pub use error::{HudError, Result};
pub use geometry::*;
pub use layout::*;
pub use node::*;
pub use runtime::*;
pub use scene::*;
pub use tree::*;
