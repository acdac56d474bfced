//! Pointer state and single-owner cursor capture.
//!
//! Exactly one element may own the cursor at a time. Ownership is claimed
//! during the input pass with [`CursorArbiter::capture`] and can only be
//! dropped by its owner. Capture lasts for one frame: [`Cursor::begin_input`]
//! frees the cursor, so the element the input pass reaches first decides
//! again every frame.

use bitflags::bitflags;

use crate::{NodeId, Vec2};

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct PointerButtons: u8 {
        const PRIMARY   = 1 << 0;
        const SECONDARY = 1 << 1;
        const TERTIARY  = 1 << 2;
    }
}

/// Pointer snapshot supplied by the host for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub position: Vec2,
    /// Hidden pointers never hit-test.
    pub visible: bool,
    pub buttons: PointerButtons,
}

impl PointerState {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            visible: true,
            buttons: PointerButtons::empty(),
        }
    }

    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn pressed(mut self, buttons: PointerButtons) -> Self {
        self.buttons = buttons;
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CaptureState {
    #[default]
    Free,
    CapturedBy(NodeId),
}

#[derive(Debug, Default)]
pub struct CursorArbiter {
    state: CaptureState,
}

impl CursorArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn owner(&self) -> Option<NodeId> {
        match self.state {
            CaptureState::Free => None,
            CaptureState::CapturedBy(id) => Some(id),
        }
    }

    /// Claims the cursor for `id`. Returns `false` if someone else owns it.
    pub fn capture(&mut self, id: NodeId) -> bool {
        match self.state {
            CaptureState::Free => {
                log::trace!("cursor captured by {id:?}");
                self.state = CaptureState::CapturedBy(id);
                true
            }
            CaptureState::CapturedBy(owner) => owner == id,
        }
    }

    /// Releases the cursor only if `id` owns it.
    pub fn try_release(&mut self, id: NodeId) -> bool {
        if self.is_capturing(id) {
            log::trace!("cursor released by {id:?}");
            self.state = CaptureState::Free;
            true
        } else {
            false
        }
    }

    pub fn is_captured(&self) -> bool {
        matches!(self.state, CaptureState::CapturedBy(_))
    }

    pub fn is_capturing(&self, id: NodeId) -> bool {
        self.state == CaptureState::CapturedBy(id)
    }

    /// Unconditionally frees the cursor.
    pub fn reset(&mut self) {
        self.state = CaptureState::Free;
    }
}

/// Input context handed to the input pass: the pointer plus the arbiter.
#[derive(Debug, Default)]
pub struct Cursor {
    pub pointer: PointerState,
    pub arbiter: CursorArbiter,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pointer(pointer: PointerState) -> Self {
        Self {
            pointer,
            arbiter: CursorArbiter::new(),
        }
    }

    /// Starts an input frame: takes the new pointer snapshot and frees the
    /// cursor. Last frame's owner gets no head start.
    pub fn begin_input(&mut self, pointer: PointerState) {
        self.pointer = pointer;
        self.arbiter.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn ids(n: usize) -> Vec<NodeId> {
        let mut map: SlotMap<NodeId, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    #[test]
    fn first_claim_wins() {
        let ids = ids(2);
        let mut arb = CursorArbiter::new();
        assert!(arb.capture(ids[0]));
        assert!(arb.capture(ids[0]));
        assert!(!arb.capture(ids[1]));
        assert!(arb.is_capturing(ids[0]));
        assert!(!arb.is_capturing(ids[1]));
    }

    #[test]
    fn only_the_owner_releases() {
        let ids = ids(2);
        let mut arb = CursorArbiter::new();
        arb.capture(ids[0]);
        assert!(!arb.try_release(ids[1]));
        assert!(arb.is_captured());
        assert!(arb.try_release(ids[0]));
        assert_eq!(arb.state(), CaptureState::Free);
        assert!(!arb.try_release(ids[0]));
    }

    #[test]
    fn mutual_exclusion_over_interleaved_calls() {
        let ids = ids(4);
        let mut arb = CursorArbiter::new();
        let mut owner: Option<NodeId> = None;
        // deterministic interleaving of captures and releases
        for step in 0..64usize {
            let id = ids[(step * 7 + step / 3) % ids.len()];
            if step % 3 == 0 {
                let released = arb.try_release(id);
                assert_eq!(released, owner == Some(id));
                if released {
                    owner = None;
                }
            } else {
                let ok = arb.capture(id);
                assert_eq!(ok, owner.is_none() || owner == Some(id));
                if ok {
                    owner = Some(id);
                }
            }
            assert_eq!(arb.owner(), owner);
        }
    }

    #[test]
    fn begin_input_frees_last_frames_owner() {
        let ids = ids(2);
        let mut cursor = Cursor::new();

        cursor.begin_input(PointerState::at(0.0, 0.0));
        assert!(cursor.arbiter.capture(ids[0]));

        cursor.begin_input(PointerState::at(1.0, 1.0));
        assert!(!cursor.arbiter.is_captured());
        assert_eq!(cursor.pointer.position, Vec2::new(1.0, 1.0));
        assert!(cursor.arbiter.capture(ids[1]));
    }
}
