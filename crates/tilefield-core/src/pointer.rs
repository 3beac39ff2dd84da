use glam::Vec2;

/// Off-screen sentinel used before the first pointer move.
pub const POINTER_PARKED: Vec2 = Vec2::new(-9999.0, -9999.0);

/// Last known pointer position plus an edge-triggered "moved" flag.
///
/// Written by the pointer-move handler, consumed once per frame by impulse
/// deposition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerLatch {
    pub pos: Vec2,
    pub moved_this_frame: bool,
}

impl Default for PointerLatch {
    fn default() -> Self {
        Self {
            pos: POINTER_PARKED,
            moved_this_frame: false,
        }
    }
}

impl PointerLatch {
    #[inline]
    pub fn record_move(&mut self, pos: Vec2) {
        self.pos = pos;
        self.moved_this_frame = true;
    }

    /// Position to deposit at, if the pointer moved since the last take.
    #[inline]
    pub fn take_move(&mut self) -> Option<Vec2> {
        std::mem::take(&mut self.moved_this_frame).then_some(self.pos)
    }
}
