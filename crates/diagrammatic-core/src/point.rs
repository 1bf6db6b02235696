//! Handles attached to items.

use bitflags::bitflags;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for item points.
pub type PointId = Uuid;

bitflags! {
    /// Capabilities of an item point.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct PointFlags: u8 {
        /// Dragging the point resizes its item.
        const CONTROL = 1 << 0;
        /// The point can be linked to points on other items.
        const CONNECTION = 1 << 1;
        /// The owning item may be resized to keep a connection intact.
        const FREE = 1 << 2;
    }
}

impl Default for PointFlags {
    fn default() -> Self {
        PointFlags::CONTROL | PointFlags::CONNECTION
    }
}

/// A handle on an item, positioned in the item's local frame.
///
/// Connections between points live in [`Connections`](crate::Connections),
/// not on the point itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPoint {
    id: PointId,
    position: Point,
    flags: PointFlags,
}

impl ItemPoint {
    pub fn new(position: Point, flags: PointFlags) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            flags,
        }
    }

    pub fn id(&self) -> PointId {
        self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn flags(&self) -> PointFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: PointFlags) {
        self.flags = flags;
    }

    pub fn is_control(&self) -> bool {
        self.flags.contains(PointFlags::CONTROL)
    }

    pub fn is_connection(&self) -> bool {
        self.flags.contains(PointFlags::CONNECTION)
    }

    pub fn is_free(&self) -> bool {
        self.flags.contains(PointFlags::FREE)
    }

    /// Same position and flags under a fresh id.
    pub(crate) fn copy(&self) -> Self {
        Self::new(self.position, self.flags)
    }
}
