//! Diagrammatic Core Library
//!
//! Platform-agnostic scene model and editor controller for interactive 2D
//! vector drawing: items with connectable points, a mergeable undo stack,
//! grid snapping and a pan/zoom view.

pub mod config;
pub mod connections;
pub mod editor;
pub mod error;
pub mod input;
pub mod item;
pub mod painter;
pub mod point;
pub mod scene;
pub mod signals;
pub mod snap;
pub mod style;
pub mod undo;
pub mod view;

pub use config::{EditorConfig, ItemSelectionMode};
pub use connections::{Connections, PointRef};
pub use editor::{Editor, EditorMode, MouseState};
pub use error::{ConfigError, ConfigResult, StyleError, StyleResult};
pub use input::{Key, KeyEvent, Modifiers, MouseButton, MouseEvent, WheelEvent};
pub use item::{Item, ItemFlags, ItemId, ItemKind, PathItem, TransformOp, copy_items};
pub use painter::{Brush, Font, Painter, Pen, TextAlignment};
pub use point::{ItemPoint, PointFlags, PointId};
pub use scene::Scene;
pub use signals::{EditorEvent, Signals, SubscriberId};
pub use snap::{DEFAULT_GRID, SnapResult, round_to_grid, snap_point, snap_to_grid};
pub use style::{Style, StyleColor, StyleKey, StyleValue};
pub use undo::{CommandKind, UndoCommand, UndoStack};
pub use view::ViewTransform;
