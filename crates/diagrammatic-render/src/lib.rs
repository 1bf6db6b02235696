//! Diagrammatic Render Library
//!
//! Paints an editor's scene, grid and interaction feedback onto any
//! [`diagrammatic_core::Painter`], and provides [`DisplayList`], a painter
//! that records draw calls for replay by a backend.

mod display_list;
mod renderer;

pub use display_list::{DisplayList, DrawOp, DrawShape};
pub use renderer::{FrameStats, GridStyle, RenderContext, RenderResult, RendererError, ViewRenderer};
