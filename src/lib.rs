//! Retained-mode terminal UI engine: component tree, layout/paint pipeline,
//! Unicode-aware cell buffer, and ANSI diff/flush to a real terminal.
//!
//! The pipeline for one frame is: reconcile the component tree into the
//! element tree (build), ask render objects to size themselves
//! ([`pipeline::PipelineOwner::flush_layout`]), paint them into a
//! [`buffer::Buffer`] via a [`canvas::TerminalCanvas`]
//! ([`pipeline::PipelineOwner::flush_paint`]), then diff and emit ANSI
//! through a [`terminal::Terminal`] backend. [`binding::TerminalBinding`]
//! drives all of this plus input routing and the frame scheduler.

pub mod binding;
pub mod buffer;
pub mod canvas;
pub mod cell;
pub mod color;
pub mod component;
pub mod element;
pub mod error;
pub mod event;
pub mod geometry;
pub mod input;
pub mod pipeline;
pub mod render_object;
pub mod renderer;
pub mod style;
pub mod terminal;
pub mod tree_id;
pub mod width;

pub use binding::{BindingConfig, TerminalBinding};
pub use buffer::{Buffer, CellChange};
pub use canvas::TerminalCanvas;
pub use cell::Cell;
pub use color::{Color, NamedColor};
pub use component::{Component, Key, RenderObjectWidget, StatefulWidget, StatelessWidget, WidgetState};
pub use element::ElementTree;
pub use error::{Error, Result};
pub use event::{InputEvent, KeyCode, KeyboardEvent, Modifiers, MouseButton, MouseEvent};
pub use geometry::{Constraints, Position, Rect, Size};
pub use input::InputParser;
pub use pipeline::PipelineOwner;
pub use render_object::{LayoutContext, PaintContext, ParentData, RenderObject};
pub use renderer::{DeltaBatch, Renderer};
pub use style::{Style, Weight};
pub use terminal::{CrosstermBackend, Terminal, TestBackend};
pub use tree_id::ElementId;
