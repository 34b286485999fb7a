//! Host surface models
//!
//! The engine edits through two live surfaces with very different native
//! contracts:
//!
//! - [`PlainSurface`]: a plain editable-text element exposing a flat string
//!   value and linear selection offsets (think `<textarea>`)
//! - [`RichSurface`]: a rich-rendering editable element exposing only
//!   opaque node-relative carets and stepwise selection motion; there is
//!   deliberately no linear offset API (think `contenteditable`)
//!
//! Both track an attached/detached lifecycle: once detached, writes become
//! no-ops so an in-flight transition never acts on a dead element.

mod plain;
mod rich;

pub use plain::PlainSurface;
pub use rich::{CaretRef, Direction, NativeRange, RichSurface};
