//! Configuration module for the engine
//!
//! This module defines the surface mode enum and the tunable editor
//! options (default mode, transition timer delays), including JSON
//! serialization/deserialization. The engine is embedded, so persistent
//! storage of options is the host application's responsibility.

mod settings;

pub use settings::*;
