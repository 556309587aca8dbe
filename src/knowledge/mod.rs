//! Static knowledge tables loaded once per process and never mutated.
//!
//! These are the hand-authored lookup tables every engine scores against:
//! project idea templates, role definitions, task phase templates, learning
//! topics, and the code analyzer's pattern tables. Regex-backed tables live
//! behind `LazyLock` statics; everything else is `const` data.

pub mod patterns;
pub mod phases;
pub mod roles;
pub mod templates;
pub mod topics;
