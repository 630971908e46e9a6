//! # skill-text
//!
//! Converts structured active-skill effect data from a puzzle RPG
//! into human-readable English descriptions.
//!
//! ## Design Principles
//!
//! 1. **Closed dispatch**: effect kinds are a tagged enum matched
//!    exhaustively, so an effect without a phrasing rule is a
//!    compile error rather than a runtime surprise.
//!
//! 2. **Two failure tiers**: data-quality issues (unknown target
//!    bits, unrecognized board shapes) log to a diagnostic sink and
//!    render best-effort; schema violations raise [`DescribeError`].
//!    An empty string is a valid "nothing to say" result.
//!
//! 3. **Pure conversion**: the engine is stateless aside from the
//!    name tables supplied at construction. The same record always
//!    renders the same string, and concurrent use needs no locking.
//!
//! ## Modules
//!
//! - `format`: pluralization, ordinals, list joins, number formatting
//! - `tables`: attribute/type name tables and row/column phrases
//! - `effect`: the effect record data model
//! - `describe`: the converters, shape recognizer, and composite
//!   resolver behind [`Describer`]

pub mod describe;
pub mod effect;
pub mod format;
pub mod tables;

// Re-export commonly used types
pub use crate::describe::{DescribeError, Describer, PartContext};
pub use crate::effect::{ActiveSkill, Board, LineChange, SkillEffect};
pub use crate::tables::{NameTables, COLUMN_PHRASES, ROW_PHRASES};
