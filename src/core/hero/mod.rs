//! Hero identity generation.
//!
//! ```text
//! HeroCard (controller: property bag, display mode, in-flight guard)
//!   +-- PowerStore        records in
//!   +-- generator         pick_distinct / pick_excluding / generate
//!   +-- RandomSource      injectable randomness
//! ```

pub mod card;
pub mod errors;
pub mod generator;
pub mod models;
pub mod random;

pub use card::{DisplayMode, GenerateOutcome, HeroCard, SkipReason};
pub use errors::HeroError;
pub use generator::{generate, pick_distinct, pick_excluding, SHAPE_PALETTE};
pub use models::{HeroIdentity, HeroProperties, PowerRecord};
pub use random::{FixedIndex, RandomSource, RngSource, ScriptedSource};
