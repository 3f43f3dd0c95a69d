//! Calendar engine for solcal.
//!
//! Deterministic, bidirectional mapping between Gregorian dates and a
//! 364-day solar calendar (13 months × 28 days), anchored to a
//! user-chosen Gregorian reference date. The engine also mints the
//! canonical per-day identifier that all collaborative day-scoped records
//! are keyed by, and builds the renderable month/year grids.
//!
//! All conversion and grid functions are pure and synchronous: no I/O, no
//! hidden state, safe to call concurrently. The one piece of mutable state
//! is the active-anchor selection in [`PresetManager`], whose persistence
//! is injected through the [`PresetStore`] trait.

pub mod anchor;
pub mod convert;
pub mod error;
pub mod grid;
pub mod identifier;
pub mod position;
pub mod preset;

pub use anchor::AnchorPreset;
pub use convert::{days_between, from_solar, parse_gregorian, to_solar};
pub use error::{SolcalError, SolcalResult};
pub use grid::{build_month, build_year, DayDescriptor, DayFlags, FlagRules, MonthGrid};
pub use identifier::DateIdentifier;
pub use position::{
    SolarPosition, DAYS_PER_MONTH, DAYS_PER_YEAR, MAX_YEAR, MIN_YEAR, MONTHS_PER_YEAR,
};
pub use preset::{
    MemoryPresetStore, PresetManager, PresetPatch, PresetStore, DEFAULT_PRESET_NAME,
};
