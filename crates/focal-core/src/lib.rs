//! # Focal Core Library
//!
//! This library provides the core business logic for the Focal focus timer.
//! It implements a CLI-first philosophy where all operations are available
//! via a standalone CLI binary; any richer front-end is a thin layer over
//! the same store API.
//!
//! ## Architecture
//!
//! - **Focus Store**: an explicit context object owned by the caller. It
//!   holds the timer session, the phase cycle, the recommendation gate, and
//!   the UI visibility flags, and is the only writer of any of them.
//! - **Timer**: a wall-clock countdown -- remaining time is recomputed from
//!   the start timestamp on every read, never decremented by a counter. The
//!   library has no internal threads; callers poll `tick()`.
//! - **Recommendation Gate**: suggests a focus/break duration pair from the
//!   user's energy level, task type, and time of day, shown at most once
//!   per session until accepted or dismissed.
//! - **Storage**: SQLite session history plus a kv slot for persisting the
//!   store between invocations, and TOML-based configuration.
//!
//! ## Key Components
//!
//! - [`FocusStore`]: the state store front-ends dispatch intents into
//! - [`Database`]: session history and statistics persistence
//! - [`Config`]: application configuration management
//! - [`Event`]: every state change produces one

pub mod coerce;
pub mod display;
pub mod error;
pub mod events;
pub mod recommend;
pub mod storage;
pub mod store;
pub mod timer;

pub use error::{ConfigError, CoreError, DatabaseError, Result, ValidationError};
pub use events::Event;
pub use recommend::{recommend, EnergyLevel, Recommendation, RecommendationGate, TaskType, TimeOfDay};
pub use storage::{Config, Database, SessionOutcome, SessionRecord, Stats};
pub use store::{FocusStore, UiFlags};
pub use timer::{AdjustDirection, Phase, PhaseCycle, TimerSession};
