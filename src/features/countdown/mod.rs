//! Work/rest interval countdown.
//!
//! Provides the interval timer and everything around it:
//! - Drift-corrected countdown with work and rest phases
//! - Cycle-count and total-time stop conditions
//! - Tick scheduling with a single cancellation point, used by every timer
//! - The editable settings form

pub mod driver;
pub mod event;
pub mod form;
pub mod schedule;
pub mod settings;
pub mod state;
pub mod timer;

pub use driver::TimerDriver;
pub use event::TimerEvent;
pub use form::{coerce_input, FormField, SettingsForm};
pub use schedule::{TickSchedule, DEFAULT_TICK_INTERVAL_MS};
pub use settings::{TimerMode, TimerSettings};
pub use state::{Phase, TimerState};
pub use timer::CountdownTimer;
