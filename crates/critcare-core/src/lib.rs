//! Critical Care Matrix Core - stateful simulation store
//!
//! Wraps the pure physiology engine in `critcare-logic` with the pieces a
//! running session needs: a single owned patient state, an append-only
//! intervention log, a bounded trend history, case scenarios, and JSON
//! save/load.
//!
//! # Example
//!
//! ```rust,no_run
//! use critcare_core::prelude::*;
//!
//! let mut store = SimulationStore::with_defaults();
//!
//! store.apply(Action::fluid_bolus(500.0, FluidType::Crystalloid));
//! store.apply(Action::vasopressor("norepinephrine", 0.05));
//!
//! println!("MAP now {}", store.patient_state().vitals.mean_arterial_pressure);
//! ```

pub mod action;
pub mod clock;
pub mod config;
pub mod history;
pub mod intervention;
pub mod persistence;
pub mod scenario;
pub mod store;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::action::Action;
    pub use crate::clock::{Clock, FixedClock, SystemClock};
    pub use crate::config::StoreConfig;
    pub use crate::intervention::{Intervention, InterventionKind, ParamValue};
    pub use crate::persistence::{PersistError, SimulationLibrary, SimulationSnapshot};
    pub use crate::scenario::CaseScenario;
    pub use crate::store::SimulationStore;
    pub use critcare_logic::patient::*;
}
