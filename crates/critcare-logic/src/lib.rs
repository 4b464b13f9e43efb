//! Pure physiology logic for Critical Care Matrix.
//!
//! This crate contains the whole ICU physiology engine, independent of any
//! store, UI, or persistence layer. Functions take plain data and return new
//! values, so every rule is unit-testable and the same inputs always produce
//! the same outputs.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`acid_base`] | ABG interpretation: primary disturbance, compensation, anion gap |
//! | [`baseline`] | Canonical normal adult used to initialize and reset |
//! | [`calculators`] | MAP, cardiac output, SVR, anion gap, P/F ratio, FENa |
//! | [`electrolytes`] | Electrolyte adjustment and anion gap grading |
//! | [`hemodynamics`] | Fluid bolus and vasopressor simulators |
//! | [`limits`] | Physiologic clamp ranges shared by every simulator |
//! | [`patient`] | Patient state data model (vitals, ventilator, ABG, renal...) |
//! | [`renal`] | Renal perfusion simulator, GFR and AKI staging |
//! | [`shock`] | Shock type, severity, and marker classification |
//! | [`ventilation`] | Ventilator gas exchange, PEEP hemodynamics, ARDS grading |

pub mod acid_base;
pub mod baseline;
pub mod calculators;
pub mod electrolytes;
pub mod hemodynamics;
pub mod limits;
pub mod patient;
pub mod renal;
pub mod shock;
pub mod ventilation;
