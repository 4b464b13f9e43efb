//! Physiologic clamp ranges.
//!
//! Every simulator bounds the fields it writes to one of these ranges, so a
//! patient state can never drift outside what the teaching model supports.

/// Closed numeric interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp `value` into the interval.
    pub fn clamp(self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Mean arterial pressure (mmHg).
pub const MAP: Bounds = Bounds::new(50.0, 130.0);
/// Systolic blood pressure (mmHg), applied by the fluid bolus simulator.
pub const SYSTOLIC_BP: Bounds = Bounds::new(70.0, 200.0);
/// Diastolic blood pressure (mmHg), applied by the fluid bolus simulator.
pub const DIASTOLIC_BP: Bounds = Bounds::new(40.0, 120.0);
/// Central venous pressure (mmHg).
pub const CVP: Bounds = Bounds::new(0.0, 20.0);
/// Cardiac output (L/min).
pub const CARDIAC_OUTPUT: Bounds = Bounds::new(2.0, 12.0);
/// Systemic vascular resistance (dynes·s/cm⁵).
pub const SVR: Bounds = Bounds::new(800.0, 2000.0);
/// Heart rate (bpm).
pub const HEART_RATE: Bounds = Bounds::new(40.0, 160.0);

/// Arterial pH.
pub const PH: Bounds = Bounds::new(7.0, 7.6);
/// Arterial CO2 tension (mmHg).
pub const PA_CO2: Bounds = Bounds::new(20.0, 80.0);
/// Arterial O2 tension (mmHg).
pub const PA_O2: Bounds = Bounds::new(40.0, 600.0);

/// Glomerular filtration rate (mL/min/1.73m²).
pub const GFR: Bounds = Bounds::new(10.0, 120.0);
/// Serum creatinine (mg/dL).
pub const CREATININE: Bounds = Bounds::new(0.5, 8.0);
/// Urine output (mL/hr).
pub const URINE_OUTPUT: Bounds = Bounds::new(10.0, 200.0);
