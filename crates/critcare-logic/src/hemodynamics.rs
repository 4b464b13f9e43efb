//! Fluid and vasopressor simulators.
//!
//! Both take the current vitals and return a new [`Vitals`]; the input is
//! never modified.

use serde::{Deserialize, Serialize};

use crate::calculators::{calculate_svr, stroke_volume};
use crate::limits;
use crate::patient::{FluidType, Vitals};

/// Stroke volume gained per liter of fluid (mL).
const STROKE_VOLUME_PER_LITER: f64 = 5.0;
/// MAP gained per mL of stroke volume increase.
const MAP_PER_STROKE_VOLUME: f64 = 0.5;
/// CVP gained per liter of fluid (mmHg).
const CVP_PER_LITER: f64 = 2.0;

/// Systolic sits this far above MAP after a simulator rewrites MAP.
pub const SYSTOLIC_OFFSET: f64 = 40.0;
/// Diastolic sits this far below MAP after a simulator rewrites MAP.
pub const DIASTOLIC_OFFSET: f64 = 20.0;

/// Simulate a fluid bolus of `volume_ml`.
///
/// The patient is assumed to sit on the responsive part of the
/// Frank-Starling curve: stroke volume rises 5 mL per liter, cardiac output
/// follows at the current heart rate, MAP rises half the stroke volume gain
/// and CVP 2 mmHg per liter. SVR is recomputed from the new pressures and
/// flow. Every field written is clamped.
///
/// `_fluid_type` is carried for the record; crystalloid, colloid, and blood
/// products currently have the same numeric effect.
pub fn simulate_fluid_bolus(current: &Vitals, volume_ml: f64, _fluid_type: FluidType) -> Vitals {
    let volume_liters = volume_ml / 1000.0;

    let current_sv = stroke_volume(current.cardiac_output, current.heart_rate);
    let sv_increase = volume_liters * STROKE_VOLUME_PER_LITER;
    let new_sv = current_sv + sv_increase;

    let mut next = *current;
    next.cardiac_output = limits::CARDIAC_OUTPUT.clamp(current.heart_rate * new_sv / 1000.0);
    next.mean_arterial_pressure =
        limits::MAP.clamp(current.mean_arterial_pressure + sv_increase * MAP_PER_STROKE_VOLUME);
    next.systolic_bp = limits::SYSTOLIC_BP.clamp(next.mean_arterial_pressure + SYSTOLIC_OFFSET);
    next.diastolic_bp = limits::DIASTOLIC_BP.clamp(next.mean_arterial_pressure - DIASTOLIC_OFFSET);
    next.central_venous_pressure =
        limits::CVP.clamp(current.central_venous_pressure + volume_liters * CVP_PER_LITER);
    next.systemic_vascular_resistance = limits::SVR.clamp(calculate_svr(
        next.mean_arterial_pressure,
        next.central_venous_pressure,
        next.cardiac_output,
    ));
    next
}

/// Vasoactive agents the simulator knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vasopressor {
    Norepinephrine,
    Vasopressin,
    Epinephrine,
    Dobutamine,
    /// Any name outside the vocabulary. Has no hemodynamic effect.
    Unrecognized,
}

impl Vasopressor {
    pub fn all() -> &'static [Vasopressor] {
        &[
            Self::Norepinephrine,
            Self::Vasopressin,
            Self::Epinephrine,
            Self::Dobutamine,
        ]
    }

    /// Case-insensitive lookup. "noradrenaline" is accepted for
    /// norepinephrine; anything unknown maps to [`Vasopressor::Unrecognized`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "norepinephrine" | "noradrenaline" => Self::Norepinephrine,
            "vasopressin" => Self::Vasopressin,
            "epinephrine" => Self::Epinephrine,
            "dobutamine" => Self::Dobutamine,
            _ => Self::Unrecognized,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Norepinephrine => "norepinephrine",
            Self::Vasopressin => "vasopressin",
            Self::Epinephrine => "epinephrine",
            Self::Dobutamine => "dobutamine",
            Self::Unrecognized => "unrecognized",
        }
    }

    pub fn is_recognized(self) -> bool {
        !matches!(self, Self::Unrecognized)
    }
}

/// Simulate a vasoactive infusion at `dose` mcg/kg/min.
///
/// | Agent | Effect per unit dose |
/// |-------|----------------------|
/// | norepinephrine | SVR +100, MAP +5 |
/// | vasopressin | SVR +200, MAP +8 |
/// | epinephrine | HR +10, SVR +80, CO +0.5 |
/// | dobutamine | CO +0.3, SVR −20 |
/// | unrecognized | none |
///
/// Systolic and diastolic are then rebuilt from MAP without clamping.
pub fn simulate_vasopressor(current: &Vitals, agent: Vasopressor, dose: f64) -> Vitals {
    let mut next = *current;

    match agent {
        Vasopressor::Norepinephrine => {
            next.systemic_vascular_resistance =
                limits::SVR.clamp(current.systemic_vascular_resistance + dose * 100.0);
            next.mean_arterial_pressure =
                limits::MAP.clamp(current.mean_arterial_pressure + dose * 5.0);
        }
        Vasopressor::Vasopressin => {
            next.systemic_vascular_resistance =
                limits::SVR.clamp(current.systemic_vascular_resistance + dose * 200.0);
            next.mean_arterial_pressure =
                limits::MAP.clamp(current.mean_arterial_pressure + dose * 8.0);
        }
        Vasopressor::Epinephrine => {
            next.heart_rate = limits::HEART_RATE.clamp(current.heart_rate + dose * 10.0);
            next.systemic_vascular_resistance =
                limits::SVR.clamp(current.systemic_vascular_resistance + dose * 80.0);
            next.cardiac_output =
                limits::CARDIAC_OUTPUT.clamp(current.cardiac_output + dose * 0.5);
        }
        Vasopressor::Dobutamine => {
            next.cardiac_output =
                limits::CARDIAC_OUTPUT.clamp(current.cardiac_output + dose * 0.3);
            next.systemic_vascular_resistance =
                limits::SVR.clamp(current.systemic_vascular_resistance - dose * 20.0);
        }
        Vasopressor::Unrecognized => {}
    }

    next.systolic_bp = next.mean_arterial_pressure + SYSTOLIC_OFFSET;
    next.diastolic_bp = next.mean_arterial_pressure - DIASTOLIC_OFFSET;
    next
}

/// String-keyed entry point: resolves `medication` with
/// [`Vasopressor::from_name`] and simulates it.
pub fn simulate_vasopressor_by_name(current: &Vitals, medication: &str, dose: f64) -> Vitals {
    simulate_vasopressor(current, Vasopressor::from_name(medication), dose)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::create_normal_patient_state;

    fn normal() -> Vitals {
        create_normal_patient_state().vitals
    }

    #[test]
    fn test_fluid_bolus_500ml() {
        let v = simulate_fluid_bolus(&normal(), 500.0, FluidType::Crystalloid);
        // SV 66.67 + 2.5 → CO = 75 * 69.17 / 1000
        assert!((v.cardiac_output - (5.0 + 75.0 * 2.5 / 1000.0)).abs() < 1e-9);
        assert!((v.mean_arterial_pressure - 94.25).abs() < 1e-9);
        assert!((v.systolic_bp - 134.25).abs() < 1e-9);
        assert!((v.diastolic_bp - 74.25).abs() < 1e-9);
        assert!((v.central_venous_pressure - 9.0).abs() < 1e-9);
        let expected_svr = (94.25 - 9.0) * 80.0 / v.cardiac_output;
        assert!((v.systemic_vascular_resistance - expected_svr).abs() < 1e-9);
        // Untouched
        assert_eq!(v.heart_rate, 75.0);
    }

    #[test]
    fn test_fluid_type_does_not_change_effect() {
        let a = simulate_fluid_bolus(&normal(), 1000.0, FluidType::Crystalloid);
        let b = simulate_fluid_bolus(&normal(), 1000.0, FluidType::Colloid);
        let c = simulate_fluid_bolus(&normal(), 1000.0, FluidType::BloodProduct);
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_fluid_bolus_map_monotone_and_clamped() {
        let mut v = normal();
        for _ in 0..200 {
            let next = simulate_fluid_bolus(&v, 500.0, FluidType::Crystalloid);
            assert!(next.mean_arterial_pressure >= v.mean_arterial_pressure);
            assert!(limits::MAP.contains(next.mean_arterial_pressure));
            assert!(limits::CVP.contains(next.central_venous_pressure));
            assert!(limits::SYSTOLIC_BP.contains(next.systolic_bp));
            assert!(limits::DIASTOLIC_BP.contains(next.diastolic_bp));
            assert!(limits::CARDIAC_OUTPUT.contains(next.cardiac_output));
            assert!(limits::SVR.contains(next.systemic_vascular_resistance));
            v = next;
        }
        assert_eq!(v.mean_arterial_pressure, 130.0);
        assert_eq!(v.central_venous_pressure, 20.0);
    }

    #[test]
    fn test_fluid_bolus_zero_heart_rate() {
        let v = Vitals {
            heart_rate: 0.0,
            ..normal()
        };
        let next = simulate_fluid_bolus(&v, 500.0, FluidType::Crystalloid);
        // No flow is floored at 2 L/min; (94.25 - 9) * 80 / 2 overshoots to the SVR cap.
        assert_eq!(next.cardiac_output, limits::CARDIAC_OUTPUT.min);
        assert_eq!(next.systemic_vascular_resistance, limits::SVR.max);
        assert!(next.mean_arterial_pressure.is_finite());
    }

    #[test]
    fn test_fluid_bolus_clamps_output_and_resistance() {
        // Constricted, low-output patient: SVR would land near 2860.
        let tight = Vitals {
            mean_arterial_pressure: 80.0,
            central_venous_pressure: 2.0,
            cardiac_output: 2.0,
            systemic_vascular_resistance: 1800.0,
            heart_rate: 75.0,
            ..normal()
        };
        let v = simulate_fluid_bolus(&tight, 500.0, FluidType::Crystalloid);
        assert!((v.cardiac_output - 2.1875).abs() < 1e-9);
        assert_eq!(v.systemic_vascular_resistance, 2000.0);

        // Tachycardic, maximal output: CO would reach 13.5 and SVR fall near 470.
        let hyper = Vitals {
            heart_rate: 150.0,
            cardiac_output: 12.0,
            ..normal()
        };
        let v = simulate_fluid_bolus(&hyper, 2000.0, FluidType::Crystalloid);
        assert_eq!(v.cardiac_output, 12.0);
        assert_eq!(v.systemic_vascular_resistance, 800.0);
    }

    #[test]
    fn test_vasopressor_name_lookup() {
        assert_eq!(Vasopressor::from_name("Norepinephrine"), Vasopressor::Norepinephrine);
        assert_eq!(Vasopressor::from_name("NORADRENALINE"), Vasopressor::Norepinephrine);
        assert_eq!(Vasopressor::from_name("vasopressin"), Vasopressor::Vasopressin);
        assert_eq!(Vasopressor::from_name("Epinephrine"), Vasopressor::Epinephrine);
        assert_eq!(Vasopressor::from_name("dobutamine"), Vasopressor::Dobutamine);
        assert_eq!(Vasopressor::from_name("milrinone"), Vasopressor::Unrecognized);
        for agent in Vasopressor::all() {
            assert_eq!(Vasopressor::from_name(agent.name()), *agent);
        }
    }

    #[test]
    fn test_norepinephrine() {
        let v = simulate_vasopressor(&normal(), Vasopressor::Norepinephrine, 0.1);
        assert!((v.systemic_vascular_resistance - 1010.0).abs() < 1e-9);
        assert!((v.mean_arterial_pressure - 93.5).abs() < 1e-9);
        assert!((v.systolic_bp - 133.5).abs() < 1e-9);
        assert!((v.diastolic_bp - 73.5).abs() < 1e-9);
        assert_eq!(v.heart_rate, 75.0);
    }

    #[test]
    fn test_vasopressin() {
        let v = simulate_vasopressor(&normal(), Vasopressor::Vasopressin, 1.0);
        assert_eq!(v.systemic_vascular_resistance, 1200.0);
        assert_eq!(v.mean_arterial_pressure, 101.0);
    }

    #[test]
    fn test_epinephrine_leaves_map() {
        let v = simulate_vasopressor(&normal(), Vasopressor::Epinephrine, 2.0);
        assert_eq!(v.heart_rate, 95.0);
        assert_eq!(v.systemic_vascular_resistance, 1160.0);
        assert_eq!(v.cardiac_output, 6.0);
        assert_eq!(v.mean_arterial_pressure, 93.0);
    }

    #[test]
    fn test_dobutamine() {
        let v = simulate_vasopressor(&normal(), Vasopressor::Dobutamine, 5.0);
        assert!((v.cardiac_output - 6.5).abs() < 1e-9);
        assert_eq!(v.systemic_vascular_resistance, 900.0);
    }

    #[test]
    fn test_unrecognized_is_noop_except_pressure_rebuild() {
        let v = simulate_vasopressor_by_name(&normal(), "milrinone", 10.0);
        let n = normal();
        assert_eq!(v.systemic_vascular_resistance, n.systemic_vascular_resistance);
        assert_eq!(v.cardiac_output, n.cardiac_output);
        assert_eq!(v.heart_rate, n.heart_rate);
        assert_eq!(v.mean_arterial_pressure, n.mean_arterial_pressure);
        // 93 + 40 and 93 - 20
        assert_eq!(v.systolic_bp, 133.0);
        assert_eq!(v.diastolic_bp, 73.0);
    }

    #[test]
    fn test_vasopressor_clamps() {
        let v = simulate_vasopressor_by_name(&normal(), "norepinephrine", 100.0);
        assert!(v.systemic_vascular_resistance <= 2000.0);
        assert!(v.mean_arterial_pressure <= 130.0);
        // Systolic follows MAP unclamped.
        assert_eq!(v.systolic_bp, 170.0);

        let e = simulate_vasopressor(&normal(), Vasopressor::Epinephrine, 100.0);
        assert_eq!(e.heart_rate, 160.0);
        assert_eq!(e.cardiac_output, 12.0);

        let d = simulate_vasopressor(&normal(), Vasopressor::Dobutamine, 100.0);
        assert_eq!(d.systemic_vascular_resistance, 800.0);
    }
}
