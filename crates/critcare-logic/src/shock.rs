//! Shock type, severity, and marker classification.
//!
//! Markers and type are derived independently: markers flag hypoperfusion,
//! and only when at least one is present does the hemodynamic profile pick a
//! type. A profile can fit no rule, leaving the type `None` with markers set.

use crate::patient::{ShockSeverity, ShockState, ShockType, Vitals};

pub const MARKER_HYPOTENSION: &str = "Hypotension";
pub const MARKER_ELEVATED_LACTATE: &str = "Elevated lactate";
pub const MARKER_LOW_CARDIAC_OUTPUT: &str = "Low cardiac output";

/// Classify shock from vitals and lactate (mmol/L).
///
/// `_clinical_context` is accepted for callers that carry a free-text
/// history; it does not influence the result.
///
/// Type rules are tried in order, first match wins:
/// 1. CO < 4 and SVR > 1200 → Cardiogenic
/// 2. CO < 4 and CVP < 8 and SVR > 1200 → Hypovolemic
/// 3. CO > 6 and SVR < 800 → Distributive (Septic)
/// 4. CVP > 15 and CO < 4 → Obstructive
///
/// Rule 2 can never match: any profile it accepts is already taken by
/// rule 1. The order is kept as is.
pub fn assess_shock_state(
    vitals: &Vitals,
    lactate: f64,
    _clinical_context: Option<&str>,
) -> ShockState {
    let map = vitals.mean_arterial_pressure;
    let co = vitals.cardiac_output;
    let svr = vitals.systemic_vascular_resistance;
    let cvp = vitals.central_venous_pressure;

    let mut markers = Vec::new();
    if map < 65.0 {
        markers.push(MARKER_HYPOTENSION.to_string());
    }
    if lactate > 2.0 {
        markers.push(MARKER_ELEVATED_LACTATE.to_string());
    }
    if co < 4.0 {
        markers.push(MARKER_LOW_CARDIAC_OUTPUT.to_string());
    }

    let mut shock_type = ShockType::None;
    let mut severity = ShockSeverity::Mild;

    if !markers.is_empty() {
        shock_type = if co < 4.0 && svr > 1200.0 {
            ShockType::Cardiogenic
        } else if co < 4.0 && cvp < 8.0 && svr > 1200.0 {
            ShockType::Hypovolemic
        } else if co > 6.0 && svr < 800.0 {
            ShockType::DistributiveSeptic
        } else if cvp > 15.0 && co < 4.0 {
            ShockType::Obstructive
        } else {
            ShockType::None
        };

        severity = severity_for(map, lactate);
    }

    ShockState {
        shock_type,
        severity,
        lactate,
        scv_o2: None,
        markers,
    }
}

/// Severe: lactate > 4 or MAP < 55. Moderate: lactate > 2.5 or MAP < 60.
fn severity_for(map: f64, lactate: f64) -> ShockSeverity {
    if lactate > 4.0 || map < 55.0 {
        ShockSeverity::Severe
    } else if lactate > 2.5 || map < 60.0 {
        ShockSeverity::Moderate
    } else {
        ShockSeverity::Mild
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::create_normal_patient_state;

    fn vitals(map: f64, co: f64, svr: f64, cvp: f64) -> Vitals {
        Vitals {
            mean_arterial_pressure: map,
            cardiac_output: co,
            systemic_vascular_resistance: svr,
            central_venous_pressure: cvp,
            ..create_normal_patient_state().vitals
        }
    }

    #[test]
    fn test_normal_patient_not_in_shock() {
        let state = create_normal_patient_state();
        let s = assess_shock_state(&state.vitals, state.abg.lactate, None);
        assert_eq!(s.shock_type, ShockType::None);
        assert_eq!(s.severity, ShockSeverity::Mild);
        assert!(s.markers.is_empty());
        assert_eq!(s.lactate, 1.2);
    }

    #[test]
    fn test_cardiogenic_severe() {
        let s = assess_shock_state(&vitals(55.0, 3.0, 1500.0, 5.0), 5.0, None);
        assert_eq!(
            s.markers,
            vec!["Hypotension", "Elevated lactate", "Low cardiac output"]
        );
        assert_eq!(s.shock_type, ShockType::Cardiogenic);
        assert_eq!(s.severity, ShockSeverity::Severe);
    }

    #[test]
    fn test_hypovolemic_profile_is_taken_by_cardiogenic() {
        // Low CVP does not rescue the hypovolemic rule.
        let s = assess_shock_state(&vitals(58.0, 3.0, 1600.0, 2.0), 3.0, None);
        assert_eq!(s.shock_type, ShockType::Cardiogenic);
        assert_ne!(s.shock_type, ShockType::Hypovolemic);
    }

    #[test]
    fn test_distributive() {
        let s = assess_shock_state(&vitals(58.0, 7.5, 600.0, 6.0), 3.0, None);
        assert_eq!(s.shock_type, ShockType::DistributiveSeptic);
        assert_eq!(s.severity, ShockSeverity::Moderate);
    }

    #[test]
    fn test_obstructive() {
        // SVR not above 1200, so the cardiogenic rule passes over it.
        let s = assess_shock_state(&vitals(60.0, 3.2, 1100.0, 18.0), 2.2, None);
        assert_eq!(s.shock_type, ShockType::Obstructive);
    }

    #[test]
    fn test_markers_without_type() {
        let s = assess_shock_state(&vitals(62.0, 5.0, 1000.0, 8.0), 1.0, None);
        assert_eq!(s.markers, vec!["Hypotension"]);
        assert_eq!(s.shock_type, ShockType::None);
        assert_eq!(s.severity, ShockSeverity::Mild);
    }

    #[test]
    fn test_severity_tiers() {
        let base = vitals(70.0, 5.0, 1000.0, 8.0);
        assert_eq!(assess_shock_state(&base, 2.2, None).severity, ShockSeverity::Mild);
        assert_eq!(assess_shock_state(&base, 3.0, None).severity, ShockSeverity::Moderate);
        assert_eq!(assess_shock_state(&base, 4.5, None).severity, ShockSeverity::Severe);
        let low_map = vitals(54.0, 5.0, 1000.0, 8.0);
        assert_eq!(assess_shock_state(&low_map, 1.0, None).severity, ShockSeverity::Severe);
    }

    #[test]
    fn test_context_ignored_and_pure() {
        let v = vitals(55.0, 3.0, 1500.0, 5.0);
        let a = assess_shock_state(&v, 5.0, Some("post-MI"));
        let b = assess_shock_state(&v, 5.0, None);
        assert_eq!(a, b);
    }
}
