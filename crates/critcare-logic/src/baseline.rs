//! Canonical normal baseline patient.

use chrono::{DateTime, Utc};

use crate::patient::{
    Abg, Electrolytes, PatientState, RenalParameters, ShockState, VentilatorMode,
    VentilatorSettings, Vitals,
};

/// Identifier carried by the baseline state.
pub const BASELINE_ID: &str = "normal-baseline";

/// A hemodynamically, respiratorily, and metabolically normal ventilated
/// adult with no shock, no fluids, and no medications.
///
/// Deterministic: the timestamp is the Unix epoch. The store stamps the real
/// time when it installs the state.
pub fn create_normal_patient_state() -> PatientState {
    PatientState {
        id: BASELINE_ID.to_string(),
        timestamp: DateTime::<Utc>::default(),
        vitals: Vitals {
            heart_rate: 75.0,
            systolic_bp: 120.0,
            diastolic_bp: 80.0,
            mean_arterial_pressure: 93.0,
            central_venous_pressure: 8.0,
            pulmonary_artery_pressure: 25.0,
            cardiac_output: 5.0,
            systemic_vascular_resistance: 1000.0,
            temperature: 37.0,
            respiratory_rate: 16.0,
            oxygen_saturation: 98.0,
        },
        ventilator: VentilatorSettings {
            mode: VentilatorMode::VolumeControlAc,
            tidal_volume: 500.0,
            respiratory_rate: 16.0,
            fi_o2: 0.4,
            peep: 5.0,
            inspiratory_pressure: 20.0,
            i_e_ratio: "1:2".to_string(),
            plateau_pressure: Some(20.0),
            peak_pressure: Some(25.0),
        },
        abg: Abg {
            ph: 7.40,
            pa_co2: 40.0,
            pa_o2: 95.0,
            hco3: 24.0,
            base_excess: 0.0,
            lactate: 1.2,
            s_o2: 98.0,
        },
        electrolytes: Electrolytes {
            sodium: 140.0,
            potassium: 4.0,
            chloride: 104.0,
            bicarbonate: 24.0,
            calcium: 9.0,
            magnesium: 2.0,
            phosphate: 3.5,
            anion_gap: 12.0,
        },
        renal: RenalParameters {
            creatinine: 1.0,
            bun: 15.0,
            gfr: 90.0,
            urine_output: 60.0,
            urine_specific_gravity: 1.010,
            urine_sodium: 40.0,
            fractional_excretion_na: 1.0,
        },
        shock: ShockState {
            lactate: 1.2,
            ..ShockState::default()
        },
        fluids: Vec::new(),
        medications: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::calculate_anion_gap;
    use crate::patient::{ShockSeverity, ShockType};

    #[test]
    fn test_baseline_values() {
        let s = create_normal_patient_state();
        assert_eq!(s.id, BASELINE_ID);
        assert_eq!(s.vitals.heart_rate, 75.0);
        assert_eq!(s.vitals.mean_arterial_pressure, 93.0);
        assert_eq!(s.vitals.central_venous_pressure, 8.0);
        assert_eq!(s.vitals.cardiac_output, 5.0);
        assert_eq!(s.vitals.systemic_vascular_resistance, 1000.0);
        assert_eq!(s.abg.ph, 7.40);
        assert_eq!(s.abg.pa_co2, 40.0);
        assert_eq!(s.abg.pa_o2, 95.0);
        assert_eq!(s.abg.hco3, 24.0);
        assert_eq!(s.abg.lactate, 1.2);
        assert_eq!(s.electrolytes.sodium, 140.0);
        assert_eq!(s.electrolytes.chloride, 104.0);
        assert_eq!(s.electrolytes.bicarbonate, 24.0);
        assert_eq!(s.electrolytes.anion_gap, 12.0);
        assert_eq!(s.renal.creatinine, 1.0);
        assert_eq!(s.renal.gfr, 90.0);
        assert_eq!(s.renal.urine_output, 60.0);
        assert_eq!(s.shock.shock_type, ShockType::None);
        assert_eq!(s.shock.severity, ShockSeverity::Mild);
    }

    #[test]
    fn test_baseline_is_consistent() {
        let s = create_normal_patient_state();
        assert!(s.vitals.systolic_bp >= s.vitals.diastolic_bp);
        assert_eq!(
            calculate_anion_gap(
                s.electrolytes.sodium,
                s.electrolytes.chloride,
                s.electrolytes.bicarbonate
            ),
            s.electrolytes.anion_gap
        );
        assert_eq!(s.shock.lactate, s.abg.lactate);
        assert!(s.fluids.is_empty());
        assert!(s.medications.is_empty());
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(create_normal_patient_state(), create_normal_patient_state());
    }
}
