//! Electrolyte adjustments and anion gap grading.

use serde::{Deserialize, Serialize};

use crate::calculators::calculate_anion_gap;
use crate::limits;
use crate::patient::{Abg, Electrolytes};

/// pH shift per mEq/L of bicarbonate change.
const PH_PER_HCO3: f64 = 0.012;

/// Reference bicarbonate for base excess (mEq/L).
const NORMAL_HCO3: f64 = 24.0;

/// Anion gap category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnionGapStatus {
    Normal,
    High,
    Low,
}

impl AnionGapStatus {
    /// High above 12 mEq/L, Low below 8, Normal otherwise.
    pub fn from_gap(gap: f64) -> Self {
        if gap > 12.0 {
            Self::High
        } else if gap < 8.0 {
            Self::Low
        } else {
            Self::Normal
        }
    }

    /// Grade the full Na − (Cl + HCO3) gap of a panel.
    pub fn of(electrolytes: &Electrolytes) -> Self {
        Self::from_gap(calculate_anion_gap(
            electrolytes.sodium,
            electrolytes.chloride,
            electrolytes.bicarbonate,
        ))
    }
}

/// New values for the adjustable electrolytes, all mEq/L.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectrolyteAdjustment {
    pub sodium: f64,
    pub potassium: f64,
    pub chloride: f64,
    pub bicarbonate: f64,
}

impl ElectrolyteAdjustment {
    /// Adjustment that leaves the panel unchanged.
    pub fn from_current(electrolytes: &Electrolytes) -> Self {
        Self {
            sodium: electrolytes.sodium,
            potassium: electrolytes.potassium,
            chloride: electrolytes.chloride,
            bicarbonate: electrolytes.bicarbonate,
        }
    }
}

/// Apply an electrolyte adjustment.
///
/// The anion gap is recomputed from the new values. A bicarbonate change
/// also moves the ABG: pH shifts 0.012 per mEq/L (clamped), HCO3 follows
/// serum bicarbonate and base excess becomes `bicarbonate - 24`.
pub fn simulate_electrolyte_change(
    current: &Electrolytes,
    abg: &Abg,
    adjustment: &ElectrolyteAdjustment,
) -> (Electrolytes, Abg) {
    let new_electrolytes = Electrolytes {
        sodium: adjustment.sodium,
        potassium: adjustment.potassium,
        chloride: adjustment.chloride,
        bicarbonate: adjustment.bicarbonate,
        anion_gap: calculate_anion_gap(
            adjustment.sodium,
            adjustment.chloride,
            adjustment.bicarbonate,
        ),
        ..*current
    };

    let mut new_abg = *abg;
    if adjustment.bicarbonate != current.bicarbonate {
        let hco3_delta = adjustment.bicarbonate - current.bicarbonate;
        new_abg.ph = limits::PH.clamp(abg.ph + hco3_delta * PH_PER_HCO3);
        new_abg.hco3 = adjustment.bicarbonate;
        new_abg.base_excess = adjustment.bicarbonate - NORMAL_HCO3;
    }

    (new_electrolytes, new_abg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::create_normal_patient_state;

    #[test]
    fn test_gap_thresholds() {
        assert_eq!(AnionGapStatus::from_gap(12.0), AnionGapStatus::Normal);
        assert_eq!(AnionGapStatus::from_gap(12.5), AnionGapStatus::High);
        assert_eq!(AnionGapStatus::from_gap(8.0), AnionGapStatus::Normal);
        assert_eq!(AnionGapStatus::from_gap(7.9), AnionGapStatus::Low);
    }

    #[test]
    fn test_full_gap_of_baseline_is_normal() {
        let state = create_normal_patient_state();
        assert_eq!(AnionGapStatus::of(&state.electrolytes), AnionGapStatus::Normal);
    }

    #[test]
    fn test_unchanged_adjustment_is_identity() {
        let state = create_normal_patient_state();
        let adj = ElectrolyteAdjustment::from_current(&state.electrolytes);
        let (e, abg) = simulate_electrolyte_change(&state.electrolytes, &state.abg, &adj);
        assert_eq!(e, state.electrolytes);
        assert_eq!(abg, state.abg);
    }

    #[test]
    fn test_low_bicarbonate_acidifies() {
        let state = create_normal_patient_state();
        let adj = ElectrolyteAdjustment {
            bicarbonate: 14.0,
            ..ElectrolyteAdjustment::from_current(&state.electrolytes)
        };
        let (e, abg) = simulate_electrolyte_change(&state.electrolytes, &state.abg, &adj);
        // 140 - (104 + 14) = 22
        assert_eq!(e.anion_gap, 22.0);
        assert!((abg.ph - 7.28).abs() < 1e-9);
        assert_eq!(abg.hco3, 14.0);
        assert_eq!(abg.base_excess, -10.0);
    }

    #[test]
    fn test_ph_clamped() {
        let state = create_normal_patient_state();
        let adj = ElectrolyteAdjustment {
            bicarbonate: 80.0,
            ..ElectrolyteAdjustment::from_current(&state.electrolytes)
        };
        let (_, abg) = simulate_electrolyte_change(&state.electrolytes, &state.abg, &adj);
        assert_eq!(abg.ph, 7.6);
    }

    #[test]
    fn test_chloride_only_change_leaves_abg() {
        let state = create_normal_patient_state();
        let adj = ElectrolyteAdjustment {
            chloride: 114.0,
            ..ElectrolyteAdjustment::from_current(&state.electrolytes)
        };
        let (e, abg) = simulate_electrolyte_change(&state.electrolytes, &state.abg, &adj);
        assert_eq!(e.anion_gap, 2.0);
        assert_eq!(abg, state.abg);
        // Untouched fields carried over.
        assert_eq!(e.calcium, state.electrolytes.calcium);
    }
}
