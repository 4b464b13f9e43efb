//! Acid-base interpretation of an arterial blood gas.
//!
//! Rule-based, in the order a bedside clinician reads a gas:
//!
//! 1. Acidemia (pH < 7.35), alkalemia (pH > 7.45), or normal.
//! 2. Respiratory cause checked before metabolic cause.
//! 3. Expected compensation from the standard acute rules (including
//!    Winter's formula for metabolic acidosis).
//! 4. A CO2 and HCO3 both pushing the same direction as the pH overrides the
//!    label to a mixed disorder.
//!
//! The anion gap graded here is the simplified gap `0 − (0 + HCO3)`: only
//! bicarbonate contributes. Callers with a full electrolyte panel grade the
//! real gap separately through [`crate::electrolytes::AnionGapStatus::of`]
//! and compare the two.

use serde::{Deserialize, Serialize};

use crate::calculators::calculate_anion_gap;
use crate::electrolytes::AnionGapStatus;
use crate::patient::Abg;

/// Primary acid-base disturbance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AcidBaseDisturbance {
    Normal,
    #[serde(rename = "Metabolic Acidosis")]
    MetabolicAcidosis,
    #[serde(rename = "Metabolic Alkalosis")]
    MetabolicAlkalosis,
    #[serde(rename = "Respiratory Acidosis")]
    RespiratoryAcidosis,
    #[serde(rename = "Respiratory Alkalosis")]
    RespiratoryAlkalosis,
    #[serde(rename = "Mixed Disorder")]
    MixedDisorder,
}

/// How fully the opposite system has compensated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Compensation {
    None,
    Partial,
    Complete,
}

/// The compensating value the rules predicted versus what was measured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedCompensation {
    /// `"HCO3"` or `"paCO2"`.
    pub parameter: String,
    pub expected_value: f64,
    pub actual_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcidBaseAnalysis {
    pub primary: AcidBaseDisturbance,
    pub compensation: Compensation,
    pub anion_gap: AnionGapStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_compensation: Option<ExpectedCompensation>,
}

pub const ACIDEMIA_PH: f64 = 7.35;
pub const ALKALEMIA_PH: f64 = 7.45;

/// Interpret an ABG. Total over all real inputs.
pub fn analyze_acid_base(abg: &Abg) -> AcidBaseAnalysis {
    let Abg {
        ph, pa_co2, hco3, ..
    } = *abg;

    let mut primary = AcidBaseDisturbance::Normal;
    let mut compensation = Compensation::None;
    let mut expected = None;

    if ph < ACIDEMIA_PH {
        if pa_co2 > 45.0 {
            primary = AcidBaseDisturbance::RespiratoryAcidosis;
            // Acute: HCO3 rises 1 per 10 mmHg of CO2 above 40.
            let expected_hco3 = 24.0 + (pa_co2 - 40.0) / 10.0;
            if hco3 > 24.0 {
                compensation = grade(hco3 >= expected_hco3);
            }
            expected = Some(ExpectedCompensation::hco3(expected_hco3, hco3));
        } else if hco3 < 22.0 {
            primary = AcidBaseDisturbance::MetabolicAcidosis;
            // Winter's formula, linearised around 40 mmHg.
            let expected_co2 = 40.0 - 1.2 * (24.0 - hco3);
            if pa_co2 < 40.0 {
                compensation = grade(pa_co2 <= expected_co2 + 2.0);
            }
            expected = Some(ExpectedCompensation::pa_co2(expected_co2, pa_co2));
        }
    } else if ph > ALKALEMIA_PH {
        if pa_co2 < 35.0 {
            primary = AcidBaseDisturbance::RespiratoryAlkalosis;
            // Acute: HCO3 falls 2 per 10 mmHg of CO2 below 40.
            let expected_hco3 = 24.0 - ((40.0 - pa_co2) / 10.0) * 2.0;
            if hco3 < 24.0 {
                compensation = grade(hco3 <= expected_hco3);
            }
            expected = Some(ExpectedCompensation::hco3(expected_hco3, hco3));
        } else if hco3 > 26.0 {
            primary = AcidBaseDisturbance::MetabolicAlkalosis;
            let expected_co2 = 40.0 + 0.7 * (hco3 - 24.0);
            if pa_co2 > 40.0 {
                compensation = grade(pa_co2 >= expected_co2 - 2.0);
            }
            expected = Some(ExpectedCompensation::pa_co2(expected_co2, pa_co2));
        }
    }

    // Compensation keeps whatever the primary rule computed.
    if (ph < ACIDEMIA_PH && pa_co2 > 45.0 && hco3 < 22.0)
        || (ph > ALKALEMIA_PH && pa_co2 < 35.0 && hco3 > 26.0)
    {
        primary = AcidBaseDisturbance::MixedDisorder;
    }

    let simplified_gap = calculate_anion_gap(0.0, 0.0, hco3);

    AcidBaseAnalysis {
        primary,
        compensation,
        anion_gap: AnionGapStatus::from_gap(simplified_gap),
        expected_compensation: expected,
    }
}

fn grade(complete: bool) -> Compensation {
    if complete {
        Compensation::Complete
    } else {
        Compensation::Partial
    }
}

impl ExpectedCompensation {
    fn hco3(expected_value: f64, actual_value: f64) -> Self {
        Self {
            parameter: "HCO3".to_string(),
            expected_value,
            actual_value,
        }
    }

    fn pa_co2(expected_value: f64, actual_value: f64) -> Self {
        Self {
            parameter: "paCO2".to_string(),
            expected_value,
            actual_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gas(ph: f64, pa_co2: f64, hco3: f64) -> Abg {
        Abg {
            ph,
            pa_co2,
            pa_o2: 95.0,
            hco3,
            base_excess: hco3 - 24.0,
            lactate: 1.0,
            s_o2: 97.0,
        }
    }

    #[test]
    fn test_normal_gas() {
        let a = analyze_acid_base(&gas(7.40, 40.0, 24.0));
        assert_eq!(a.primary, AcidBaseDisturbance::Normal);
        assert_eq!(a.compensation, Compensation::None);
        assert!(a.expected_compensation.is_none());
    }

    #[test]
    fn test_respiratory_acidosis_complete() {
        let a = analyze_acid_base(&gas(7.28, 55.0, 26.0));
        assert_eq!(a.primary, AcidBaseDisturbance::RespiratoryAcidosis);
        assert_eq!(a.compensation, Compensation::Complete);
        let exp = a.expected_compensation.unwrap();
        assert_eq!(exp.parameter, "HCO3");
        assert!((exp.expected_value - 25.5).abs() < 1e-9);
    }

    #[test]
    fn test_respiratory_acidosis_partial() {
        let a = analyze_acid_base(&gas(7.20, 70.0, 25.0));
        // expected 27, actual 25
        assert_eq!(a.compensation, Compensation::Partial);
    }

    #[test]
    fn test_respiratory_acidosis_uncompensated_when_hco3_not_raised() {
        let a = analyze_acid_base(&gas(7.25, 60.0, 24.0));
        assert_eq!(a.primary, AcidBaseDisturbance::RespiratoryAcidosis);
        assert_eq!(a.compensation, Compensation::None);
    }

    #[test]
    fn test_winters_formula_complete() {
        let a = analyze_acid_base(&gas(7.25, 30.0, 14.0));
        assert_eq!(a.primary, AcidBaseDisturbance::MetabolicAcidosis);
        assert_eq!(a.compensation, Compensation::Complete);
        let exp = a.expected_compensation.unwrap();
        assert_eq!(exp.parameter, "paCO2");
        assert!((exp.expected_value - 28.0).abs() < 1e-9);
    }

    #[test]
    fn test_metabolic_acidosis_partial() {
        // expected 28, limit 30, actual 36
        let a = analyze_acid_base(&gas(7.15, 36.0, 14.0));
        assert_eq!(a.compensation, Compensation::Partial);
    }

    #[test]
    fn test_respiratory_alkalosis() {
        // expected HCO3 = 24 - 2 = 22
        let a = analyze_acid_base(&gas(7.50, 30.0, 22.0));
        assert_eq!(a.primary, AcidBaseDisturbance::RespiratoryAlkalosis);
        assert_eq!(a.compensation, Compensation::Complete);
        let b = analyze_acid_base(&gas(7.50, 30.0, 23.0));
        assert_eq!(b.compensation, Compensation::Partial);
    }

    #[test]
    fn test_metabolic_alkalosis() {
        // expected paCO2 = 40 + 0.7 * 10 = 47
        let a = analyze_acid_base(&gas(7.50, 46.0, 34.0));
        assert_eq!(a.primary, AcidBaseDisturbance::MetabolicAlkalosis);
        assert_eq!(a.compensation, Compensation::Complete);
        let b = analyze_acid_base(&gas(7.55, 42.0, 34.0));
        assert_eq!(b.compensation, Compensation::Partial);
    }

    #[test]
    fn test_mixed_acidosis_overrides_label() {
        let a = analyze_acid_base(&gas(7.10, 60.0, 18.0));
        assert_eq!(a.primary, AcidBaseDisturbance::MixedDisorder);
        // Respiratory rule ran first; hco3 <= 24 so no compensation graded.
        assert_eq!(a.compensation, Compensation::None);
        assert_eq!(a.expected_compensation.unwrap().parameter, "HCO3");
    }

    #[test]
    fn test_mixed_alkalosis_overrides_label() {
        let a = analyze_acid_base(&gas(7.60, 30.0, 30.0));
        assert_eq!(a.primary, AcidBaseDisturbance::MixedDisorder);
    }

    #[test]
    fn test_simplified_gap_only_sees_bicarbonate() {
        // 0 - (0 + hco3) is negative for any positive HCO3.
        assert_eq!(
            analyze_acid_base(&gas(7.40, 40.0, 24.0)).anion_gap,
            AnionGapStatus::Low
        );
        assert_eq!(
            analyze_acid_base(&gas(7.40, 40.0, -20.0)).anion_gap,
            AnionGapStatus::High
        );
        assert_eq!(
            analyze_acid_base(&gas(7.40, 40.0, -10.0)).anion_gap,
            AnionGapStatus::Normal
        );
    }

    #[test]
    fn test_pure() {
        let g = gas(7.31, 50.0, 27.0);
        assert_eq!(analyze_acid_base(&g), analyze_acid_base(&g));
    }
}
