//! Renal perfusion and kidney function staging.

use serde::{Deserialize, Serialize};

use crate::limits;
use crate::patient::RenalParameters;

/// MAP (mmHg) below which renal autoregulation fails.
pub const AUTOREGULATION_MAP: f64 = 65.0;
/// Cardiac output (L/min) below which renal blood flow falls proportionally.
pub const LOW_FLOW_CARDIAC_OUTPUT: f64 = 4.0;
/// Urine output produced per unit of GFR (mL/hr per mL/min).
const URINE_PER_GFR: f64 = 0.8;
/// Creatinine × GFR product at steady state.
const CREATININE_GFR_PRODUCT: f64 = 100.0;
/// Urine output (mL/hr) below which a patient is oliguric.
pub const OLIGURIA_THRESHOLD: f64 = 30.0;

/// Update GFR, urine output, and creatinine for the given perfusion.
///
/// Above a MAP of 65 autoregulation is treated as complete, so perfusion
/// pressure alone never raises GFR. Creatinine is recomputed from the new
/// GFR rather than accumulated. Other fields carry over unchanged.
pub fn simulate_renal_perfusion(
    current: &RenalParameters,
    map: f64,
    cardiac_output: f64,
) -> RenalParameters {
    let mut multiplier = if map < AUTOREGULATION_MAP {
        map / AUTOREGULATION_MAP
    } else {
        1.0
    };
    if cardiac_output < LOW_FLOW_CARDIAC_OUTPUT {
        multiplier *= cardiac_output / LOW_FLOW_CARDIAC_OUTPUT;
    }

    let gfr = limits::GFR.clamp(current.gfr * multiplier);

    RenalParameters {
        gfr,
        urine_output: limits::URINE_OUTPUT.clamp(gfr * URINE_PER_GFR),
        creatinine: limits::CREATININE.clamp(CREATININE_GFR_PRODUCT / gfr),
        ..*current
    }
}

/// CKD-style GFR category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GfrStage {
    G1,
    G2,
    G3a,
    G3b,
    G4,
    G5,
}

impl GfrStage {
    pub fn from_gfr(gfr: f64) -> Self {
        if gfr >= 90.0 {
            Self::G1
        } else if gfr >= 60.0 {
            Self::G2
        } else if gfr >= 45.0 {
            Self::G3a
        } else if gfr >= 30.0 {
            Self::G3b
        } else if gfr >= 15.0 {
            Self::G4
        } else {
            Self::G5
        }
    }
}

/// Acute kidney injury stage by creatinine or urine output, whichever is worse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AkiStage {
    None,
    #[serde(rename = "Stage 1")]
    Stage1,
    #[serde(rename = "Stage 2")]
    Stage2,
    #[serde(rename = "Stage 3")]
    Stage3,
}

impl AkiStage {
    pub fn assess(renal: &RenalParameters) -> Self {
        let cr = renal.creatinine;
        let uo = renal.urine_output;
        if cr >= 3.0 || uo < 20.0 {
            Self::Stage3
        } else if cr >= 2.0 || uo < 30.0 {
            Self::Stage2
        } else if cr >= 1.5 || uo < 40.0 {
            Self::Stage1
        } else {
            Self::None
        }
    }
}

pub fn is_oliguric(renal: &RenalParameters) -> bool {
    renal.urine_output < OLIGURIA_THRESHOLD
}
