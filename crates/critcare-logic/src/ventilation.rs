//! Ventilator effects on gas exchange and hemodynamics.

use serde::{Deserialize, Serialize};

use crate::calculators::oxygen_saturation_from_pao2;
use crate::hemodynamics::{DIASTOLIC_OFFSET, SYSTOLIC_OFFSET};
use crate::limits;
use crate::patient::{Abg, VentilatorSettings, Vitals};

/// pH change per mmHg of CO2 change (simplified Henderson-Hasselbalch).
const PH_PER_CO2: f64 = 0.008;
/// PaO2 change per unit FiO2 change (mmHg).
const PAO2_PER_FIO2: f64 = 500.0;
/// PaO2 change per cmH2O of PEEP change (mmHg).
const PAO2_PER_PEEP: f64 = 10.0;

/// Cardiac output lost per cmH2O of added PEEP (L/min).
const CO_PER_PEEP: f64 = 0.15;
/// MAP lost per cmH2O of added PEEP (mmHg).
const MAP_PER_PEEP: f64 = 2.0;
/// CVP gained per cmH2O of added PEEP (mmHg).
const CVP_PER_PEEP: f64 = 0.5;

/// Predict the ABG after switching from `current_vent` to `new_vent`.
///
/// PaCO2 scales inversely with minute ventilation (RR × TV) and drags pH
/// with it. PaO2 moves with FiO2 and PEEP, and sO2 is read off the
/// dissociation curve. Other ABG fields are carried over.
pub fn simulate_ventilator_change(
    current_abg: &Abg,
    current_vent: &VentilatorSettings,
    new_vent: &VentilatorSettings,
) -> Abg {
    let mut next = *current_abg;

    let current_mv = current_vent.respiratory_rate * current_vent.tidal_volume;
    let new_mv = new_vent.respiratory_rate * new_vent.tidal_volume;

    if new_mv != current_mv {
        next.pa_co2 = if new_mv == 0.0 {
            // Apnea: CO2 climbs to the ceiling.
            limits::PA_CO2.max
        } else {
            limits::PA_CO2.clamp(current_abg.pa_co2 * (current_mv / new_mv))
        };
        let delta_co2 = next.pa_co2 - current_abg.pa_co2;
        next.ph = limits::PH.clamp(current_abg.ph - delta_co2 * PH_PER_CO2);
    }

    let fio2_change = (new_vent.fi_o2 - current_vent.fi_o2) * PAO2_PER_FIO2;
    let peep_change = (new_vent.peep - current_vent.peep) * PAO2_PER_PEEP;
    next.pa_o2 = limits::PA_O2.clamp(current_abg.pa_o2 + fio2_change + peep_change);
    next.s_o2 = oxygen_saturation_from_pao2(next.pa_o2);

    next
}

/// Hemodynamic effect of a PEEP change.
///
/// Raising PEEP raises intrathoracic pressure and cuts venous return:
/// cardiac output and MAP fall while CVP rises. Lowering PEEP reverses each
/// effect by the same magnitude. Systolic and diastolic are rebuilt from MAP.
pub fn simulate_peep_effect(current: &Vitals, current_peep: f64, new_peep: f64) -> Vitals {
    let mut next = *current;
    let delta = new_peep - current_peep;

    // Signed so that a PEEP decrease gives the opposite-sign effect.
    if delta != 0.0 {
        next.cardiac_output =
            limits::CARDIAC_OUTPUT.clamp(current.cardiac_output - delta * CO_PER_PEEP);
        next.mean_arterial_pressure =
            limits::MAP.clamp(current.mean_arterial_pressure - delta * MAP_PER_PEEP);
        next.central_venous_pressure =
            limits::CVP.clamp(current.central_venous_pressure + delta * CVP_PER_PEEP);
    }

    next.systolic_bp = next.mean_arterial_pressure + SYSTOLIC_OFFSET;
    next.diastolic_bp = next.mean_arterial_pressure - DIASTOLIC_OFFSET;
    next
}

/// Hypoxemia grade by P/F ratio (Berlin thresholds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ArdsSeverity {
    None,
    Mild,
    Moderate,
    Severe,
}

impl ArdsSeverity {
    pub fn from_pf_ratio(pf: f64) -> Self {
        if pf >= 300.0 {
            Self::None
        } else if pf >= 200.0 {
            Self::Mild
        } else if pf >= 100.0 {
            Self::Moderate
        } else {
            Self::Severe
        }
    }
}
