//! Learner actions and how each one moves the patient.
//!
//! An [`Action`] is pure: [`Action::apply`] builds the next [`PatientState`]
//! from the current one by composing the engine's simulators, and knows how
//! to describe itself for the intervention log. The store adds the clock,
//! renal coupling, and history on top.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use critcare_logic::electrolytes::{simulate_electrolyte_change, ElectrolyteAdjustment};
use critcare_logic::hemodynamics::{simulate_fluid_bolus, simulate_vasopressor, Vasopressor};
use critcare_logic::patient::{
    FluidAdministration, FluidType, Medication, MedicationRoute, PatientState, VentilatorSettings,
};
use critcare_logic::shock::assess_shock_state;
use critcare_logic::ventilation::{simulate_peep_effect, simulate_ventilator_change};

use crate::intervention::{InterventionKind, ParamValue};

/// Infusion unit recorded for vasoactive agents.
pub const VASOPRESSOR_UNIT: &str = "mcg/kg/min";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Action {
    /// Give a fluid; the record is appended to the patient's fluids.
    FluidBolus { fluid: FluidAdministration },
    /// Start or titrate a vasoactive infusion. `medication` is kept as
    /// entered and resolved with [`Vasopressor::from_name`] when applied.
    #[serde(rename_all = "camelCase")]
    Vasopressor {
        medication: String,
        dose_mcg_kg_min: f64,
    },
    /// Replace the ventilator settings.
    Ventilator { settings: VentilatorSettings },
    /// Set serum electrolytes.
    Electrolytes { adjustment: ElectrolyteAdjustment },
}

impl Action {
    /// A bolus of `volume_ml` named after its fluid class, run over an hour.
    pub fn fluid_bolus(volume_ml: f64, fluid_type: FluidType) -> Self {
        Action::FluidBolus {
            fluid: FluidAdministration {
                fluid_type,
                name: fluid_type.label().to_string(),
                volume_ml,
                rate_ml_hr: volume_ml,
            },
        }
    }

    /// Vasopressor by name. Unknown names are kept and have no effect.
    pub fn vasopressor(name: &str, dose_mcg_kg_min: f64) -> Self {
        Action::Vasopressor {
            medication: name.trim().to_string(),
            dose_mcg_kg_min,
        }
    }

    /// The agent a vasopressor action dispatches to.
    pub fn agent(&self) -> Option<Vasopressor> {
        match self {
            Action::Vasopressor { medication, .. } => Some(Vasopressor::from_name(medication)),
            _ => None,
        }
    }

    pub fn kind(&self) -> InterventionKind {
        match self {
            Action::FluidBolus { .. } => InterventionKind::Fluid,
            Action::Vasopressor { .. } => InterventionKind::Medication,
            Action::Ventilator { .. } => InterventionKind::Ventilator,
            Action::Electrolytes { .. } => InterventionKind::Other,
        }
    }

    /// Leading segment of generated intervention ids.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Action::FluidBolus { .. } => "fluid",
            Action::Vasopressor { .. } => "vasopressor",
            Action::Ventilator { .. } => "vent",
            Action::Electrolytes { .. } => "electrolytes",
        }
    }

    /// Human-readable log line.
    pub fn description(&self) -> String {
        match self {
            Action::FluidBolus { fluid } => {
                format!("{} mL {} bolus", fluid.volume_ml, fluid.fluid_type.label())
            }
            Action::Vasopressor {
                medication,
                dose_mcg_kg_min,
            } => format!("{} {} {}", medication, dose_mcg_kg_min, VASOPRESSOR_UNIT),
            Action::Ventilator { settings } => format!(
                "Vent: TV {} mL, RR {}, FiO2 {}%, PEEP {}",
                settings.tidal_volume,
                settings.respiratory_rate,
                fio2_percent(settings.fi_o2),
                settings.peep
            ),
            Action::Electrolytes { adjustment } => format!(
                "Electrolyte adjustment: Na {}, K {}, Cl {}, HCO3 {}",
                adjustment.sodium, adjustment.potassium, adjustment.chloride, adjustment.bicarbonate
            ),
        }
    }

    pub fn parameters(&self) -> BTreeMap<String, ParamValue> {
        let pairs: Vec<(&str, ParamValue)> = match self {
            Action::FluidBolus { fluid } => vec![
                ("volume", fluid.volume_ml.into()),
                ("type", fluid.fluid_type.label().into()),
            ],
            Action::Vasopressor {
                medication,
                dose_mcg_kg_min,
            } => vec![
                ("medication", medication.as_str().into()),
                ("dose", (*dose_mcg_kg_min).into()),
            ],
            Action::Ventilator { settings } => vec![
                ("tidalVolume", settings.tidal_volume.into()),
                ("respiratoryRate", settings.respiratory_rate.into()),
                ("fiO2", fio2_percent(settings.fi_o2).into()),
                ("peep", settings.peep.into()),
            ],
            Action::Electrolytes { adjustment } => vec![
                ("sodium", adjustment.sodium.into()),
                ("potassium", adjustment.potassium.into()),
                ("chloride", adjustment.chloride.into()),
                ("bicarbonate", adjustment.bicarbonate.into()),
            ],
        };
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    /// Build the next patient state. The shock assessment is always refreshed
    /// against the resulting vitals and ABG lactate.
    pub fn apply(&self, current: &PatientState) -> PatientState {
        let mut next = current.clone();

        match self {
            Action::FluidBolus { fluid } => {
                next.vitals =
                    simulate_fluid_bolus(&current.vitals, fluid.volume_ml, fluid.fluid_type);
                next.fluids.push(fluid.clone());
            }
            Action::Vasopressor {
                medication,
                dose_mcg_kg_min,
            } => {
                let agent = Vasopressor::from_name(medication);
                next.vitals = simulate_vasopressor(&current.vitals, agent, *dose_mcg_kg_min);
                if agent.is_recognized() {
                    upsert_medication(&mut next.medications, agent.name(), *dose_mcg_kg_min);
                }
            }
            Action::Ventilator { settings } => {
                next.abg = simulate_ventilator_change(&current.abg, &current.ventilator, settings);
                if settings.peep != current.ventilator.peep {
                    next.vitals = simulate_peep_effect(
                        &current.vitals,
                        current.ventilator.peep,
                        settings.peep,
                    );
                }
                next.ventilator = settings.clone();
            }
            Action::Electrolytes { adjustment } => {
                let (electrolytes, abg) =
                    simulate_electrolyte_change(&current.electrolytes, &current.abg, adjustment);
                next.electrolytes = electrolytes;
                next.abg = abg;
            }
        }

        next.shock = assess_shock_state(&next.vitals, next.abg.lactate, None);
        next
    }
}

fn fio2_percent(fi_o2: f64) -> f64 {
    (fi_o2 * 100.0).round()
}

/// Titrate an existing infusion or start a new one.
fn upsert_medication(medications: &mut Vec<Medication>, name: &str, dose: f64) {
    match medications.iter_mut().find(|m| m.name == name) {
        Some(existing) => existing.dose = dose,
        None => medications.push(Medication {
            name: name.to_string(),
            dose,
            unit: VASOPRESSOR_UNIT.to_string(),
            route: MedicationRoute::Iv,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use critcare_logic::baseline::create_normal_patient_state;
    use critcare_logic::patient::ShockType;

    #[test]
    fn test_fluid_bolus_appends_record() {
        let state = create_normal_patient_state();
        let action = Action::fluid_bolus(500.0, FluidType::Crystalloid);
        let next = action.apply(&state);

        assert_eq!(next.fluids.len(), 1);
        assert_eq!(next.fluids[0].volume_ml, 500.0);
        assert!(next.vitals.mean_arterial_pressure > state.vitals.mean_arterial_pressure);
        // Input untouched
        assert!(state.fluids.is_empty());
        assert_eq!(action.description(), "500 mL Crystalloid bolus");
        assert_eq!(action.kind(), InterventionKind::Fluid);
    }

    #[test]
    fn test_vasopressor_titrates_single_medication() {
        let state = create_normal_patient_state();
        let first = Action::vasopressor("Norepinephrine", 0.05).apply(&state);
        let second = Action::vasopressor("noradrenaline", 0.1).apply(&first);

        assert_eq!(second.medications.len(), 1);
        let med = &second.medications[0];
        assert_eq!(med.name, "norepinephrine");
        assert_eq!(med.dose, 0.1);
        assert_eq!(med.unit, "mcg/kg/min");
        assert_eq!(med.route, MedicationRoute::Iv);
    }

    #[test]
    fn test_unrecognized_vasopressor_leaves_medications() {
        let state = create_normal_patient_state();
        let action = Action::vasopressor("milrinone", 0.5);
        let next = action.apply(&state);
        assert!(next.medications.is_empty());
        assert_eq!(
            next.vitals.systemic_vascular_resistance,
            state.vitals.systemic_vascular_resistance
        );
        assert_eq!(action.agent(), Some(Vasopressor::Unrecognized));
        assert_eq!(action.description(), "milrinone 0.5 mcg/kg/min");
        assert_eq!(
            action.parameters()["medication"],
            ParamValue::Text("milrinone".to_string())
        );
    }

    #[test]
    fn test_ventilator_without_peep_change_keeps_vitals() {
        let state = create_normal_patient_state();
        let mut settings = state.ventilator.clone();
        settings.respiratory_rate = 20.0;
        let next = Action::Ventilator { settings }.apply(&state);

        assert_eq!(next.vitals, state.vitals);
        assert!(next.abg.pa_co2 < state.abg.pa_co2);
        assert_eq!(next.ventilator.respiratory_rate, 20.0);
    }

    #[test]
    fn test_ventilator_peep_change_moves_vitals() {
        let state = create_normal_patient_state();
        let mut settings = state.ventilator.clone();
        settings.peep = 10.0;
        let action = Action::Ventilator { settings };
        let next = action.apply(&state);

        assert!(next.vitals.cardiac_output < state.vitals.cardiac_output);
        assert_eq!(next.ventilator.peep, 10.0);
        assert_eq!(
            action.description(),
            "Vent: TV 500 mL, RR 16, FiO2 40%, PEEP 10"
        );
        let params = action.parameters();
        assert_eq!(params["fiO2"], ParamValue::Number(40.0));
    }

    #[test]
    fn test_electrolytes_action() {
        let state = create_normal_patient_state();
        let mut adjustment = ElectrolyteAdjustment::from_current(&state.electrolytes);
        adjustment.bicarbonate = 14.0;
        let action = Action::Electrolytes { adjustment };
        let next = action.apply(&state);

        assert_eq!(next.electrolytes.bicarbonate, 14.0);
        assert_eq!(next.electrolytes.anion_gap, 22.0);
        assert!(next.abg.ph < state.abg.ph);
        assert_eq!(
            action.description(),
            "Electrolyte adjustment: Na 140, K 4, Cl 104, HCO3 14"
        );
        assert_eq!(action.kind(), InterventionKind::Other);
    }

    #[test]
    fn test_shock_reassessed_after_every_action() {
        let mut state = create_normal_patient_state();
        state.abg.lactate = 5.0;
        state.vitals.cardiac_output = 3.0;
        state.vitals.systemic_vascular_resistance = 1500.0;
        // Stale assessment
        state.shock.shock_type = ShockType::None;

        let next = Action::fluid_bolus(250.0, FluidType::Colloid).apply(&state);
        assert_eq!(next.shock.shock_type, ShockType::Cardiogenic);
        assert_eq!(next.shock.lactate, 5.0);
    }

    #[test]
    fn test_action_json_tagging() {
        let action = Action::vasopressor("vasopressin", 0.04);
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value["action"], "vasopressor");
        assert_eq!(value["medication"], "vasopressin");
        assert_eq!(value["doseMcgKgMin"], 0.04);
        let back: Action = serde_json::from_value(value).unwrap();
        assert_eq!(back, action);
    }

    #[test]
    fn test_unknown_agent_survives_json() {
        let action = Action::vasopressor("Milrinone", 0.25);
        let text = serde_json::to_string(&action).unwrap();
        let back: Action = serde_json::from_str(&text).unwrap();
        assert_eq!(back.description(), "Milrinone 0.25 mcg/kg/min");
        assert_eq!(back.agent(), Some(Vasopressor::Unrecognized));
    }
}
