//! Patient state data model.
//!
//! Plain value records grouped under one aggregate, [`PatientState`].
//! Simulators never mutate a state they were handed: they copy the slice
//! they need, change the copy, and return it.
//!
//! Field names serialize to the camelCase JSON shape used by snapshots and
//! case files, keeping clinical capitalisation (`pH`, `paCO2`, `systolicBP`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bedside and invasive hemodynamic vitals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vitals {
    /// bpm
    pub heart_rate: f64,
    /// mmHg
    #[serde(rename = "systolicBP")]
    pub systolic_bp: f64,
    /// mmHg
    #[serde(rename = "diastolicBP")]
    pub diastolic_bp: f64,
    /// mmHg. Derivable from systolic/diastolic but written directly by simulators.
    pub mean_arterial_pressure: f64,
    /// mmHg
    pub central_venous_pressure: f64,
    /// mmHg
    pub pulmonary_artery_pressure: f64,
    /// L/min
    pub cardiac_output: f64,
    /// dynes·s/cm⁵
    pub systemic_vascular_resistance: f64,
    /// °C
    pub temperature: f64,
    /// breaths/min
    pub respiratory_rate: f64,
    /// SpO2, %
    pub oxygen_saturation: f64,
}

/// Ventilator mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VentilatorMode {
    #[serde(rename = "Volume Control (AC)")]
    VolumeControlAc,
    #[serde(rename = "Pressure Control (AC)")]
    PressureControlAc,
    #[serde(rename = "SIMV")]
    Simv,
    #[serde(rename = "PSV")]
    Psv,
    #[serde(rename = "CPAP")]
    Cpap,
}

impl VentilatorMode {
    pub fn all() -> &'static [VentilatorMode] {
        &[
            Self::VolumeControlAc,
            Self::PressureControlAc,
            Self::Simv,
            Self::Psv,
            Self::Cpap,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::VolumeControlAc => "Volume Control (AC)",
            Self::PressureControlAc => "Pressure Control (AC)",
            Self::Simv => "SIMV",
            Self::Psv => "PSV",
            Self::Cpap => "CPAP",
        }
    }
}

/// Mechanical ventilator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VentilatorSettings {
    pub mode: VentilatorMode,
    /// mL
    pub tidal_volume: f64,
    /// breaths/min
    pub respiratory_rate: f64,
    /// Fraction, 0.21–1.0.
    pub fi_o2: f64,
    /// cmH2O
    pub peep: f64,
    /// cmH2O, used by pressure-targeted modes.
    pub inspiratory_pressure: f64,
    /// Inspiratory:expiratory ratio label, e.g. `"1:2"`.
    pub i_e_ratio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plateau_pressure: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peak_pressure: Option<f64>,
}

/// Arterial blood gas panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Abg {
    #[serde(rename = "pH")]
    pub ph: f64,
    /// mmHg
    #[serde(rename = "paCO2")]
    pub pa_co2: f64,
    /// mmHg
    pub pa_o2: f64,
    /// mEq/L
    pub hco3: f64,
    /// mEq/L
    pub base_excess: f64,
    /// mmol/L
    pub lactate: f64,
    /// %
    pub s_o2: f64,
}

/// Serum electrolytes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Electrolytes {
    /// mEq/L
    pub sodium: f64,
    /// mEq/L
    pub potassium: f64,
    /// mEq/L
    pub chloride: f64,
    /// mEq/L
    pub bicarbonate: f64,
    /// mg/dL
    pub calcium: f64,
    /// mg/dL
    pub magnesium: f64,
    /// mg/dL
    pub phosphate: f64,
    /// Na − (Cl + HCO3), mEq/L.
    pub anion_gap: f64,
}

/// Kidney function and urine studies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenalParameters {
    /// mg/dL
    pub creatinine: f64,
    /// mg/dL
    pub bun: f64,
    /// mL/min/1.73m²
    pub gfr: f64,
    /// mL/hr
    pub urine_output: f64,
    pub urine_specific_gravity: f64,
    /// mEq/L
    pub urine_sodium: f64,
    /// %
    pub fractional_excretion_na: f64,
}

/// Shock category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShockType {
    Hypovolemic,
    Cardiogenic,
    #[serde(rename = "Distributive (Septic)")]
    DistributiveSeptic,
    Obstructive,
    #[default]
    None,
}

impl ShockType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Hypovolemic => "Hypovolemic",
            Self::Cardiogenic => "Cardiogenic",
            Self::DistributiveSeptic => "Distributive (Septic)",
            Self::Obstructive => "Obstructive",
            Self::None => "None",
        }
    }
}

/// Shock severity tier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum ShockSeverity {
    #[default]
    Mild,
    Moderate,
    Severe,
}

/// Output of the shock classifier, stored on the patient.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShockState {
    #[serde(rename = "type")]
    pub shock_type: ShockType,
    pub severity: ShockSeverity,
    /// mmol/L, copied from the ABG at classification time.
    pub lactate: f64,
    /// Central venous O2 saturation, %, when measured.
    #[serde(rename = "scvO2", default, skip_serializing_if = "Option::is_none")]
    pub scv_o2: Option<f64>,
    /// Triggered flags, in detection order.
    pub markers: Vec<String>,
}

/// Fluid product class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FluidType {
    Crystalloid,
    Colloid,
    #[serde(rename = "Blood Product")]
    BloodProduct,
}

impl FluidType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Crystalloid => "Crystalloid",
            Self::Colloid => "Colloid",
            Self::BloodProduct => "Blood Product",
        }
    }
}

/// A fluid given to the patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FluidAdministration {
    #[serde(rename = "type")]
    pub fluid_type: FluidType,
    /// Product name, e.g. "Normal Saline", "Lactated Ringer's".
    pub name: String,
    /// mL
    #[serde(rename = "volume")]
    pub volume_ml: f64,
    /// mL/hr
    #[serde(rename = "rate")]
    pub rate_ml_hr: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MedicationRoute {
    #[serde(rename = "IV")]
    Iv,
    #[serde(rename = "PO")]
    Po,
    Other,
}

/// An active medication (pressors and inotropes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub name: String,
    pub dose: f64,
    /// e.g. "mcg/kg/min"
    pub unit: String,
    pub route: MedicationRoute,
}

/// Aggregate root: one complete snapshot of the simulated patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientState {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub vitals: Vitals,
    pub ventilator: VentilatorSettings,
    pub abg: Abg,
    pub electrolytes: Electrolytes,
    pub renal: RenalParameters,
    pub shock: ShockState,
    #[serde(default)]
    pub fluids: Vec<FluidAdministration>,
    #[serde(default)]
    pub medications: Vec<Medication>,
}
