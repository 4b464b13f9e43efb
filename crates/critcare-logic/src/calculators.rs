//! Derived-quantity calculators.
//!
//! Leaves of the engine: total numeric formulas with no state. Divisions
//! are guarded and return 0 when the denominator is 0.

/// Mean arterial pressure (mmHg) from systolic and diastolic pressure.
pub fn calculate_map(systolic: f64, diastolic: f64) -> f64 {
    diastolic + (systolic - diastolic) / 3.0
}

/// Cardiac output (L/min) from heart rate (bpm) and stroke volume (mL).
pub fn calculate_cardiac_output(heart_rate: f64, stroke_volume: f64) -> f64 {
    heart_rate * stroke_volume / 1000.0
}

/// Systemic vascular resistance (dynes·s/cm⁵).
///
/// Returns 0 when cardiac output is 0.
pub fn calculate_svr(map: f64, cvp: f64, cardiac_output: f64) -> f64 {
    if cardiac_output == 0.0 {
        return 0.0;
    }
    (map - cvp) * 80.0 / cardiac_output
}

/// Anion gap: Na − (Cl + HCO3).
pub fn calculate_anion_gap(sodium: f64, chloride: f64, bicarbonate: f64) -> f64 {
    sodium - (chloride + bicarbonate)
}

/// PaO2/FiO2 ratio. Returns 0 when FiO2 is 0.
pub fn calculate_pf_ratio(pa_o2: f64, fi_o2: f64) -> f64 {
    if fi_o2 == 0.0 {
        return 0.0;
    }
    pa_o2 / fi_o2
}

/// Stroke volume (mL) implied by cardiac output and heart rate.
///
/// Returns 0 when heart rate is 0.
pub fn stroke_volume(cardiac_output: f64, heart_rate: f64) -> f64 {
    if heart_rate == 0.0 {
        return 0.0;
    }
    cardiac_output * 1000.0 / heart_rate
}

/// Minute ventilation (L/min) from tidal volume (mL) and rate (breaths/min).
pub fn minute_ventilation(tidal_volume: f64, respiratory_rate: f64) -> f64 {
    tidal_volume * respiratory_rate / 1000.0
}

/// Fractional excretion of sodium (%).
///
/// `(UNa × PCr) / (PNa × UCr) × 100`; returns 0 when the denominator is 0.
/// Below 1% suggests prerenal hypoperfusion, above 2% intrinsic injury.
pub fn fractional_excretion_sodium(
    urine_sodium: f64,
    plasma_sodium: f64,
    urine_creatinine: f64,
    plasma_creatinine: f64,
) -> f64 {
    let denominator = plasma_sodium * urine_creatinine;
    if denominator == 0.0 {
        return 0.0;
    }
    urine_sodium * plasma_creatinine / denominator * 100.0
}

/// Hemoglobin O2 saturation (%) from PaO2 via a two-piece approximation of
/// the dissociation curve: steep below 60 mmHg, nearly flat above.
pub fn oxygen_saturation_from_pao2(pa_o2: f64) -> f64 {
    if pa_o2 < 60.0 {
        75.0 + (pa_o2 - 40.0) * 0.75
    } else {
        (97.0 + (pa_o2 - 60.0) * 0.01).min(100.0)
    }
}
