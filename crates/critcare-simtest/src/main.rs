//! Critical Care Matrix Headless Simulation Harness
//!
//! Validates the physiology engine, the simulation store, and the bundled
//! case data without any UI. Runs entirely in-process.
//!
//! Usage:
//!   cargo run -p critcare-simtest
//!   cargo run -p critcare-simtest -- --verbose
//!   RUST_LOG=debug cargo run -p critcare-simtest

use critcare_core::action::Action;
use critcare_core::clock::FixedClock;
use critcare_core::config::StoreConfig;
use critcare_core::persistence::{SimulationLibrary, SimulationSnapshot};
use critcare_core::scenario::{load_scenarios, CaseScenario};
use critcare_core::store::SimulationStore;
use critcare_logic::acid_base::{analyze_acid_base, AcidBaseDisturbance, Compensation};
use critcare_logic::baseline::create_normal_patient_state;
use critcare_logic::calculators;
use critcare_logic::hemodynamics::{simulate_fluid_bolus, simulate_vasopressor, Vasopressor};
use critcare_logic::limits;
use critcare_logic::patient::{Abg, FluidType, ShockType, Vitals};
use critcare_logic::renal::{self, AkiStage, GfrStage};
use critcare_logic::shock::assess_shock_state;
use critcare_logic::ventilation::{
    simulate_peep_effect, simulate_ventilator_change, ArdsSeverity,
};
use log::info;

// ── Case catalog (same JSON the core crate bundles) ─────────────────────
const SCENARIOS_JSON: &str = include_str!("../../../data/case_scenarios.json");

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    env_logger::init();
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Critical Care Matrix Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Baseline patient
    results.extend(validate_baseline(verbose));

    // 2. Derived-quantity calculators
    results.extend(validate_calculators(verbose));

    // 3. Acid-base classifier
    results.extend(validate_acid_base(verbose));

    // 4. Shock classifier
    results.extend(validate_shock(verbose));

    // 5. Hemodynamic clamp sweep
    results.extend(validate_hemodynamic_bounds(verbose));

    // 6. Ventilation & oxygenation
    results.extend(validate_ventilation(verbose));

    // 7. Renal perfusion
    results.extend(validate_renal(verbose));

    // 8. Case scenarios
    results.extend(validate_case_scenarios(verbose));

    // 9. Store & persistence
    results.extend(validate_store(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

// ── 1. Baseline ─────────────────────────────────────────────────────────

fn validate_baseline(_verbose: bool) -> Vec<TestResult> {
    println!("--- Baseline ---");
    let mut results = Vec::new();
    let s = create_normal_patient_state();

    results.push(TestResult {
        name: "baseline_deterministic".into(),
        passed: s == create_normal_patient_state(),
        detail: "two calls produce identical states".into(),
    });

    let shock = assess_shock_state(&s.vitals, s.abg.lactate, None);
    results.push(TestResult {
        name: "baseline_not_in_shock".into(),
        passed: shock.shock_type == ShockType::None && shock.markers.is_empty(),
        detail: format!("type={} markers={}", shock.shock_type.label(), shock.markers.len()),
    });

    let gas = analyze_acid_base(&s.abg);
    results.push(TestResult {
        name: "baseline_gas_normal".into(),
        passed: gas.primary == AcidBaseDisturbance::Normal
            && gas.compensation == Compensation::None,
        detail: format!("pH {} paCO2 {} HCO3 {}", s.abg.ph, s.abg.pa_co2, s.abg.hco3),
    });

    let gap = calculators::calculate_anion_gap(
        s.electrolytes.sodium,
        s.electrolytes.chloride,
        s.electrolytes.bicarbonate,
    );
    results.push(TestResult {
        name: "baseline_anion_gap_consistent".into(),
        passed: gap == s.electrolytes.anion_gap,
        detail: format!("computed {} stored {}", gap, s.electrolytes.anion_gap),
    });

    results
}

// ── 2. Calculators ──────────────────────────────────────────────────────

fn validate_calculators(_verbose: bool) -> Vec<TestResult> {
    println!("--- Calculators ---");
    let mut results = Vec::new();

    let map = calculators::calculate_map(120.0, 80.0);
    results.push(TestResult {
        name: "calc_map".into(),
        passed: (map - 93.333).abs() < 0.001,
        detail: format!("120/80 → MAP {:.3}", map),
    });

    let svr = calculators::calculate_svr(93.0, 8.0, 5.0);
    results.push(TestResult {
        name: "calc_svr".into(),
        passed: close(svr, 1360.0),
        detail: format!("MAP 93 CVP 8 CO 5 → SVR {:.0}", svr),
    });

    results.push(TestResult {
        name: "calc_zero_divisors".into(),
        passed: calculators::calculate_svr(93.0, 8.0, 0.0) == 0.0
            && calculators::calculate_pf_ratio(95.0, 0.0) == 0.0
            && calculators::stroke_volume(5.0, 0.0) == 0.0,
        detail: "SVR, P/F and SV return 0 on zero divisor".into(),
    });

    let pf = calculators::calculate_pf_ratio(95.0, 0.4);
    results.push(TestResult {
        name: "calc_pf_ratio".into(),
        passed: close(pf, 237.5) && ArdsSeverity::from_pf_ratio(pf) == ArdsSeverity::Mild,
        detail: format!("95 / 0.4 → {:.1}", pf),
    });

    let fena = calculators::fractional_excretion_sodium(20.0, 140.0, 100.0, 2.0);
    results.push(TestResult {
        name: "calc_fena_prerenal".into(),
        passed: fena < 1.0,
        detail: format!("FENa {:.2}%", fena),
    });

    results
}

// ── 3. Acid-Base ────────────────────────────────────────────────────────

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

fn validate_acid_base(verbose: bool) -> Vec<TestResult> {
    println!("--- Acid-Base ---");
    let mut results = Vec::new();

    let cases = [
        ((7.40, 40.0, 24.0), AcidBaseDisturbance::Normal, Compensation::None),
        ((7.28, 55.0, 26.0), AcidBaseDisturbance::RespiratoryAcidosis, Compensation::Complete),
        ((7.25, 30.0, 14.0), AcidBaseDisturbance::MetabolicAcidosis, Compensation::Complete),
        ((7.15, 36.0, 14.0), AcidBaseDisturbance::MetabolicAcidosis, Compensation::Partial),
        ((7.50, 30.0, 22.0), AcidBaseDisturbance::RespiratoryAlkalosis, Compensation::Complete),
        ((7.50, 46.0, 34.0), AcidBaseDisturbance::MetabolicAlkalosis, Compensation::Complete),
        ((7.10, 60.0, 18.0), AcidBaseDisturbance::MixedDisorder, Compensation::None),
        ((7.60, 30.0, 30.0), AcidBaseDisturbance::MixedDisorder, Compensation::None),
    ];

    let mut mismatches = Vec::new();
    for ((ph, co2, hco3), primary, compensation) in cases {
        let a = analyze_acid_base(&gas(ph, co2, hco3));
        if a.primary != primary || a.compensation != compensation {
            mismatches.push(format!(
                "{}/{}/{} → {:?}/{:?}",
                ph, co2, hco3, a.primary, a.compensation
            ));
        }
        if verbose {
            println!("  {}/{}/{} → {:?} {:?}", ph, co2, hco3, a.primary, a.compensation);
        }
    }
    results.push(TestResult {
        name: "acid_base_reference_gases".into(),
        passed: mismatches.is_empty(),
        detail: if mismatches.is_empty() {
            format!("{} reference gases classified", cases.len())
        } else {
            mismatches.join("; ")
        },
    });

    // Totality sweep
    let mut count = 0;
    let mut ph = 6.9;
    while ph <= 7.7 {
        for co2 in [15.0, 25.0, 40.0, 55.0, 90.0] {
            for hco3 in [5.0, 15.0, 24.0, 35.0, 50.0] {
                let _ = analyze_acid_base(&gas(ph, co2, hco3));
                count += 1;
            }
        }
        ph += 0.05;
    }
    results.push(TestResult {
        name: "acid_base_total".into(),
        passed: count > 0,
        detail: format!("{} gases classified without panic", count),
    });

    results
}

// ── 4. Shock ────────────────────────────────────────────────────────────

fn vitals_with(map: f64, co: f64, svr: f64, cvp: f64) -> Vitals {
    Vitals {
        mean_arterial_pressure: map,
        cardiac_output: co,
        systemic_vascular_resistance: svr,
        central_venous_pressure: cvp,
        ..create_normal_patient_state().vitals
    }
}

fn validate_shock(_verbose: bool) -> Vec<TestResult> {
    println!("--- Shock ---");
    let mut results = Vec::new();

    let cardio = assess_shock_state(&vitals_with(55.0, 3.0, 1500.0, 5.0), 5.0, None);
    results.push(TestResult {
        name: "shock_cardiogenic_severe".into(),
        passed: cardio.shock_type == ShockType::Cardiogenic && cardio.markers.len() == 3,
        detail: format!("{} {:?}", cardio.shock_type.label(), cardio.severity),
    });

    let septic = assess_shock_state(&vitals_with(58.0, 7.5, 600.0, 6.0), 3.0, None);
    results.push(TestResult {
        name: "shock_distributive".into(),
        passed: septic.shock_type == ShockType::DistributiveSeptic,
        detail: format!("{} {:?}", septic.shock_type.label(), septic.severity),
    });

    // Every profile the hypovolemic rule accepts is claimed by cardiogenic first.
    let mut hypovolemic_seen = false;
    for co in [2.0, 3.0, 3.9] {
        for cvp in [0.0, 4.0, 7.9] {
            for svr in [1201.0, 1500.0, 2000.0] {
                let s = assess_shock_state(&vitals_with(55.0, co, svr, cvp), 3.0, None);
                hypovolemic_seen |= s.shock_type == ShockType::Hypovolemic;
            }
        }
    }
    results.push(TestResult {
        name: "shock_rule_order_preserved".into(),
        passed: !hypovolemic_seen,
        detail: "low-CVP low-output profiles classify as Cardiogenic".into(),
    });

    results
}

// ── 5. Hemodynamic Bounds ───────────────────────────────────────────────

fn validate_hemodynamic_bounds(verbose: bool) -> Vec<TestResult> {
    println!("--- Hemodynamic Bounds ---");
    let mut results = Vec::new();
    let base = create_normal_patient_state().vitals;

    let mut violations = 0;
    let mut checked = 0;
    for map in [50.0, 65.0, 93.0, 130.0] {
        for co in [2.0, 5.0, 12.0] {
            let v = vitals_with(map, co, 1000.0, 8.0);
            for volume in [0.0, 500.0, 2000.0, 10_000.0] {
                let n = simulate_fluid_bolus(&v, volume, FluidType::Crystalloid);
                checked += 1;
                if !limits::MAP.contains(n.mean_arterial_pressure)
                    || !limits::CVP.contains(n.central_venous_pressure)
                    || !limits::SYSTOLIC_BP.contains(n.systolic_bp)
                    || !limits::DIASTOLIC_BP.contains(n.diastolic_bp)
                    || !limits::CARDIAC_OUTPUT.contains(n.cardiac_output)
                    || !limits::SVR.contains(n.systemic_vascular_resistance)
                {
                    violations += 1;
                }
            }
            for agent in Vasopressor::all() {
                for dose in [0.01, 0.5, 5.0, 100.0] {
                    let n = simulate_vasopressor(&v, *agent, dose);
                    checked += 1;
                    if !limits::MAP.contains(n.mean_arterial_pressure)
                        || !limits::SVR.contains(n.systemic_vascular_resistance)
                        || !limits::CARDIAC_OUTPUT.contains(n.cardiac_output)
                        || !limits::HEART_RATE.contains(n.heart_rate)
                    {
                        violations += 1;
                    }
                }
            }
        }
    }
    results.push(TestResult {
        name: "hemo_clamp_sweep".into(),
        passed: violations == 0,
        detail: format!("{} outputs checked, {} out of range", checked, violations),
    });

    let unknown = simulate_vasopressor(&base, Vasopressor::from_name("phenylephrine"), 1.0);
    results.push(TestResult {
        name: "hemo_unrecognized_noop".into(),
        passed: unknown.mean_arterial_pressure == base.mean_arterial_pressure
            && unknown.systemic_vascular_resistance == base.systemic_vascular_resistance,
        detail: "unknown agent leaves MAP and SVR".into(),
    });

    // Fluid responsiveness curve
    let mut v = base;
    let mut curve = Vec::new();
    for _ in 0..6 {
        v = simulate_fluid_bolus(&v, 500.0, FluidType::Crystalloid);
        curve.push(v.cardiac_output);
    }
    if verbose {
        println!("  CO after successive 500 mL boluses: {:?}", curve);
    }
    results.push(TestResult {
        name: "hemo_fluid_raises_output".into(),
        passed: curve.windows(2).all(|w| w[1] > w[0]),
        detail: format!("CO {:.2} → {:.2}", base.cardiac_output, v.cardiac_output),
    });

    results
}

// ── 6. Ventilation ──────────────────────────────────────────────────────

fn validate_ventilation(verbose: bool) -> Vec<TestResult> {
    println!("--- Ventilation ---");
    let mut results = Vec::new();
    let s = create_normal_patient_state();

    let mut last = f64::MAX;
    let mut monotone = true;
    for rr in [6.0, 10.0, 14.0, 18.0, 22.0, 26.0, 30.0, 35.0] {
        let mut vent = s.ventilator.clone();
        vent.respiratory_rate = rr;
        let abg = simulate_ventilator_change(&s.abg, &s.ventilator, &vent);
        if abg.pa_co2 > last
            || !limits::PA_CO2.contains(abg.pa_co2)
            || !limits::PH.contains(abg.ph)
        {
            monotone = false;
        }
        if verbose {
            println!("  RR {:>2} → paCO2 {:.1} pH {:.3}", rr, abg.pa_co2, abg.ph);
        }
        last = abg.pa_co2;
    }
    results.push(TestResult {
        name: "vent_co2_monotone".into(),
        passed: monotone,
        detail: "paCO2 falls as rate rises, within bounds".into(),
    });

    let mut vent = s.ventilator.clone();
    vent.fi_o2 = 1.0;
    vent.peep = 20.0;
    let abg = simulate_ventilator_change(&s.abg, &s.ventilator, &vent);
    results.push(TestResult {
        name: "vent_oxygenation_ceiling".into(),
        passed: abg.pa_o2 <= 600.0 && abg.s_o2 <= 100.0,
        detail: format!("paO2 {:.0} sO2 {:.1}", abg.pa_o2, abg.s_o2),
    });

    let up = simulate_peep_effect(&s.vitals, 5.0, 15.0);
    let down = simulate_peep_effect(&up, 15.0, 5.0);
    results.push(TestResult {
        name: "vent_peep_symmetric".into(),
        passed: close(down.cardiac_output, s.vitals.cardiac_output)
            && close(down.mean_arterial_pressure, s.vitals.mean_arterial_pressure),
        detail: format!("CO 5.0 → {:.2} → {:.2}", up.cardiac_output, down.cardiac_output),
    });

    results
}

// ── 7. Renal ────────────────────────────────────────────────────────────

fn validate_renal(_verbose: bool) -> Vec<TestResult> {
    println!("--- Renal ---");
    let mut results = Vec::new();
    let base = create_normal_patient_state().renal;

    let held = renal::simulate_renal_perfusion(&base, 80.0, 5.0);
    results.push(TestResult {
        name: "renal_autoregulated".into(),
        passed: held.gfr == base.gfr,
        detail: format!("MAP 80 CO 5 → GFR {}", held.gfr),
    });

    let mut r = base;
    for _ in 0..8 {
        r = renal::simulate_renal_perfusion(&r, 50.0, 2.5);
    }
    results.push(TestResult {
        name: "renal_hypoperfusion_floor".into(),
        passed: r.gfr == limits::GFR.min
            && r.creatinine == limits::CREATININE.max
            && r.urine_output == limits::URINE_OUTPUT.min,
        detail: format!(
            "GFR {} Cr {} UO {} ({:?})",
            r.gfr,
            r.creatinine,
            r.urine_output,
            GfrStage::from_gfr(r.gfr)
        ),
    });

    results.push(TestResult {
        name: "renal_aki_staging".into(),
        passed: AkiStage::assess(&r) == AkiStage::Stage3
            && AkiStage::assess(&base) == AkiStage::None
            && renal::is_oliguric(&r),
        detail: "floor state is Stage 3 and oliguric".into(),
    });

    results
}

// ── 8. Case Scenarios ───────────────────────────────────────────────────

fn validate_case_scenarios(verbose: bool) -> Vec<TestResult> {
    println!("--- Case Scenarios ---");
    let mut results = Vec::new();

    let scenarios: Vec<CaseScenario> = match load_scenarios(SCENARIOS_JSON) {
        Ok(s) => s,
        Err(e) => {
            results.push(TestResult {
                name: "cases_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return results;
        }
    };
    info!("Loaded {} case scenarios", scenarios.len());

    let raw_ids: Vec<String> = serde_json::from_str::<serde_json::Value>(SCENARIOS_JSON)
        .ok()
        .and_then(|v| v.as_array().cloned())
        .unwrap_or_default()
        .iter()
        .filter_map(|c| c.get("id").and_then(|id| id.as_str()).map(str::to_string))
        .collect();
    let mut unique = raw_ids.clone();
    unique.sort();
    unique.dedup();
    results.push(TestResult {
        name: "cases_unique_ids".into(),
        passed: raw_ids.len() == scenarios.len() && unique.len() == raw_ids.len(),
        detail: format!("{} ids, {} unique", raw_ids.len(), unique.len()),
    });

    results.push(TestResult {
        name: "cases_not_empty".into(),
        passed: scenarios.len() >= 3,
        detail: format!("{} cases loaded", scenarios.len()),
    });

    for scenario in &scenarios {
        let state = &scenario.initial_state;
        let assessed = assess_shock_state(&state.vitals, state.abg.lactate, None);
        if verbose {
            println!(
                "  {} [{:?}] → {} / {:?}",
                scenario.id,
                scenario.difficulty,
                assessed.shock_type.label(),
                analyze_acid_base(&state.abg).primary
            );
        }
        results.push(TestResult {
            name: format!("case_{}_shock_consistent", scenario.id),
            passed: assessed.shock_type == state.shock.shock_type
                && assessed.severity == state.shock.severity
                && assessed.markers == state.shock.markers,
            detail: format!(
                "stored {} / assessed {}",
                state.shock.shock_type.label(),
                assessed.shock_type.label()
            ),
        });

        let gap = calculators::calculate_anion_gap(
            state.electrolytes.sodium,
            state.electrolytes.chloride,
            state.electrolytes.bicarbonate,
        );
        results.push(TestResult {
            name: format!("case_{}_anion_gap", scenario.id),
            passed: close(gap, state.electrolytes.anion_gap),
            detail: format!("gap {}", gap),
        });
    }

    results
}

// ── 9. Store & Persistence ──────────────────────────────────────────────

fn validate_store(_verbose: bool) -> Vec<TestResult> {
    println!("--- Store & Persistence ---");
    let mut results = Vec::new();

    let config = StoreConfig::default();
    results.push(TestResult {
        name: "store_default_config_valid".into(),
        passed: config.validate().is_empty(),
        detail: format!("history_limit={}", config.history_limit),
    });

    let mut store = SimulationStore::new(config, FixedClock::epoch());
    store.apply(Action::fluid_bolus(1000.0, FluidType::Crystalloid));
    store.apply(Action::vasopressor("norepinephrine", 0.1));
    let mut vent = store.patient_state().ventilator.clone();
    vent.peep = 10.0;
    store.apply(Action::Ventilator { settings: vent });
    store.advance_time(300.0);

    results.push(TestResult {
        name: "store_log_order".into(),
        passed: store
            .interventions()
            .iter()
            .map(|i| i.id.split('-').next().unwrap_or(""))
            .eq(["fluid", "vasopressor", "vent"]),
        detail: format!("{} interventions", store.interventions().len()),
    });

    let mut buf = Vec::new();
    let round_trip = store
        .snapshot()
        .export_json(&mut buf)
        .and_then(|_| SimulationSnapshot::import_json(buf.as_slice()));
    let restored_ok = match round_trip {
        Ok(snapshot) => {
            let mut other = SimulationStore::new(StoreConfig::default(), FixedClock::epoch());
            other.restore(snapshot);
            other.patient_state() == store.patient_state()
                && other.interventions() == store.interventions()
                && other.time_elapsed() == store.time_elapsed()
        }
        Err(_) => false,
    };
    results.push(TestResult {
        name: "store_snapshot_round_trip".into(),
        passed: restored_ok,
        detail: format!("{} bytes of JSON", buf.len()),
    });

    let mut library = SimulationLibrary::new();
    let saved = library.save("harness", store.snapshot()).is_ok();
    let rejected = library.save("", store.snapshot()).is_err();
    results.push(TestResult {
        name: "store_library_names".into(),
        passed: saved && rejected && library.len() == 1,
        detail: "named save accepted, empty name rejected".into(),
    });

    store.reset();
    results.push(TestResult {
        name: "store_reset".into(),
        passed: store.interventions().is_empty()
            && store.time_elapsed() == 0.0
            && store.history().len() == 1,
        detail: "log, time, and history cleared".into(),
    });

    results
}
