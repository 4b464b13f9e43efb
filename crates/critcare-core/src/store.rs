//! Simulation store - the single owner of the live session

use log::{debug, info, warn};

use critcare_logic::acid_base::{analyze_acid_base, AcidBaseAnalysis};
use critcare_logic::baseline::create_normal_patient_state;
use critcare_logic::patient::PatientState;
use critcare_logic::renal::simulate_renal_perfusion;

use crate::action::Action;
use crate::clock::{Clock, SystemClock};
use crate::config::StoreConfig;
use crate::history::{HistoricalDataPoint, History};
use crate::intervention::{Intervention, InterventionLog};
use crate::persistence::{SimulationSnapshot, SNAPSHOT_VERSION};
use crate::scenario::CaseScenario;

/// Live session state.
///
/// Every mutation goes through a method here; the engine underneath is pure,
/// so the store is the only place a patient state is ever replaced.
pub struct SimulationStore<C: Clock = SystemClock> {
    config: StoreConfig,
    clock: C,
    patient_state: PatientState,
    interventions: InterventionLog,
    /// Simulated seconds since the session started
    time_elapsed: f64,
    running: bool,
    history: History,
}

impl SimulationStore<SystemClock> {
    /// Default config on the real clock.
    pub fn with_defaults() -> Self {
        Self::new(StoreConfig::default(), SystemClock)
    }
}

impl Default for SimulationStore<SystemClock> {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl<C: Clock> SimulationStore<C> {
    /// Start from the normal baseline with one history point.
    pub fn new(config: StoreConfig, clock: C) -> Self {
        let mut patient_state = create_normal_patient_state();
        patient_state.timestamp = clock.now();
        let mut history = History::new(config.history_limit);
        history.push(HistoricalDataPoint::capture(&patient_state, clock.now()));

        Self {
            config,
            clock,
            patient_state,
            interventions: InterventionLog::new(),
            time_elapsed: 0.0,
            running: false,
            history,
        }
    }

    pub fn patient_state(&self) -> &PatientState {
        &self.patient_state
    }

    pub fn interventions(&self) -> &[Intervention] {
        self.interventions.entries()
    }

    pub fn intervention_log(&self) -> &InterventionLog {
        &self.interventions
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn time_elapsed(&self) -> f64 {
        self.time_elapsed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Replace the patient wholesale and record a trend point.
    pub fn set_patient_state(&mut self, state: PatientState) {
        self.patient_state = state;
        self.record_history();
    }

    /// Apply a learner action and log it.
    pub fn apply(&mut self, action: Action) -> &Intervention {
        if action.agent().is_some_and(|agent| !agent.is_recognized()) {
            warn!("Unrecognized vasopressor ({}); vitals unchanged", action.description());
        }

        let now = self.clock.now();
        let mut next = action.apply(&self.patient_state);
        next.timestamp = now;

        if self.config.couple_renal_perfusion && next.vitals != self.patient_state.vitals {
            next.renal = simulate_renal_perfusion(
                &next.renal,
                next.vitals.mean_arterial_pressure,
                next.vitals.cardiac_output,
            );
        }

        self.patient_state = next;
        self.record_history();

        let id = self.interventions.next_id(action.id_prefix(), now);
        let entry = Intervention {
            id,
            kind: action.kind(),
            description: action.description(),
            timestamp: now,
            parameters: action.parameters(),
        };
        debug!("Applied intervention {}: {}", entry.id, entry.description);
        self.interventions.push(entry)
    }

    /// Log an intervention made outside [`Self::apply`].
    pub fn record_intervention(&mut self, intervention: Intervention) {
        debug!("Recorded intervention {}", intervention.id);
        self.interventions.push(intervention);
    }

    /// Back to the normal baseline: empty log, zero time, stopped, and a
    /// history holding only the baseline point.
    pub fn reset(&mut self) {
        let now = self.clock.now();
        let mut baseline = create_normal_patient_state();
        baseline.timestamp = now;

        self.patient_state = baseline;
        self.interventions.clear();
        self.time_elapsed = 0.0;
        self.running = false;
        self.history.clear();
        self.history
            .push(HistoricalDataPoint::capture(&self.patient_state, now));
        info!("Simulation reset to normal baseline");
    }

    /// Install a scenario's starting patient. The intervention log is kept.
    pub fn load_case(&mut self, scenario: &CaseScenario) {
        let mut state = scenario.initial_state.clone();
        state.timestamp = self.clock.now();
        self.set_patient_state(state);
        info!("Loaded case '{}' ({})", scenario.title, scenario.id);
    }

    /// Advance simulated time. Negative or non-finite steps are ignored.
    pub fn advance_time(&mut self, seconds: f64) {
        if seconds.is_finite() && seconds > 0.0 {
            self.time_elapsed += seconds;
        }
    }

    pub fn set_time_elapsed(&mut self, seconds: f64) {
        if seconds.is_finite() && seconds >= 0.0 {
            self.time_elapsed = seconds;
        }
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Acid-base interpretation of the current ABG.
    pub fn acid_base(&self) -> AcidBaseAnalysis {
        analyze_acid_base(&self.patient_state.abg)
    }

    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            version: SNAPSHOT_VERSION,
            patient_state: self.patient_state.clone(),
            interventions: self.interventions.entries().to_vec(),
            time_elapsed: self.time_elapsed,
            exported_at: self.clock.now(),
        }
    }

    /// Resume from a snapshot: state, log, and elapsed time. The session is
    /// left stopped.
    pub fn restore(&mut self, snapshot: SimulationSnapshot) {
        let count = snapshot.interventions.len();
        self.patient_state = snapshot.patient_state;
        self.interventions = InterventionLog::from_entries(snapshot.interventions);
        self.time_elapsed = snapshot.time_elapsed;
        self.running = false;
        self.record_history();
        info!(
            "Restored snapshot exported {} ({} interventions)",
            snapshot.exported_at, count
        );
    }

    fn record_history(&mut self) {
        let point = HistoricalDataPoint::capture(&self.patient_state, self.clock.now());
        self.history.push(point);
    }
}
