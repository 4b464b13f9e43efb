//! Bounded trend history for charts.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use critcare_logic::patient::PatientState;

/// Hemodynamic trend sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalsPoint {
    pub map: f64,
    pub co: f64,
    pub svr: f64,
    pub hr: f64,
}

/// Gas exchange trend sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbgPoint {
    #[serde(rename = "pH")]
    pub ph: f64,
    #[serde(rename = "paCO2")]
    pub pa_co2: f64,
    #[serde(rename = "paO2")]
    pub pa_o2: f64,
    pub lactate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoricalDataPoint {
    pub timestamp: DateTime<Utc>,
    pub vitals: VitalsPoint,
    pub abg: AbgPoint,
}

impl HistoricalDataPoint {
    pub fn capture(state: &PatientState, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            vitals: VitalsPoint {
                map: state.vitals.mean_arterial_pressure,
                co: state.vitals.cardiac_output,
                svr: state.vitals.systemic_vascular_resistance,
                hr: state.vitals.heart_rate,
            },
            abg: AbgPoint {
                ph: state.abg.ph,
                pa_co2: state.abg.pa_co2,
                pa_o2: state.abg.pa_o2,
                lactate: state.abg.lactate,
            },
        }
    }
}

/// Ring of the most recent points, oldest first.
#[derive(Debug, Clone)]
pub struct History {
    points: VecDeque<HistoricalDataPoint>,
    limit: usize,
}

impl History {
    /// A limit of 0 is treated as 1.
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            points: VecDeque::with_capacity(limit),
            limit,
        }
    }

    pub fn push(&mut self, point: HistoricalDataPoint) {
        while self.points.len() >= self.limit {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn latest(&self) -> Option<&HistoricalDataPoint> {
        self.points.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoricalDataPoint> {
        self.points.iter()
    }

    /// One value per point, e.g. `history.series(|p| p.vitals.map)`.
    pub fn series<F>(&self, f: F) -> Vec<(DateTime<Utc>, f64)>
    where
        F: Fn(&HistoricalDataPoint) -> f64,
    {
        self.points.iter().map(|p| (p.timestamp, f(p))).collect()
    }
}
