//! Domain model produced by the mapper.
//!
//! Immutable value objects, constructed fresh per fetch and never mutated
//! afterwards. Positions are one-based, points are decimal.

use serde::Serialize;

/// A constructor with its resolved display color.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub nationality: String,
    pub position: u32,
    pub points: f64,
    pub wins: u32,
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Driver {
    pub id: String,
    pub number: Option<String>,
    pub code: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub nationality: String,
    pub team: Team,
    pub position: u32,
    pub points: f64,
    pub wins: u32,
}

/// Finish time in both machine and human form. The two are carried as-is and
/// never reconciled; `millis` is 0 when the upstream omits it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FinishTime {
    pub millis: u64,
    pub display: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AverageSpeed {
    pub speed: f64,
    pub units: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FastestLap {
    pub lap: u32,
    pub time: Option<String>,
    pub average_speed: Option<AverageSpeed>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RaceResult {
    pub position: u32,
    pub driver: Driver,
    pub grid: u32,
    pub laps: u32,
    pub status: String,
    pub points: f64,
    pub time: Option<FinishTime>,
    pub fastest_lap: Option<FastestLap>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QualifyingResult {
    pub position: u32,
    pub driver: Driver,
    pub q1: Option<String>,
    pub q2: Option<String>,
    pub q3: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CircuitSummary {
    pub name: String,
    pub locality: String,
    pub country: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Session {
    pub date: String,
    pub time: Option<String>,
}

/// Weekend session schedule. Sprint weekends have no fp2/fp3.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Sessions {
    pub fp1: Option<Session>,
    pub fp2: Option<Session>,
    pub fp3: Option<Session>,
    pub qualifying: Option<Session>,
    pub sprint: Option<Session>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Race {
    pub round: u32,
    pub name: String,
    pub circuit: CircuitSummary,
    pub date: String,
    pub time: Option<String>,
    pub sessions: Sessions,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LapTiming {
    pub driver_id: String,
    pub position: u32,
    pub time: String,
}

/// Per-driver timing entries for one lap, in upstream order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LapTimes {
    pub lap: u32,
    pub timings: Vec<LapTiming>,
}
