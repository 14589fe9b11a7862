//! Wire shapes of the upstream F1 API.
//!
//! These structs mirror the upstream JSON exactly: numerics stay strings,
//! nested objects keep their PascalCase keys. Deserialization is the
//! validation gate: the upstream shape is not contractually guaranteed, so a
//! missing required key or a mistyped field is rejected here and mapping code
//! downstream can assume a validated shape. Optional fields are `Option`;
//! their absence is never an error.

use crate::error::F1Error;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Validates a raw upstream payload against the expected shape `T`.
///
/// Fails closed: the error message carries serde's path to the offending
/// field (wrong type or missing required key).
pub fn parse<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, F1Error> {
    serde_json::from_value(value).map_err(|e| F1Error::InvalidPayload(e.to_string()))
}

/// Pagination metadata present on every `MRData` envelope.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub series: String,
    pub url: String,
    pub limit: String,
    pub offset: String,
    pub total: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub lat: String,
    pub long: String,
    pub locality: String,
    pub country: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Circuit {
    pub circuit_id: String,
    pub url: String,
    pub circuit_name: String,
    #[serde(rename = "Location")]
    pub location: Location,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Constructor {
    pub constructor_id: String,
    pub url: String,
    pub name: String,
    pub nationality: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub driver_id: String,
    pub permanent_number: Option<String>,
    pub code: Option<String>,
    pub url: String,
    pub given_name: String,
    pub family_name: String,
    pub date_of_birth: String,
    pub nationality: String,
}

/// Finish time of a classified result. `millis` is absent for lapped cars.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct FinishTime {
    pub millis: Option<String>,
    pub time: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ClockTime {
    pub time: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct AverageSpeed {
    pub units: String,
    pub speed: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct FastestLap {
    pub rank: String,
    pub lap: String,
    #[serde(rename = "Time")]
    pub time: Option<ClockTime>,
    #[serde(rename = "AverageSpeed")]
    pub average_speed: Option<AverageSpeed>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RaceResult {
    pub number: String,
    pub position: String,
    pub position_text: String,
    pub points: String,
    #[serde(rename = "Driver")]
    pub driver: Driver,
    #[serde(rename = "Constructor")]
    pub constructor: Constructor,
    pub grid: String,
    pub laps: String,
    pub status: String,
    #[serde(rename = "Time")]
    pub time: Option<FinishTime>,
    #[serde(rename = "FastestLap")]
    pub fastest_lap: Option<FastestLap>,
}

/// A race as returned by results endpoints. `results` is absent on schedule
/// rows and for rounds not yet run.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Race {
    pub season: String,
    pub round: String,
    pub url: String,
    pub race_name: String,
    #[serde(rename = "Circuit")]
    pub circuit: Circuit,
    pub date: String,
    pub time: Option<String>,
    #[serde(rename = "Results")]
    pub results: Option<Vec<RaceResult>>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DriverStanding {
    pub position: String,
    pub position_text: String,
    pub points: String,
    pub wins: String,
    #[serde(rename = "Driver")]
    pub driver: Driver,
    #[serde(rename = "Constructors")]
    pub constructors: Vec<Constructor>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConstructorStanding {
    pub position: String,
    pub position_text: String,
    pub points: String,
    pub wins: String,
    #[serde(rename = "Constructor")]
    pub constructor: Constructor,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LapTiming {
    pub driver_id: String,
    pub position: String,
    pub time: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Lap {
    pub number: String,
    #[serde(rename = "Timings")]
    pub timings: Vec<LapTiming>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LapRace {
    pub season: String,
    pub round: String,
    pub url: String,
    pub race_name: String,
    #[serde(rename = "Circuit")]
    pub circuit: Circuit,
    pub date: String,
    pub time: Option<String>,
    #[serde(rename = "Laps")]
    pub laps: Vec<Lap>,
}

/// Any of Q1/Q2/Q3 may be absent when the driver was eliminated earlier.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct QualifyingResult {
    pub number: String,
    pub position: String,
    #[serde(rename = "Driver")]
    pub driver: Driver,
    #[serde(rename = "Constructor")]
    pub constructor: Constructor,
    #[serde(rename = "Q1")]
    pub q1: Option<String>,
    #[serde(rename = "Q2")]
    pub q2: Option<String>,
    #[serde(rename = "Q3")]
    pub q3: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QualifyingRace {
    pub season: String,
    pub round: String,
    pub race_name: String,
    #[serde(rename = "Circuit")]
    pub circuit: Circuit,
    pub date: String,
    pub time: Option<String>,
    #[serde(rename = "QualifyingResults")]
    pub qualifying_results: Vec<QualifyingResult>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Session {
    pub date: String,
    pub time: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRace {
    pub season: String,
    pub round: String,
    pub race_name: String,
    #[serde(rename = "Circuit")]
    pub circuit: Circuit,
    pub date: String,
    pub time: Option<String>,
    #[serde(rename = "FirstPractice")]
    pub first_practice: Option<Session>,
    #[serde(rename = "SecondPractice")]
    pub second_practice: Option<Session>,
    #[serde(rename = "ThirdPractice")]
    pub third_practice: Option<Session>,
    #[serde(rename = "Qualifying")]
    pub qualifying: Option<Session>,
    #[serde(rename = "Sprint")]
    pub sprint: Option<Session>,
}

// Response envelopes. Each endpoint wraps its table in an MRData object that
// also carries the page info.

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ResultsResponse {
    #[serde(rename = "MRData")]
    pub mr_data: ResultsData,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ResultsData {
    #[serde(flatten)]
    pub page: PageInfo,
    #[serde(rename = "RaceTable")]
    pub race_table: RaceTable,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RaceTable {
    pub season: Option<String>,
    pub round: Option<String>,
    #[serde(rename = "Races")]
    pub races: Vec<Race>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct DriverStandingsResponse {
    #[serde(rename = "MRData")]
    pub mr_data: DriverStandingsData,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct DriverStandingsData {
    #[serde(flatten)]
    pub page: PageInfo,
    #[serde(rename = "StandingsTable")]
    pub standings_table: DriverStandingsTable,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct DriverStandingsTable {
    pub season: String,
    #[serde(rename = "StandingsLists")]
    pub standings_lists: Vec<DriverStandingsList>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct DriverStandingsList {
    pub season: String,
    pub round: String,
    #[serde(rename = "DriverStandings")]
    pub driver_standings: Vec<DriverStanding>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ConstructorStandingsResponse {
    #[serde(rename = "MRData")]
    pub mr_data: ConstructorStandingsData,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ConstructorStandingsData {
    #[serde(flatten)]
    pub page: PageInfo,
    #[serde(rename = "StandingsTable")]
    pub standings_table: ConstructorStandingsTable,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ConstructorStandingsTable {
    pub season: String,
    #[serde(rename = "StandingsLists")]
    pub standings_lists: Vec<ConstructorStandingsList>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ConstructorStandingsList {
    pub season: String,
    pub round: String,
    #[serde(rename = "ConstructorStandings")]
    pub constructor_standings: Vec<ConstructorStanding>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LapTimesResponse {
    #[serde(rename = "MRData")]
    pub mr_data: LapTimesData,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LapTimesData {
    #[serde(flatten)]
    pub page: PageInfo,
    #[serde(rename = "RaceTable")]
    pub race_table: LapTimesTable,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LapTimesTable {
    pub season: String,
    pub round: String,
    #[serde(rename = "Races")]
    pub races: Vec<LapRace>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct QualifyingResponse {
    #[serde(rename = "MRData")]
    pub mr_data: QualifyingData,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct QualifyingData {
    #[serde(flatten)]
    pub page: PageInfo,
    #[serde(rename = "RaceTable")]
    pub race_table: QualifyingTable,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct QualifyingTable {
    pub season: String,
    pub round: String,
    #[serde(rename = "Races")]
    pub races: Vec<QualifyingRace>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ScheduleResponse {
    #[serde(rename = "MRData")]
    pub mr_data: ScheduleData,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ScheduleData {
    #[serde(flatten)]
    pub page: PageInfo,
    #[serde(rename = "RaceTable")]
    pub race_table: ScheduleTable,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ScheduleTable {
    pub season: String,
    #[serde(rename = "Races")]
    pub races: Vec<ScheduleRace>,
}
