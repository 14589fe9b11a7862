//! Pure transforms from validated upstream shapes into the domain model.
//!
//! No I/O happens here. String numerics are coerced to real numbers; a
//! present-but-unparseable value is a mapping failure, while a missing
//! results array maps to an empty sequence, since absence of data is not an
//! error.

use crate::error::F1Error;
use crate::model;
use crate::schema;

const DEFAULT_TEAM_COLOR: &str = "#666666";

/// 2024 liveries, keyed by upstream constructor id.
const TEAM_COLORS: &[(&str, &str)] = &[
    ("red_bull", "#3671C6"),
    ("ferrari", "#F91536"),
    ("mercedes", "#6CD3BF"),
    ("mclaren", "#F58020"),
    ("aston_martin", "#358C75"),
    ("alpine", "#2293D1"),
    ("williams", "#37BEDD"),
    ("rb", "#5E8FAA"),
    ("stake", "#C92D4B"),
    ("haas", "#B6BABD"),
];

/// Display color for a constructor, falling back to a neutral grey for ids
/// not in the table.
pub fn team_color(constructor_id: &str) -> &'static str {
    let id = constructor_id.to_lowercase();
    TEAM_COLORS
        .iter()
        .find(|(key, _)| *key == id)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_TEAM_COLOR)
}

fn parse_u32(field: &'static str, value: &str) -> Result<u32, F1Error> {
    value.parse().map_err(|_| F1Error::InvalidNumber {
        field,
        value: value.to_owned(),
    })
}

fn parse_u64(field: &'static str, value: &str) -> Result<u64, F1Error> {
    value.parse().map_err(|_| F1Error::InvalidNumber {
        field,
        value: value.to_owned(),
    })
}

fn parse_f64(field: &'static str, value: &str) -> Result<f64, F1Error> {
    value.parse().map_err(|_| F1Error::InvalidNumber {
        field,
        value: value.to_owned(),
    })
}

fn map_team(constructor: &schema::Constructor) -> model::Team {
    model::Team {
        id: constructor.constructor_id.clone(),
        name: constructor.name.clone(),
        nationality: constructor.nationality.clone(),
        position: 0,
        points: 0.0,
        wins: 0,
        color: team_color(&constructor.constructor_id).to_owned(),
    }
}

/// Driver as embedded in a result. Season stats stay zero here; only the
/// standings mappers fill them in.
fn map_embedded_driver(driver: &schema::Driver, constructor: &schema::Constructor) -> model::Driver {
    model::Driver {
        id: driver.driver_id.clone(),
        number: driver.permanent_number.clone(),
        code: driver.code.clone(),
        first_name: driver.given_name.clone(),
        last_name: driver.family_name.clone(),
        nationality: driver.nationality.clone(),
        team: map_team(constructor),
        position: 0,
        points: 0.0,
        wins: 0,
    }
}

/// Maps the first standings list into drivers, preserving cardinality.
/// An absent standings list yields an empty vector.
pub fn map_driver_standings(
    response: &schema::DriverStandingsResponse,
) -> Result<Vec<model::Driver>, F1Error> {
    let standings = response
        .mr_data
        .standings_table
        .standings_lists
        .first()
        .map(|list| list.driver_standings.as_slice())
        .unwrap_or_default();

    standings
        .iter()
        .map(|standing| {
            let constructor = standing.constructors.first().ok_or_else(|| {
                F1Error::InvalidPayload(format!(
                    "driver standing for {} has no constructor",
                    standing.driver.driver_id
                ))
            })?;
            let mut driver = map_embedded_driver(&standing.driver, constructor);
            driver.position = parse_u32("position", &standing.position)?;
            driver.points = parse_f64("points", &standing.points)?;
            driver.wins = parse_u32("wins", &standing.wins)?;
            Ok(driver)
        })
        .collect()
}

pub fn map_constructor_standings(
    response: &schema::ConstructorStandingsResponse,
) -> Result<Vec<model::Team>, F1Error> {
    let standings = response
        .mr_data
        .standings_table
        .standings_lists
        .first()
        .map(|list| list.constructor_standings.as_slice())
        .unwrap_or_default();

    standings
        .iter()
        .map(|standing| {
            let mut team = map_team(&standing.constructor);
            team.position = parse_u32("position", &standing.position)?;
            team.points = parse_f64("points", &standing.points)?;
            team.wins = parse_u32("wins", &standing.wins)?;
            Ok(team)
        })
        .collect()
}

fn map_result(result: &schema::RaceResult) -> Result<model::RaceResult, F1Error> {
    let time = result
        .time
        .as_ref()
        .map(|t| {
            Ok::<_, F1Error>(model::FinishTime {
                millis: t
                    .millis
                    .as_deref()
                    .map(|m| parse_u64("millis", m))
                    .transpose()?
                    .unwrap_or(0),
                display: t.time.clone(),
            })
        })
        .transpose()?;

    let fastest_lap = result
        .fastest_lap
        .as_ref()
        .map(|fl| {
            Ok::<_, F1Error>(model::FastestLap {
                lap: parse_u32("lap", &fl.lap)?,
                time: fl.time.as_ref().map(|t| t.time.clone()),
                average_speed: fl
                    .average_speed
                    .as_ref()
                    .map(|avg| {
                        Ok::<_, F1Error>(model::AverageSpeed {
                            speed: parse_f64("speed", &avg.speed)?,
                            units: avg.units.clone(),
                        })
                    })
                    .transpose()?,
            })
        })
        .transpose()?;

    Ok(model::RaceResult {
        position: parse_u32("position", &result.position)?,
        driver: map_embedded_driver(&result.driver, &result.constructor),
        grid: parse_u32("grid", &result.grid)?,
        laps: parse_u32("laps", &result.laps)?,
        status: result.status.clone(),
        points: parse_f64("points", &result.points)?,
        time,
        fastest_lap,
    })
}

/// Results of the first race in the response. Missing race or missing
/// results array maps to an empty vector.
pub fn map_race_results(
    response: &schema::ResultsResponse,
) -> Result<Vec<model::RaceResult>, F1Error> {
    let results = response
        .mr_data
        .race_table
        .races
        .first()
        .and_then(|race| race.results.as_deref())
        .unwrap_or_default();

    results.iter().map(map_result).collect()
}

pub fn map_qualifying(
    response: &schema::QualifyingResponse,
) -> Result<Vec<model::QualifyingResult>, F1Error> {
    let results = response
        .mr_data
        .race_table
        .races
        .first()
        .map(|race| race.qualifying_results.as_slice())
        .unwrap_or_default();

    results
        .iter()
        .map(|result| {
            Ok(model::QualifyingResult {
                position: parse_u32("position", &result.position)?,
                driver: map_embedded_driver(&result.driver, &result.constructor),
                q1: result.q1.clone(),
                q2: result.q2.clone(),
                q3: result.q3.clone(),
            })
        })
        .collect()
}

pub fn map_lap_times(
    response: &schema::LapTimesResponse,
) -> Result<Vec<model::LapTimes>, F1Error> {
    let laps = response
        .mr_data
        .race_table
        .races
        .first()
        .map(|race| race.laps.as_slice())
        .unwrap_or_default();

    laps.iter()
        .map(|lap| {
            Ok(model::LapTimes {
                lap: parse_u32("lap", &lap.number)?,
                timings: lap
                    .timings
                    .iter()
                    .map(|timing| {
                        Ok(model::LapTiming {
                            driver_id: timing.driver_id.clone(),
                            position: parse_u32("position", &timing.position)?,
                            time: timing.time.clone(),
                        })
                    })
                    .collect::<Result<_, F1Error>>()?,
            })
        })
        .collect()
}

fn map_session(session: Option<&schema::Session>) -> Option<model::Session> {
    session.map(|s| model::Session {
        date: s.date.clone(),
        time: s.time.clone(),
    })
}

pub fn map_schedule(response: &schema::ScheduleResponse) -> Result<Vec<model::Race>, F1Error> {
    response
        .mr_data
        .race_table
        .races
        .iter()
        .map(|race| {
            Ok(model::Race {
                round: parse_u32("round", &race.round)?,
                name: race.race_name.clone(),
                circuit: model::CircuitSummary {
                    name: race.circuit.circuit_name.clone(),
                    locality: race.circuit.location.locality.clone(),
                    country: race.circuit.location.country.clone(),
                },
                date: race.date.clone(),
                time: race.time.clone(),
                sessions: model::Sessions {
                    fp1: map_session(race.first_practice.as_ref()),
                    fp2: map_session(race.second_practice.as_ref()),
                    fp3: map_session(race.third_practice.as_ref()),
                    qualifying: map_session(race.qualifying.as_ref()),
                    sprint: map_session(race.sprint.as_ref()),
                },
            })
        })
        .collect()
}

/// Merges a driver's main-race and sprint results into one season history
/// ordered by ascending round.
///
/// Sprint entries get their status prefixed with "Sprint: " and the embedded
/// driver carries the points scored in that entry. The sort is stable, so a
/// race and its sprint sharing a round keep concatenation order. The
/// tie-break is deliberately undefined upstream and is not reinvented here.
pub fn merge_season_results(
    races: &[schema::Race],
    sprints: &[schema::Race],
) -> Result<Vec<model::RaceResult>, F1Error> {
    let mut keyed = Vec::with_capacity(races.len() + sprints.len());
    for (race, is_sprint) in races
        .iter()
        .map(|r| (r, false))
        .chain(sprints.iter().map(|r| (r, true)))
    {
        keyed.push((parse_u32("round", &race.round)?, race, is_sprint));
    }
    keyed.sort_by_key(|(round, _, _)| *round);

    let mut merged = Vec::new();
    for (_, race, is_sprint) in keyed {
        // One result per race: the driver the history was fetched for.
        let Some(result) = race.results.as_deref().and_then(|r| r.first()) else {
            continue;
        };
        let mut mapped = map_result(result)?;
        mapped.driver.points = mapped.points;
        if is_sprint {
            mapped.status = format!("Sprint: {}", mapped.status);
        }
        merged.push(mapped);
    }
    Ok(merged)
}
