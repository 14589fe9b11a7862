//! HTTP client for the F1 statistics proxy.

use crate::error::F1Error;
use crate::mapper;
use crate::model;
use crate::schema;
use serde_json::Value;

const DEFAULT_RESULT_LIMIT: u32 = 100;

/// Client for F1 data, fetched through the gateway proxy.
///
/// `base_url` points at the proxy endpoint (the gateway's `/api/f1`); the
/// upstream resource path travels in the `path` query parameter. Every call
/// is a single attempt: a failed fetch surfaces as an error and is retried
/// only by the caller's next request.
#[derive(Clone)]
pub struct F1Client {
    http: reqwest::Client,
    base_url: String,
}

impl F1Client {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn fetch(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Value, F1Error> {
        let mut query: Vec<(&str, String)> = vec![("path", endpoint.to_owned())];
        query.extend_from_slice(params);

        let response = self.http.get(&self.base_url).query(&query).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%endpoint, %status, "f1 fetch rejected");
            return Err(F1Error::UpstreamStatus(status));
        }
        Ok(response.json().await?)
    }

    /// Season of the most recent race.
    pub async fn current_season(&self) -> Result<String, F1Error> {
        let data = self.fetch("/current/last/results.json", &[]).await?;
        let response: schema::ResultsResponse = schema::parse(data)?;
        response
            .mr_data
            .race_table
            .races
            .first()
            .map(|race| race.season.clone())
            .ok_or_else(|| F1Error::InvalidPayload("no races in current season response".into()))
    }

    /// Driver championship standings, current season unless one is given.
    pub async fn driver_standings(&self, season: Option<&str>) -> Result<Vec<model::Driver>, F1Error> {
        let endpoint = match season {
            Some(season) => format!("/{season}/driverStandings.json"),
            None => "/current/driverStandings.json".to_owned(),
        };
        let data = self.fetch(&endpoint, &[]).await?;
        mapper::map_driver_standings(&schema::parse(data)?)
    }

    /// Constructor championship standings, current season unless one is given.
    pub async fn constructor_standings(
        &self,
        season: Option<&str>,
    ) -> Result<Vec<model::Team>, F1Error> {
        let endpoint = match season {
            Some(season) => format!("/{season}/constructorStandings.json"),
            None => "/current/constructorStandings.json".to_owned(),
        };
        let data = self.fetch(&endpoint, &[]).await?;
        mapper::map_constructor_standings(&schema::parse(data)?)
    }

    /// Full classification of the most recent race.
    pub async fn last_race_results(&self) -> Result<Vec<model::RaceResult>, F1Error> {
        let data = self.fetch("/current/last/results.json", &[]).await?;
        mapper::map_race_results(&schema::parse(data)?)
    }

    pub async fn race_lap_times(
        &self,
        season: &str,
        round: &str,
    ) -> Result<Vec<model::LapTimes>, F1Error> {
        let data = self.fetch(&format!("/{season}/{round}/laps.json"), &[]).await?;
        mapper::map_lap_times(&schema::parse(data)?)
    }

    /// Qualifying classification of the most recent race weekend.
    pub async fn last_qualifying(&self) -> Result<Vec<model::QualifyingResult>, F1Error> {
        let data = self.fetch("/current/last/qualifying.json", &[]).await?;
        mapper::map_qualifying(&schema::parse(data)?)
    }

    pub async fn season_schedule(&self) -> Result<Vec<model::Race>, F1Error> {
        let data = self.fetch("/current.json", &[]).await?;
        mapper::map_schedule(&schema::parse(data)?)
    }

    /// A driver's full-season history: main-race and sprint results fetched
    /// concurrently and merged into one sequence ordered by round.
    pub async fn driver_results(
        &self,
        driver_id: &str,
        limit: Option<u32>,
    ) -> Result<Vec<model::RaceResult>, F1Error> {
        let limit = limit.unwrap_or(DEFAULT_RESULT_LIMIT).to_string();

        let races_path = format!("/current/drivers/{driver_id}/results.json");
        let races_query = [("limit", limit.clone())];
        let sprints_path = format!("/current/drivers/{driver_id}/sprint.json");
        let sprints_query = [("limit", limit)];
        let races = self.fetch(&races_path, &races_query);
        let sprints = self.fetch(&sprints_path, &sprints_query);
        let (race_data, sprint_data) = tokio::try_join!(races, sprints)?;

        let race_response: schema::ResultsResponse = schema::parse(race_data)?;
        let sprint_response: schema::ResultsResponse = schema::parse(sprint_data)?;
        mapper::merge_season_results(
            &race_response.mr_data.race_table.races,
            &sprint_response.mr_data.race_table.races,
        )
    }
}
