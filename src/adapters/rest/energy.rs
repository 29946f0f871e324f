//! Consumption repository over the hosted `consumo_usuarios` table.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::client::{eq, RestClient};
use crate::domain::energy::{ConsumptionRecord, Kwh};
use crate::domain::foundation::{ConsumptionRecordId, DeviceId, DomainError, UserId};
use crate::ports::ConsumptionRepository;

const CONSUMPTION_TABLE: &str = "consumo_usuarios";

#[derive(Debug, Serialize, Deserialize)]
struct ConsumptionRow {
    id: ConsumptionRecordId,
    user_id: String,
    fecha: NaiveDate,
    consumo_kwh: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dispositivo_id: Option<DeviceId>,
}

impl ConsumptionRow {
    fn from_record(record: &ConsumptionRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id.to_string(),
            fecha: record.date,
            consumo_kwh: record.kwh.value(),
            dispositivo_id: record.device_id,
        }
    }

    fn into_record(self) -> Result<ConsumptionRecord, DomainError> {
        Ok(ConsumptionRecord {
            id: self.id,
            user_id: UserId::new(self.user_id)?,
            date: self.fecha,
            kwh: Kwh::new(self.consumo_kwh)?,
            device_id: self.dispositivo_id,
        })
    }
}

#[derive(Debug, Deserialize)]
struct KwhOnly {
    consumo_kwh: f64,
}

#[derive(Debug, Clone)]
pub struct RestConsumptionRepository {
    client: RestClient,
}

impl RestConsumptionRepository {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ConsumptionRepository for RestConsumptionRepository {
    async fn insert(&self, record: &ConsumptionRecord) -> Result<(), DomainError> {
        self.client
            .insert(CONSUMPTION_TABLE, &ConsumptionRow::from_record(record))
            .await?;
        Ok(())
    }

    async fn list_recent(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<ConsumptionRecord>, DomainError> {
        // Newest first so the limit keeps the latest days, then flip for the chart.
        let rows: Vec<ConsumptionRow> = self
            .client
            .select(
                CONSUMPTION_TABLE,
                &[
                    ("user_id", eq(user_id)),
                    ("select", "*".to_string()),
                    ("order", "fecha.desc".to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;

        let mut records = rows
            .into_iter()
            .map(ConsumptionRow::into_record)
            .collect::<Result<Vec<_>, _>>()?;
        records.reverse();
        Ok(records)
    }

    async fn total_kwh_all_users(&self) -> Result<f64, DomainError> {
        let rows: Vec<KwhOnly> = self
            .client
            .select(CONSUMPTION_TABLE, &[("select", "consumo_kwh".to_string())])
            .await?;
        Ok(rows.iter().map(|row| row.consumo_kwh).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::rest::RestConfig;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn repo_for(server: &MockServer) -> RestConsumptionRepository {
        RestConsumptionRepository::new(
            RestClient::new(RestConfig::new(server.uri(), "anon")).unwrap(),
        )
    }

    #[tokio::test]
    async fn list_recent_returns_ascending_dates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/consumo_usuarios"))
            .and(query_param("user_id", "eq.u-1"))
            .and(query_param("order", "fecha.desc"))
            .and(query_param("limit", "30"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id": "6f9619ff-8b86-d011-b42d-00cf4fc964ff",
                    "user_id": "u-1",
                    "fecha": "2024-03-02",
                    "consumo_kwh": 4.5
                },
                {
                    "id": "7f9619ff-8b86-d011-b42d-00cf4fc964ff",
                    "user_id": "u-1",
                    "fecha": "2024-03-01",
                    "consumo_kwh": 3.25
                }
            ])))
            .mount(&server)
            .await;

        let records = repo_for(&server)
            .list_recent(&UserId::new("u-1").unwrap(), 30)
            .await
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(records[1].kwh.value(), 4.5);
    }

    #[tokio::test]
    async fn insert_posts_row() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/consumo_usuarios"))
            .and(body_partial_json(json!({
                "user_id": "u-1",
                "fecha": "2024-03-01",
                "consumo_kwh": 2.0
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let record = ConsumptionRecord::new(
            UserId::new("u-1").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            Kwh::new(2.0).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        )
        .unwrap();
        repo_for(&server).insert(&record).await.unwrap();
    }

    #[tokio::test]
    async fn total_sums_every_row() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("select", "consumo_kwh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "consumo_kwh": 1.5 },
                { "consumo_kwh": 2.5 }
            ])))
            .mount(&server)
            .await;

        assert_eq!(repo_for(&server).total_kwh_all_users().await.unwrap(), 4.0);
    }
}
