//! Dataset creation.

use crate::client::DomoClient;
use crate::error::{ClientError, Result};
use crate::types::{Dataset, DatasetDescriptor};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode};

impl DomoClient {
    /// Create a dataset from a name, description and schema.
    ///
    /// Requires `201 Created`; other statuses fail with the serialized payload
    /// in the error message. The returned dataset carries the server-assigned
    /// id, owner and timestamps.
    pub async fn create_dataset(
        &self,
        descriptor: &DatasetDescriptor,
        token: &str,
    ) -> Result<Dataset> {
        let payload = serde_json::to_vec(descriptor)?;

        let request = self
            .bearer_request(Method::POST, self.url("/v1/datasets"), token)?
            .header(CONTENT_TYPE, "application/json")?
            .header(ACCEPT, "application/json")?
            .body(payload.clone());

        let response = self.dispatch(request).await?;

        if response.status != StatusCode::CREATED {
            return Err(ClientError::Api {
                status: response.status.as_u16(),
                message: format!(
                    "Error creating dataset: {}",
                    String::from_utf8_lossy(&payload)
                ),
            });
        }

        let dataset: Dataset = serde_json::from_slice(&response.body).map_err(|e| {
            ClientError::Decode(format!("Error deserializing created dataset: {}", e))
        })?;

        tracing::debug!(id = %dataset.id(), name = %dataset.name(), "Created dataset");
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::testing::ScriptedTransport;
    use crate::types::{Column, Schema};
    use std::sync::Arc;

    const CREATED_JSON: &str = r#"{
        "id": "4405ff58-1957-45f0-82bd-914d989a3ea3",
        "name": "Leonhard Euler Party",
        "description": "Mathematician Guest List",
        "rows": 0,
        "columns": 0,
        "schema": {
            "columns": [
                {"type": "STRING", "name": "Friend"},
                {"type": "STRING", "name": "Attending"}
            ]
        },
        "owner": {"id": 27, "name": "DomoSupport"},
        "createdAt": "2016-06-21T17:20:36Z",
        "updatedAt": "2016-06-21T17:20:36Z"
    }"#;

    fn scripted_client() -> (DomoClient, Arc<ScriptedTransport>) {
        let transport = Arc::new(ScriptedTransport::new());
        let config = ClientConfig::builder("https://api.domo.com")
            .build()
            .unwrap();
        let client = DomoClient::with_transport(config, transport.clone()).unwrap();
        (client, transport)
    }

    fn descriptor() -> DatasetDescriptor {
        DatasetDescriptor::new(
            "Leonhard Euler Party",
            Schema::new(vec![
                Column::new("Friend", "STRING"),
                Column::new("Attending", "STRING"),
            ]),
        )
        .description("Mathematician Guest List")
    }

    #[tokio::test]
    async fn test_create_round_trip() {
        let (client, transport) = scripted_client();
        transport.push_json(201, CREATED_JSON);

        let input = descriptor();
        let dataset = client.create_dataset(&input, "tok").await.unwrap();

        assert_eq!(dataset.descriptor(), input);
        assert_eq!(dataset.id(), "4405ff58-1957-45f0-82bd-914d989a3ea3");
        let owner = dataset.owner.unwrap();
        assert_eq!(owner.id, 27);
        assert_eq!(owner.name, "DomoSupport");

        let request = &transport.requests()[0];
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.url, "https://api.domo.com/v1/datasets");
        assert_eq!(request.header_str("content-type"), Some("application/json"));
        let sent: DatasetDescriptor =
            serde_json::from_slice(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(sent, input);
    }

    #[tokio::test]
    async fn test_non_201_includes_payload() {
        let (client, transport) = scripted_client();
        transport.push_json(200, CREATED_JSON);

        let err = client.create_dataset(&descriptor(), "tok").await.unwrap_err();
        assert_eq!(err.status(), Some(200));
        assert!(err.to_string().contains("Leonhard Euler Party"));
        assert!(err.to_string().contains("Attending"));
    }

    #[tokio::test]
    async fn test_bad_body_is_decode_error() {
        let (client, transport) = scripted_client();
        transport.push(201, "not json");

        let err = client.create_dataset(&descriptor(), "tok").await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)), "got {:?}", err);
    }
}
