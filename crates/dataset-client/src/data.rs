//! CSV download and upload of dataset rows.

use crate::client::DomoClient;
use crate::error::{ClientError, Result};
use crate::types::UpdateMethod;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};

impl DomoClient {
    /// Download a dataset's rows as CSV text.
    ///
    /// An empty body on a 200 response is returned as an empty string.
    pub async fn dataset_data(
        &self,
        token: &str,
        dataset_id: &str,
        include_header: bool,
    ) -> Result<String> {
        let mut url = self.url(&format!(
            "/v1/datasets/{}/data",
            urlencoding::encode(dataset_id)
        ));
        if include_header {
            url.push_str("?includeHeader=true");
        }

        let request = self
            .bearer_request(Method::GET, url, token)?
            .header(CONTENT_TYPE, "text/csv")?;

        let response = self.dispatch(request).await?;

        if response.status != StatusCode::OK {
            return Err(ClientError::Api {
                status: response.status.as_u16(),
                message: response.text_lossy(),
            });
        }

        String::from_utf8(response.body)
            .map_err(|e| ClientError::Decode(format!("dataset data is not UTF-8: {}", e)))
    }

    /// Upload CSV rows, appending to or replacing the dataset's contents.
    ///
    /// Only `204 No Content` counts as success; any other status, 200
    /// included, is an error. An empty `dataset_id` is rejected before any
    /// request is sent.
    pub async fn add_data_to_dataset(
        &self,
        dataset_id: &str,
        csv: impl Into<Vec<u8>>,
        method: UpdateMethod,
        token: &str,
    ) -> Result<()> {
        if dataset_id.is_empty() {
            return Err(ClientError::Validation("missing datasetID".to_string()));
        }

        let url = self.url(&format!(
            "/v1/datasets/{}/data?updateMethod={}",
            urlencoding::encode(dataset_id),
            method
        ));

        let request = self
            .bearer_request(Method::PUT, url.clone(), token)?
            .header(CONTENT_TYPE, "text/csv")?
            .body(csv);

        let response = self.dispatch(request).await?;

        if response.status != StatusCode::NO_CONTENT {
            return Err(ClientError::Api {
                status: response.status.as_u16(),
                message: format!("URL: {}", url),
            });
        }

        tracing::debug!(dataset_id = %dataset_id, method = %method, "Uploaded dataset rows");
        Ok(())
    }
}
