//! Dataset listing and name resolution.

use crate::client::DomoClient;
use crate::error::{ClientError, Result};
use crate::types::Dataset;
use reqwest::header::ACCEPT;
use reqwest::{Method, StatusCode};

/// Datasets requested per listing page.
pub const PAGE_SIZE: usize = 50;

impl DomoClient {
    /// List every dataset visible to the token, sorted by name.
    ///
    /// Pages through `/v1/datasets` in steps of [`PAGE_SIZE`] until a page
    /// comes back empty. Any failing page fails the whole listing; pages
    /// already fetched are discarded.
    pub async fn list_datasets(&self, token: &str) -> Result<Vec<Dataset>> {
        let mut datasets = Vec::new();
        let mut offset = 0usize;

        loop {
            let page = self.list_datasets_page(token, offset).await?;
            if page.is_empty() {
                break;
            }
            datasets.extend(page);
            offset += PAGE_SIZE;
        }

        tracing::debug!(count = datasets.len(), "Listed datasets");
        Ok(datasets)
    }

    /// Fetch a single listing page starting at `offset`.
    pub async fn list_datasets_page(&self, token: &str, offset: usize) -> Result<Vec<Dataset>> {
        let url = self.url(&format!(
            "/v1/datasets?sort=name&limit={}&offset={}",
            PAGE_SIZE, offset
        ));
        let request = self
            .bearer_request(Method::GET, url, token)?
            .header(ACCEPT, "application/json")?;

        let response = self.dispatch(request).await?;

        if response.status != StatusCode::OK {
            return Err(ClientError::Api {
                status: response.status.as_u16(),
                message: format!(
                    "listing datasets at offset {} failed: {}",
                    offset,
                    response.text_lossy()
                ),
            });
        }

        // A `null` page ends the listing like an empty one.
        let page: Option<Vec<Dataset>> = serde_json::from_slice(&response.body).map_err(|e| {
            ClientError::Decode(format!(
                "Failed to parse dataset page at offset {}: {}",
                offset, e
            ))
        })?;
        Ok(page.unwrap_or_default())
    }

    /// Ids of every dataset whose name matches `name` exactly.
    ///
    /// Names are not unique, so all matches are returned in listing order.
    /// No match yields an empty vector.
    pub async fn dataset_ids_by_name(&self, name: &str, token: &str) -> Result<Vec<String>> {
        let datasets = self.list_datasets(token).await?;
        Ok(datasets
            .into_iter()
            .filter(|d| d.name.as_deref() == Some(name))
            .map(|d| d.id.unwrap_or_default())
            .collect())
    }
}
