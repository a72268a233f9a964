use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use super::LeadApi;
use crate::config::ClientConfig;
use crate::errors::{ClientError, ErrorBody};
use crate::models::{CountResponse, Lead, LeadUpdate, NewLead, TotalResponse};

/// [`LeadApi`] over HTTP+JSON.
#[derive(Clone, Debug)]
pub struct HttpLeadApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpLeadApi {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "base url {} cannot carry a path",
                config.base_url
            )));
        }
        // Url::join drops the last segment unless the path ends with a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path)?)
    }

    fn lead_endpoint(&self, id: &str) -> Result<Url, ClientError> {
        let mut url = self.endpoint("api/customers")?;
        url.path_segments_mut()
            .map_err(|_| ClientError::Config("base url cannot carry a path".to_string()))?
            .push(id);
        Ok(url)
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        warn!(status = status.as_u16(), url = %response.url(), "request failed");
        return Err(ClientError::Status(status.as_u16()));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

#[async_trait]
impl LeadApi for HttpLeadApi {
    #[instrument(skip(self))]
    async fn list_leads(&self, is_contracted: bool) -> Result<Vec<Lead>, ClientError> {
        let response = self
            .client
            .get(self.endpoint("api/customers")?)
            .query(&[("isContracted", is_contracted)])
            .send()
            .await?;
        let leads: Vec<Lead> = read_json(response).await?;
        debug!(count = leads.len(), "fetched leads");
        Ok(leads)
    }

    #[instrument(skip(self))]
    async fn total_count(&self) -> Result<u64, ClientError> {
        let response = self
            .client
            .get(self.endpoint("api/customers/total")?)
            .send()
            .await?;
        let body: TotalResponse = read_json(response).await?;
        Ok(body.total)
    }

    #[instrument(skip(self))]
    async fn contracted_count(&self, is_contracted: bool) -> Result<u64, ClientError> {
        let response = self
            .client
            .get(self.endpoint("api/customers/contracted")?)
            .query(&[("isContracted", is_contracted)])
            .send()
            .await?;
        let body: CountResponse = read_json(response).await?;
        Ok(body.count)
    }

    #[instrument(skip(self))]
    async fn search_leads(&self, query: &str) -> Result<Vec<Lead>, ClientError> {
        let response = self
            .client
            .get(self.endpoint("api/search-customers")?)
            .query(&[("query", query)])
            .send()
            .await?;
        read_json(response).await
    }

    #[instrument(skip(self, lead))]
    async fn create_lead(&self, lead: &NewLead) -> Result<(), ClientError> {
        let response = self
            .client
            .post(self.endpoint("api/instagram")?)
            .json(lead)
            .send()
            .await?;

        match response.status() {
            StatusCode::CREATED => Ok(()),
            StatusCode::BAD_REQUEST => match response.json::<ErrorBody>().await {
                Ok(body) => Err(ClientError::Validation(body.error)),
                Err(e) => {
                    warn!(error = %e, "rejection without readable error body");
                    Err(ClientError::Status(StatusCode::BAD_REQUEST.as_u16()))
                }
            },
            status if status.is_success() => Err(ClientError::UnexpectedStatus(status.as_u16())),
            status => Err(ClientError::Status(status.as_u16())),
        }
    }

    #[instrument(skip(self, update))]
    async fn update_lead(&self, id: &str, update: &LeadUpdate) -> Result<(), ClientError> {
        let response = self
            .client
            .put(self.lead_endpoint(id)?)
            .json(update)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            warn!(status = status.as_u16(), "update rejected");
            Err(ClientError::Status(status.as_u16()))
        }
    }
}
