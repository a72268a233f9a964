//! The remote collaborator: every read and write of leads goes through [`LeadApi`].

use async_trait::async_trait;

use crate::errors::ClientError;
use crate::models::{Lead, LeadUpdate, NewLead};

pub mod http;

pub use http::HttpLeadApi;

/// CRUD surface of the lead backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeadApi: Send + Sync {
    /// `GET /api/customers?isContracted=<bool>`, in backend order.
    async fn list_leads(&self, is_contracted: bool) -> Result<Vec<Lead>, ClientError>;

    /// `GET /api/customers/total`
    async fn total_count(&self) -> Result<u64, ClientError>;

    /// `GET /api/customers/contracted?isContracted=<bool>`
    async fn contracted_count(&self, is_contracted: bool) -> Result<u64, ClientError>;

    /// `GET /api/search-customers?query=<string>`, possibly empty.
    async fn search_leads(&self, query: &str) -> Result<Vec<Lead>, ClientError>;

    /// `POST /api/instagram`. Only a 201 counts as created; a 400 yields
    /// [`ClientError::Validation`] carrying the server message.
    async fn create_lead(&self, lead: &NewLead) -> Result<(), ClientError>;

    /// `PUT /api/customers/:id` with the fields present in `update`.
    async fn update_lead(&self, id: &str, update: &LeadUpdate) -> Result<(), ClientError>;
}
