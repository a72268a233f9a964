use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};
use validator::Validate;

use crate::client::LeadApi;
use crate::errors::ClientError;
use crate::models::{EditField, LeadField, LeadUpdate};
use crate::operator::Operator;
use crate::state::{Action, ViewModel};

pub const CONFIRM_CONTACT_PROMPT: &str = "Has this lead been contacted?";
pub const LEAD_SAVED_MESSAGE: &str = "Lead saved.";
pub const LEAD_UPDATED_MESSAGE: &str = "Lead updated.";
pub const LEAD_CONTACTED_MESSAGE: &str = "Lead marked as contacted.";
pub const UPDATE_FAILED_MESSAGE: &str = "Update failed.";

/// Owns the view-model of one session and runs each user action against
/// the backend.
///
/// The state lock is never held across a request, so handlers may
/// interleave; searches guard against that with a request token.
pub struct LeadController {
    api: Arc<dyn LeadApi>,
    operator: Arc<dyn Operator>,
    state: Mutex<ViewModel>,
}

impl LeadController {
    pub fn new(api: Arc<dyn LeadApi>, operator: Arc<dyn Operator>, recent_limit: usize) -> Self {
        Self {
            api,
            operator,
            state: Mutex::new(ViewModel::new(recent_limit)),
        }
    }

    /// Copy of the current view state.
    pub async fn snapshot(&self) -> ViewModel {
        self.state.lock().await.clone()
    }

    async fn apply(&self, action: Action) {
        self.state.lock().await.apply(action);
    }

    /// Loads everything the page shows on first render.
    #[instrument(skip(self))]
    pub async fn open(&self) {
        let _ = tokio::join!(
            self.refresh_recent(),
            self.refresh_total(),
            self.refresh_contracted_counts()
        );
    }

    #[instrument(skip(self))]
    pub async fn refresh_recent(&self) -> Result<(), ClientError> {
        match self.api.list_leads(false).await {
            Ok(leads) => {
                self.apply(Action::RecentLoaded { leads }).await;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "failed to load recent leads");
                Err(e)
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn refresh_total(&self) -> Result<(), ClientError> {
        match self.api.total_count().await {
            Ok(total) => {
                self.apply(Action::TotalLoaded { total }).await;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "failed to load total lead count");
                Err(e)
            }
        }
    }

    /// Both counts come from separate requests and are applied only together.
    #[instrument(skip(self))]
    pub async fn refresh_contracted_counts(&self) -> Result<(), ClientError> {
        let (contracted, uncontracted) = tokio::join!(
            self.api.contracted_count(true),
            self.api.contracted_count(false)
        );
        match (contracted, uncontracted) {
            (Ok(contracted), Ok(uncontracted)) => {
                self.apply(Action::ContractedLoaded {
                    contracted,
                    uncontracted,
                })
                .await;
                Ok(())
            }
            (Err(e), _) | (_, Err(e)) => {
                error!(error = %e, "failed to load contracted counts");
                Err(e)
            }
        }
    }

    async fn refresh_after_update(&self) {
        let _ = tokio::join!(self.refresh_recent(), self.refresh_contracted_counts());
    }

    pub async fn set_form_field(&self, field: LeadField, value: impl Into<String>) {
        self.apply(Action::FormFieldChanged {
            field,
            value: value.into(),
        })
        .await;
    }

    /// Submits the creation form.
    ///
    /// An incomplete form never reaches the backend. A rejection shows the
    /// server's message inline, any other failure a generic one.
    #[instrument(skip(self))]
    pub async fn submit_form(&self) -> Result<(), ClientError> {
        let form = self.state.lock().await.form.clone();
        form.validate()?;

        self.apply(Action::SubmitStarted).await;
        match self.api.create_lead(&form).await {
            Ok(()) => {
                info!("lead created");
                self.operator.notify(LEAD_SAVED_MESSAGE).await;
                self.apply(Action::LeadCreated).await;
                self.open().await;
                Ok(())
            }
            Err(ClientError::UnexpectedStatus(status)) => {
                warn!(status, "lead creation was not acknowledged");
                Err(ClientError::UnexpectedStatus(status))
            }
            Err(e) => {
                self.apply(Action::CreateFailed {
                    message: e.user_message(),
                })
                .await;
                Err(e)
            }
        }
    }

    /// Runs a search; an empty query falls back to the recent list.
    ///
    /// A response is dropped if another search started while it was in flight.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<(), ClientError> {
        let token = {
            let mut state = self.state.lock().await;
            let token = state.next_search_token();
            state.apply(Action::SearchStarted {
                query: query.to_string(),
                token,
            });
            token
        };

        if query.is_empty() {
            return self.refresh_recent().await;
        }

        match self.api.search_leads(query).await {
            Ok(results) => {
                let mut state = self.state.lock().await;
                if !state.is_current_search(token) {
                    debug!(token, "discarding stale search response");
                    return Ok(());
                }
                state.apply(Action::SearchResolved { token, results });
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "search failed");
                Err(e)
            }
        }
    }

    pub async fn set_edit_field(&self, field: EditField, value: impl Into<String>) {
        self.apply(Action::EditFieldChanged {
            field,
            value: value.into(),
        })
        .await;
    }

    /// Sends the edit buffer as a full update of the matched lead.
    #[instrument(skip(self))]
    pub async fn commit_edit(&self) -> Result<(), ClientError> {
        let (id, update, shown) = {
            let state = self.state.lock().await;
            (
                state.edit.id.clone(),
                state.edit.to_update(),
                state.search_result.is_some(),
            )
        };
        if !shown || id.is_empty() {
            return Err(ClientError::InvalidInput(
                "no search result to update".to_string(),
            ));
        }

        match self.api.update_lead(&id, &update).await {
            Ok(()) => {
                info!(lead_id = %id, "lead updated");
                self.operator.notify(LEAD_UPDATED_MESSAGE).await;
                self.apply(Action::EditCommitted).await;
                // edits never change the total, so it is not refetched
                self.refresh_after_update().await;
                Ok(())
            }
            Err(e) => {
                error!(lead_id = %id, error = %e, "failed to update lead");
                self.operator.notify(UPDATE_FAILED_MESSAGE).await;
                Err(e)
            }
        }
    }

    /// Marks the lead shown at `index` as contacted once the operator confirms.
    ///
    /// The position is recorded as checked whatever the answer. Returns
    /// whether the operator confirmed.
    #[instrument(skip(self))]
    pub async fn mark_contacted(&self, lead_id: &str, index: usize) -> Result<bool, ClientError> {
        if !self.operator.confirm(CONFIRM_CONTACT_PROMPT).await {
            self.apply(Action::ContactToggled { index }).await;
            return Ok(false);
        }

        let outcome = self.api.update_lead(lead_id, &LeadUpdate::contacted()).await;
        self.apply(Action::ContactToggled { index }).await;

        match outcome {
            Ok(()) => {
                info!(lead_id, "lead marked as contacted");
                self.operator.notify(LEAD_CONTACTED_MESSAGE).await;
                self.refresh_after_update().await;
                Ok(true)
            }
            Err(e) => {
                error!(lead_id, error = %e, "failed to mark lead as contacted");
                Err(e)
            }
        }
    }

    /// [`mark_contacted`](Self::mark_contacted) for the lead currently shown at `index`.
    pub async fn mark_contacted_at(&self, index: usize) -> Result<bool, ClientError> {
        let lead_id = {
            let state = self.state.lock().await;
            state
                .recent
                .get(index)
                .map(|lead| lead.id.clone())
                .ok_or_else(|| {
                    ClientError::InvalidInput(format!("no recent lead at position {index}"))
                })?
        };
        self.mark_contacted(&lead_id, index).await
    }
}
