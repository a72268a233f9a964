//! View state of a lead session and the transitions that change it.
//!
//! [`ViewModel::apply`] is the only way state moves; it performs no I/O, so
//! every transition can be exercised on its own.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{EditField, Lead, LeadField, LeadUpdate, NewLead};

pub const DEFAULT_RECENT_LIMIT: usize = 5;

const TRUE: &str = "true";
const FALSE: &str = "false";

fn flag_string(value: bool) -> String {
    let text = if value { TRUE } else { FALSE };
    text.to_string()
}

/// Only the exact string `"true"` reads as set.
fn parse_flag(value: &str) -> bool {
    value == TRUE
}

/// Local, unsent copy of a search result. Flags are kept in their
/// form-binding string form until commit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditBuffer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub instagram: String,
    pub sector: String,
    pub is_contracted: String,
    pub mail_opened: String,
    pub replied: String,
}

impl Default for EditBuffer {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            instagram: String::new(),
            sector: String::new(),
            is_contracted: flag_string(false),
            mail_opened: flag_string(false),
            replied: flag_string(false),
        }
    }
}

impl EditBuffer {
    pub fn from_lead(lead: &Lead) -> Self {
        Self {
            id: lead.id.clone(),
            name: lead.name.clone(),
            email: lead.email.clone(),
            phone: lead.phone.clone(),
            instagram: lead.instagram.clone(),
            sector: lead.sector.clone(),
            is_contracted: flag_string(lead.is_contracted),
            mail_opened: flag_string(lead.mail_opened),
            replied: flag_string(lead.replied),
        }
    }

    pub fn get(&self, field: EditField) -> &str {
        match field {
            EditField::Name => &self.name,
            EditField::Email => &self.email,
            EditField::Phone => &self.phone,
            EditField::Instagram => &self.instagram,
            EditField::Sector => &self.sector,
            EditField::IsContracted => &self.is_contracted,
            EditField::MailOpened => &self.mail_opened,
            EditField::Replied => &self.replied,
        }
    }

    pub fn set(&mut self, field: EditField, value: String) {
        let slot = match field {
            EditField::Name => &mut self.name,
            EditField::Email => &mut self.email,
            EditField::Phone => &mut self.phone,
            EditField::Instagram => &mut self.instagram,
            EditField::Sector => &mut self.sector,
            EditField::IsContracted => &mut self.is_contracted,
            EditField::MailOpened => &mut self.mail_opened,
            EditField::Replied => &mut self.replied,
        };
        *slot = value;
    }

    /// Full update carrying every field, flags parsed back to booleans.
    pub fn to_update(&self) -> LeadUpdate {
        LeadUpdate {
            name: Some(self.name.clone()),
            email: Some(self.email.clone()),
            phone: Some(self.phone.clone()),
            instagram: Some(self.instagram.clone()),
            sector: Some(self.sector.clone()),
            is_contracted: Some(parse_flag(&self.is_contracted)),
            mail_opened: Some(parse_flag(&self.mail_opened)),
            replied: Some(parse_flag(&self.replied)),
        }
    }
}

fn form_slot(form: &mut NewLead, field: LeadField) -> &mut String {
    match field {
        LeadField::Name => &mut form.name,
        LeadField::Email => &mut form.email,
        LeadField::Phone => &mut form.phone,
        LeadField::Instagram => &mut form.instagram,
        LeadField::Sector => &mut form.sector,
    }
}

/// User-visible transitions of a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    FormFieldChanged { field: LeadField, value: String },
    SubmitStarted,
    LeadCreated,
    CreateFailed { message: String },
    RecentLoaded { leads: Vec<Lead> },
    TotalLoaded { total: u64 },
    ContractedLoaded { contracted: u64, uncontracted: u64 },
    SearchStarted { query: String, token: u64 },
    SearchResolved { token: u64, results: Vec<Lead> },
    EditFieldChanged { field: EditField, value: String },
    EditCommitted,
    ContactToggled { index: usize },
}

/// Everything the lead page shows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub form: NewLead,
    /// Inline message under the creation form
    pub error: Option<String>,
    pub recent: Vec<Lead>,
    /// Display positions in `recent` marked this session
    pub checked: Vec<usize>,
    pub total: u64,
    pub contracted: u64,
    pub uncontracted: u64,
    pub search_query: String,
    pub search_result: Option<Lead>,
    pub edit: EditBuffer,
    /// Token of the most recently started search
    pub search_token: u64,
    pub recent_limit: usize,
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_LIMIT)
    }
}

impl ViewModel {
    pub fn new(recent_limit: usize) -> Self {
        Self {
            form: NewLead::default(),
            error: None,
            recent: Vec::new(),
            checked: Vec::new(),
            total: 0,
            contracted: 0,
            uncontracted: 0,
            search_query: String::new(),
            search_result: None,
            edit: EditBuffer::default(),
            search_token: 0,
            recent_limit,
        }
    }

    /// Submission stays disabled until every required field is filled in.
    pub fn can_submit(&self) -> bool {
        self.form.validate().is_ok()
    }

    pub fn is_checked(&self, index: usize) -> bool {
        self.checked.contains(&index)
    }

    pub fn next_search_token(&self) -> u64 {
        self.search_token + 1
    }

    pub fn is_current_search(&self, token: u64) -> bool {
        token == self.search_token
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::FormFieldChanged { field, value } => {
                *form_slot(&mut self.form, field) = value;
            }
            Action::SubmitStarted => self.error = None,
            Action::LeadCreated => self.form = NewLead::default(),
            Action::CreateFailed { message } => self.error = Some(message),
            Action::RecentLoaded { mut leads } => {
                leads.truncate(self.recent_limit);
                self.recent = leads;
                self.checked.clear();
            }
            Action::TotalLoaded { total } => self.total = total,
            Action::ContractedLoaded {
                contracted,
                uncontracted,
            } => {
                self.contracted = contracted;
                self.uncontracted = uncontracted;
            }
            Action::SearchStarted { query, token } => {
                self.search_query = query;
                self.search_token = token;
                self.search_result = None;
            }
            Action::SearchResolved { token, results } => {
                if !self.is_current_search(token) {
                    return;
                }
                // only the first match is shown, even when several come back
                self.search_result = results.into_iter().next();
                self.edit = match &self.search_result {
                    Some(found) => EditBuffer::from_lead(found),
                    None => EditBuffer::default(),
                };
            }
            Action::EditFieldChanged { field, value } => self.edit.set(field, value),
            Action::EditCommitted => {
                self.search_result = None;
                self.edit = EditBuffer::default();
            }
            Action::ContactToggled { index } => {
                if !self.checked.contains(&index) {
                    self.checked.push(index);
                }
            }
        }
    }
}
