// Core models
pub mod lead;

pub use lead::{
    CountResponse, EditField, Lead, LeadField, LeadUpdate, NewLead, TotalResponse,
};
