// 👥 Client Entity - Companies acquired by the consultant
//
// Identity: opaque id (UUID when minted locally, backend id when loaded)
// Values: company/owner/legal names and the acquisition date
//
// The acquisition date drives the NNCF count (new clients per period).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Dated;

// ============================================================================
// CLIENT ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    /// Stable identity - transactions reference it through `client_id`
    pub id: String,

    /// Trading name shown in every listing (e.g., "Bar Centrale")
    pub company_name: String,

    /// Name of the owner / contact person
    pub owner_name: String,

    /// Registered legal name (e.g., "Bar Centrale S.r.l.")
    pub legal_name: String,

    /// Day the client was acquired, no time component
    /// None = the data store handed over an unparseable date
    pub acquisition_date: Option<NaiveDate>,
}

impl Client {
    /// Create new client with a fresh UUID
    pub fn new(
        company_name: String,
        owner_name: String,
        legal_name: String,
        acquisition_date: NaiveDate,
    ) -> Self {
        Client {
            id: uuid::Uuid::new_v4().to_string(),
            company_name,
            owner_name,
            legal_name,
            acquisition_date: Some(acquisition_date),
        }
    }

    /// Use an id assigned by the data store
    pub fn with_id(mut self, id: String) -> Self {
        self.id = id;
        self
    }
}

impl Dated for Client {
    fn record_date(&self) -> Option<NaiveDate> {
        self.acquisition_date
    }
}
