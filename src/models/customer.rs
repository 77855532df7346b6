use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A B2B customer organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub id: Uuid,

    pub organization_name: String,

    pub industry: Option<String>,
    pub website: Option<String>,

    pub primary_contact_name: Option<String>,
    pub primary_contact_email: Option<String>,
    pub primary_contact_phone: Option<String>,

    pub address: Option<String>,
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCustomer {
    pub organization_name: String,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub primary_contact_name: Option<String>,
    pub primary_contact_email: Option<String>,
    pub primary_contact_phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCustomer {
    pub organization_name: Option<String>,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub primary_contact_name: Option<String>,
    pub primary_contact_email: Option<String>,
    pub primary_contact_phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

fn check_email(email: Option<&str>) -> Result<(), String> {
    match email {
        Some(address) if !address.contains('@') => {
            Err(format!("'{}' is not a valid email address", address))
        }
        _ => Ok(()),
    }
}

impl CreateCustomer {
    pub fn validate(&self) -> Result<(), String> {
        if self.organization_name.trim().is_empty() {
            return Err("organization_name cannot be empty".to_string());
        }
        check_email(self.primary_contact_email.as_deref())
    }
}

impl UpdateCustomer {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.organization_name {
            if name.trim().is_empty() {
                return Err("organization_name cannot be empty".to_string());
            }
        }
        check_email(self.primary_contact_email.as_deref())
    }
}

impl Customer {
    pub fn new(create: CreateCustomer) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            organization_name: create.organization_name,
            industry: create.industry,
            website: create.website,
            primary_contact_name: create.primary_contact_name,
            primary_contact_email: create.primary_contact_email,
            primary_contact_phone: create.primary_contact_phone,
            address: create.address,
            notes: create.notes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies only the fields present in `update`.
    pub fn apply(&mut self, update: UpdateCustomer) {
        if let Some(name) = update.organization_name {
            self.organization_name = name;
        }
        if let Some(industry) = update.industry {
            self.industry = Some(industry);
        }
        if let Some(website) = update.website {
            self.website = Some(website);
        }
        if let Some(contact) = update.primary_contact_name {
            self.primary_contact_name = Some(contact);
        }
        if let Some(email) = update.primary_contact_email {
            self.primary_contact_email = Some(email);
        }
        if let Some(phone) = update.primary_contact_phone {
            self.primary_contact_phone = Some(phone);
        }
        if let Some(address) = update.address {
            self.address = Some(address);
        }
        if let Some(notes) = update.notes {
            self.notes = Some(notes);
        }
        self.updated_at = Utc::now();
    }
}
