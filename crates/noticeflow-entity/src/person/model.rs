//! Notified person entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The recipient of a notification and their postal address.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NotifiedPerson {
    /// Unique person identifier.
    pub id: Uuid,
    /// Owning notification. At most one person per notification.
    pub notification_id: Uuid,
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Phone number, digits only.
    pub phone: String,
    /// Postal code (CEP), digits only.
    pub cep: String,
    /// Two-letter state code, uppercase.
    pub state: String,
    /// City.
    pub city: String,
    /// Neighborhood.
    pub neighborhood: String,
    /// Street and number.
    pub street: String,
    /// When the person was created.
    pub created_at: DateTime<Utc>,
    /// When the person was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to attach a person to a notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNotifiedPerson {
    /// Target notification.
    pub notification_id: Uuid,
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// Postal code.
    pub cep: String,
    /// State code.
    pub state: String,
    /// City.
    pub city: String,
    /// Neighborhood.
    pub neighborhood: String,
    /// Street.
    pub street: String,
}

impl CreateNotifiedPerson {
    /// Strip formatting from `cep` and `phone` and uppercase `state`.
    pub fn normalized(mut self) -> Self {
        self.cep = digits_only(&self.cep);
        self.phone = digits_only(&self.phone);
        self.state = self.state.trim().to_uppercase();
        self
    }
}

/// Field changes for an attached person. `None` leaves a field as is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNotifiedPerson {
    /// Full name.
    pub name: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Postal code.
    pub cep: Option<String>,
    /// State code.
    pub state: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Neighborhood.
    pub neighborhood: Option<String>,
    /// Street.
    pub street: Option<String>,
}

impl UpdateNotifiedPerson {
    /// Same normalisation as [`CreateNotifiedPerson::normalized`], on present fields.
    pub fn normalized(mut self) -> Self {
        self.cep = self.cep.as_deref().map(digits_only);
        self.phone = self.phone.as_deref().map(digits_only);
        self.state = self.state.as_deref().map(|s| s.trim().to_uppercase());
        self
    }

    /// Apply the changes to an existing row.
    pub fn apply_to(self, person: &mut NotifiedPerson) {
        if let Some(v) = self.name {
            person.name = v;
        }
        if let Some(v) = self.email {
            person.email = v;
        }
        if let Some(v) = self.phone {
            person.phone = v;
        }
        if let Some(v) = self.cep {
            person.cep = v;
        }
        if let Some(v) = self.state {
            person.state = v;
        }
        if let Some(v) = self.city {
            person.city = v;
        }
        if let Some(v) = self.neighborhood {
            person.neighborhood = v;
        }
        if let Some(v) = self.street {
            person.street = v;
        }
    }
}

fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}
