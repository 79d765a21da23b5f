use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::ClientId;

/// A persisted client record.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    /// Brazilian individual taxpayer registry number, stored as given.
    pub cpf: String,
    pub birth_date: DateTime<Utc>,
    pub income: f64,
}

/// Full set of client attributes without an identifier.
///
/// Used both for inserts and for full-record updates, where every column of
/// the target row is replaced. Birth dates are kept to the microsecond.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewClient {
    pub name: String,
    pub cpf: String,
    pub birth_date: DateTime<Utc>,
    pub income: f64,
}

impl NewClient {
    #[must_use]
    pub fn new(name: String, cpf: String, birth_date: DateTime<Utc>, income: f64) -> Self {
        Self {
            name: name.trim().to_string(),
            cpf: cpf.trim().to_string(),
            birth_date: birth_date.trunc_subsecs(6),
            income,
        }
    }
}

impl From<&Client> for NewClient {
    fn from(client: &Client) -> Self {
        Self {
            name: client.name.clone(),
            cpf: client.cpf.clone(),
            birth_date: client.birth_date,
            income: client.income,
        }
    }
}

impl From<Client> for NewClient {
    fn from(client: Client) -> Self {
        Self {
            name: client.name,
            cpf: client.cpf,
            birth_date: client.birth_date,
            income: client.income,
        }
    }
}
