use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::client::{Client as DomainClient, NewClient as DomainNewClient};
use crate::domain::types::{ClientId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::clients)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::client::Client`].
///
/// `birth_date` holds microseconds since the Unix epoch.
pub struct Client {
    pub id: i32,
    pub name: String,
    pub cpf: String,
    pub birth_date: i64,
    pub income: f64,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::clients)]
/// Column values written on insert and on full-record update.
pub struct NewClient<'a> {
    pub name: &'a str,
    pub cpf: &'a str,
    pub birth_date: i64,
    pub income: f64,
}

/// Stored form of `instant`; anything below a microsecond is dropped.
pub fn epoch_micros(instant: DateTime<Utc>) -> i64 {
    instant.timestamp_micros()
}

/// Smallest stored value that is not earlier than `instant`.
pub fn epoch_micros_not_before(instant: DateTime<Utc>) -> i64 {
    let micros = instant.timestamp_micros();
    if instant.timestamp_subsec_nanos() % 1_000 == 0 {
        micros
    } else {
        micros + 1
    }
}

impl TryFrom<Client> for DomainClient {
    type Error = TypeConstraintError;

    fn try_from(client: Client) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ClientId::new(client.id)?,
            name: client.name,
            cpf: client.cpf,
            birth_date: DateTime::from_timestamp_micros(client.birth_date)
                .ok_or(TypeConstraintError::TimestampOutOfRange)?,
            income: client.income,
        })
    }
}

impl<'a> From<&'a DomainNewClient> for NewClient<'a> {
    fn from(client: &'a DomainNewClient) -> Self {
        Self {
            name: client.name.as_str(),
            cpf: client.cpf.as_str(),
            birth_date: epoch_micros(client.birth_date),
            income: client.income,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    #[test]
    fn from_domain_new_creates_newclient() {
        let domain = DomainNewClient::new(
            "John".to_string(),
            "12345678901".to_string(),
            Utc.with_ymd_and_hms(1994, 7, 20, 10, 30, 0).unwrap(),
            2500.0,
        );
        let new: NewClient = (&domain).into();
        assert_eq!(new.name, domain.name);
        assert_eq!(new.cpf, domain.cpf);
        assert_eq!(new.birth_date, domain.birth_date.timestamp_micros());
        assert_eq!(new.income, domain.income);
    }

    #[test]
    fn client_into_domain() {
        let birth = Utc.with_ymd_and_hms(2001, 12, 31, 23, 59, 59).unwrap();
        let db_client = Client {
            id: 1,
            name: "n".to_string(),
            cpf: "c".to_string(),
            birth_date: epoch_micros(birth),
            income: 10.5,
        };
        let domain = DomainClient::try_from(db_client).unwrap();
        assert_eq!(domain.id.get(), 1);
        assert_eq!(domain.name, "n");
        assert_eq!(domain.cpf, "c");
        assert_eq!(domain.birth_date, birth);
        assert_eq!(domain.income, 10.5);
    }

    #[test]
    fn client_with_invalid_id_is_rejected() {
        let db_client = Client {
            id: 0,
            name: "n".to_string(),
            cpf: "c".to_string(),
            birth_date: 0,
            income: 0.0,
        };
        assert_eq!(
            DomainClient::try_from(db_client),
            Err(TypeConstraintError::NonPositiveId)
        );
    }

    #[test]
    fn client_with_unrepresentable_birth_date_is_rejected() {
        let db_client = Client {
            id: 1,
            name: "n".to_string(),
            cpf: "c".to_string(),
            birth_date: i64::MAX,
            income: 0.0,
        };
        assert_eq!(
            DomainClient::try_from(db_client),
            Err(TypeConstraintError::TimestampOutOfRange)
        );
    }

    #[test]
    fn epoch_micros_orders_years_outside_four_digits() {
        let before_era = Utc.with_ymd_and_hms(-2, 1, 1, 0, 0, 0).unwrap();
        let later_before_era = Utc.with_ymd_and_hms(-1, 1, 1, 0, 0, 0).unwrap();
        let modern = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let far = Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap();

        assert!(epoch_micros(before_era) < epoch_micros(later_before_era));
        assert!(epoch_micros(later_before_era) < epoch_micros(modern));
        assert!(epoch_micros(modern) < epoch_micros(far));
    }

    #[test]
    fn lower_bound_rounds_sub_microsecond_instants_up() {
        let whole = Utc.with_ymd_and_hms(2020, 7, 12, 20, 50, 0).unwrap();
        assert_eq!(epoch_micros_not_before(whole), epoch_micros(whole));

        let between = whole + TimeDelta::nanoseconds(500);
        assert_eq!(epoch_micros_not_before(between), epoch_micros(whole) + 1);

        let before_epoch = Utc.with_ymd_and_hms(1960, 1, 1, 0, 0, 0).unwrap()
            + TimeDelta::nanoseconds(1_500);
        assert_eq!(
            epoch_micros_not_before(before_epoch),
            epoch_micros(before_epoch) + 1
        );
    }
}
