use chrono::{DateTime, Utc};

use crate::{
    db::{DbConnection, DbPool, get_connection},
    domain::{
        client::{Client, NewClient},
        types::ClientId,
    },
    pagination::{Page, PageRequest},
    repository::errors::RepositoryResult,
};

pub mod client;
pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;

/// Diesel-backed repository shared by every reader and writer trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

pub trait ClientReader {
    /// Looks a client up by identifier; a missing row is `Ok(None)`.
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
    fn client_exists(&self, id: ClientId) -> RepositoryResult<bool>;
    fn count_clients(&self) -> RepositoryResult<usize>;
    fn list_clients(&self, page: PageRequest) -> RepositoryResult<Page<Client>>;
    /// Clients whose income is at least `min_income`.
    fn find_clients_by_income(
        &self,
        min_income: f64,
        page: PageRequest,
    ) -> RepositoryResult<Page<Client>>;
    /// Clients whose name contains `name_part`, ignoring case. An empty
    /// `name_part` matches every client.
    fn find_clients_by_name(
        &self,
        name_part: &str,
        page: PageRequest,
    ) -> RepositoryResult<Page<Client>>;
    /// Clients born at or after the `min_birth_date` instant. Full
    /// timestamps are compared, not calendar years.
    fn find_clients_by_year(
        &self,
        min_birth_date: DateTime<Utc>,
        page: PageRequest,
    ) -> RepositoryResult<Page<Client>>;
}

pub trait ClientWriter {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
    /// Replaces every column of the client row. Fails with `NotFound` when
    /// no such client exists.
    fn update_client(&self, client_id: ClientId, updates: &NewClient) -> RepositoryResult<Client>;
    /// Removes the client row. Fails with `NotFound` when no such client exists.
    fn delete_client(&self, client_id: ClientId) -> RepositoryResult<()>;

    /// Inserts when `client_id` is unset, otherwise fully updates that row.
    fn save_client(
        &self,
        client_id: Option<ClientId>,
        client: &NewClient,
    ) -> RepositoryResult<Client> {
        match client_id {
            Some(id) => self.update_client(id, client),
            None => self.create_client(client),
        }
    }
}
