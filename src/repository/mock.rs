//! Mock repository implementations for isolating callers in tests.

use chrono::{DateTime, Utc};
use mockall::mock;

use crate::domain::client::{Client, NewClient};
use crate::domain::types::ClientId;
use crate::pagination::{Page, PageRequest};
use crate::repository::errors::RepositoryResult;
use crate::repository::{ClientReader, ClientWriter};

mock! {
    pub Repository {}

    impl ClientReader for Repository {
        fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
        fn client_exists(&self, id: ClientId) -> RepositoryResult<bool>;
        fn count_clients(&self) -> RepositoryResult<usize>;
        fn list_clients(&self, page: PageRequest) -> RepositoryResult<Page<Client>>;
        fn find_clients_by_income(
            &self,
            min_income: f64,
            page: PageRequest,
        ) -> RepositoryResult<Page<Client>>;
        fn find_clients_by_name(
            &self,
            name_part: &str,
            page: PageRequest,
        ) -> RepositoryResult<Page<Client>>;
        fn find_clients_by_year(
            &self,
            min_birth_date: DateTime<Utc>,
            page: PageRequest,
        ) -> RepositoryResult<Page<Client>>;
    }

    impl ClientWriter for Repository {
        fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
        fn update_client(
            &self,
            client_id: ClientId,
            updates: &NewClient,
        ) -> RepositoryResult<Client>;
        fn delete_client(&self, client_id: ClientId) -> RepositoryResult<()>;
    }
}
