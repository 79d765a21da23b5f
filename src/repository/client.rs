use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use log::debug;

use crate::{
    db::{DbConnection, casefold},
    domain::{
        client::{Client, NewClient},
        types::ClientId,
    },
    models::client::{Client as DbClient, NewClient as DbNewClient, epoch_micros_not_before},
    pagination::{ClientSort, Page, PageRequest, SortDirection},
    repository::{
        ClientReader, ClientWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::clients,
};

/// Row predicate shared by the windowed select and its count.
enum ClientFilter {
    All,
    MinIncome(f64),
    /// Lowercased `LIKE` pattern with `\` as the escape character.
    NameLike(String),
    /// Inclusive lower bound on the stored epoch microseconds.
    BornSince(i64),
}

impl ClientFilter {
    fn name_contains(name_part: &str) -> Self {
        let mut pattern = String::with_capacity(name_part.len() + 2);
        pattern.push('%');
        for ch in name_part.to_lowercase().chars() {
            if matches!(ch, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
        pattern.push('%');
        Self::NameLike(pattern)
    }

    fn query(&self) -> clients::BoxedQuery<'static, Sqlite> {
        let query = clients::table.into_boxed();
        match self {
            Self::All => query,
            Self::MinIncome(min) => query.filter(clients::income.ge(*min)),
            Self::NameLike(pattern) => {
                query.filter(casefold(clients::name).like(pattern.clone()).escape('\\'))
            }
            Self::BornSince(since) => query.filter(clients::birth_date.ge(*since)),
        }
    }
}

fn ordered(
    query: clients::BoxedQuery<'static, Sqlite>,
    sort: Option<(ClientSort, SortDirection)>,
) -> clients::BoxedQuery<'static, Sqlite> {
    use ClientSort::*;
    use SortDirection::*;

    let query = match sort {
        None | Some((Id, Asc)) => return query.order_by(clients::id.asc()),
        Some((Id, Desc)) => return query.order_by(clients::id.desc()),
        Some((Name, Asc)) => query.order_by(clients::name.asc()),
        Some((Name, Desc)) => query.order_by(clients::name.desc()),
        Some((BirthDate, Asc)) => query.order_by(clients::birth_date.asc()),
        Some((BirthDate, Desc)) => query.order_by(clients::birth_date.desc()),
        Some((Income, Asc)) => query.order_by(clients::income.asc()),
        Some((Income, Desc)) => query.order_by(clients::income.desc()),
    };
    query.then_order_by(clients::id.asc())
}

fn load_page(
    conn: &mut DbConnection,
    filter: &ClientFilter,
    request: &PageRequest,
) -> RepositoryResult<Page<Client>> {
    let limit = i64::try_from(request.size()).unwrap_or(i64::MAX);
    let offset = i64::try_from(request.offset())
        .map_err(|_| RepositoryError::ValidationError("page offset is out of range".into()))?;

    conn.transaction::<_, RepositoryError, _>(|conn| {
        let items = ordered(filter.query(), request.sort())
            .limit(limit)
            .offset(offset)
            .load::<DbClient>(conn)?
            .into_iter()
            .map(Client::try_from)
            .collect::<Result<Vec<Client>, _>>()?;

        let total: i64 = filter.query().count().get_result(conn)?;

        Ok(Page::new(items, request, total as usize))
    })
}

impl ClientReader for DieselRepository {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>> {
        let mut conn = self.conn()?;
        let client = clients::table
            .find(id.get())
            .first::<DbClient>(&mut conn)
            .optional()?;

        Ok(client.map(Client::try_from).transpose()?)
    }

    fn client_exists(&self, id: ClientId) -> RepositoryResult<bool> {
        let mut conn = self.conn()?;
        let exists = diesel::select(diesel::dsl::exists(clients::table.find(id.get())))
            .get_result::<bool>(&mut conn)?;

        Ok(exists)
    }

    fn count_clients(&self) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        let total: i64 = clients::table.count().get_result(&mut conn)?;

        Ok(total as usize)
    }

    fn list_clients(&self, page: PageRequest) -> RepositoryResult<Page<Client>> {
        let mut conn = self.conn()?;
        load_page(&mut conn, &ClientFilter::All, &page)
    }

    fn find_clients_by_income(
        &self,
        min_income: f64,
        page: PageRequest,
    ) -> RepositoryResult<Page<Client>> {
        debug!("Searching clients with income >= {min_income}, page {page:?}");
        let mut conn = self.conn()?;
        load_page(&mut conn, &ClientFilter::MinIncome(min_income), &page)
    }

    fn find_clients_by_name(
        &self,
        name_part: &str,
        page: PageRequest,
    ) -> RepositoryResult<Page<Client>> {
        debug!("Searching clients with name containing {name_part:?}, page {page:?}");
        let mut conn = self.conn()?;
        load_page(&mut conn, &ClientFilter::name_contains(name_part), &page)
    }

    fn find_clients_by_year(
        &self,
        min_birth_date: DateTime<Utc>,
        page: PageRequest,
    ) -> RepositoryResult<Page<Client>> {
        debug!("Searching clients born at or after {min_birth_date}, page {page:?}");
        let mut conn = self.conn()?;
        load_page(
            &mut conn,
            &ClientFilter::BornSince(epoch_micros_not_before(min_birth_date)),
            &page,
        )
    }
}

impl ClientWriter for DieselRepository {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client> {
        let mut conn = self.conn()?;
        let insertable: DbNewClient = new_client.into();

        let created = diesel::insert_into(clients::table)
            .values(&insertable)
            .get_result::<DbClient>(&mut conn)?;

        debug!("Created client {}", created.id);
        Ok(created.try_into()?)
    }

    fn update_client(&self, client_id: ClientId, updates: &NewClient) -> RepositoryResult<Client> {
        let mut conn = self.conn()?;
        let db_updates: DbNewClient = updates.into();

        let updated = diesel::update(clients::table.find(client_id.get()))
            .set(&db_updates)
            .get_result::<DbClient>(&mut conn)?;

        debug!("Updated client {client_id}");
        Ok(updated.try_into()?)
    }

    fn delete_client(&self, client_id: ClientId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(clients::table.find(client_id.get())).execute(&mut conn)?;
        if affected == 0 {
            debug!("No client {client_id} to delete");
            return Err(RepositoryError::NotFound);
        }

        debug!("Deleted client {client_id}");
        Ok(())
    }
}
