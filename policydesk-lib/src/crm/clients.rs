//! Client directory.

use crate::error::SourceError;
use crate::model::EntityKind;
use crate::model::Record;
use crate::notify::Notifier;
use crate::report::Messages;
use crate::report::Mutation;
use crate::report::Reporter;
use crate::store::RecordSource;
use crate::view::Column;
use crate::view::ColumnKind;
use crate::view::filter;

/// Fields matched by the client search box.
pub const CLIENT_SEARCH_FIELDS: [&str; 3] = ["name", "email", "phone"];

/// Column schema for the client table.
pub fn client_columns() -> Vec<Column> {
    vec![
        Column::new("name", "Name"),
        Column::new("email", "Email"),
        Column::new("phone", "Phone"),
        Column::new("occupation", "Occupation"),
        Column::new("createdAt", "Added").kind(ColumnKind::Date),
    ]
}

/// Clients matching the search term.
pub fn search_clients(clients: &[Record], term: &str) -> Vec<Record> {
    filter::search(clients, term, &CLIENT_SEARCH_FIELDS)
}

/// Adds a client; the source stamps `createdAt`.
pub async fn add_client<S, N>(
    reporter: &Reporter<S, N>,
    client: Record,
) -> Result<Record, SourceError>
where
    S: RecordSource,
    N: Notifier,
{
    let messages =
        Messages::on_failure("Failed to add client").with_success("Client added successfully");
    let created = reporter
        .mutate(Mutation::create(EntityKind::Client, client), &messages)
        .await?;
    created.ok_or_else(|| SourceError::rejected(EntityKind::Client, "no record returned"))
}

/// Deletes a client.
pub async fn delete_client<S, N>(reporter: &Reporter<S, N>, id: u64) -> Result<(), SourceError>
where
    S: RecordSource,
    N: Notifier,
{
    let messages =
        Messages::on_failure("Failed to delete client").with_success("Client deleted successfully");
    reporter.delete(EntityKind::Client, id, &messages).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::MemoryNotifier;
    use crate::notify::Toast;
    use crate::store::InMemoryStore;
    use crate::view::PageState;
    use crate::view::SortState;
    use crate::view::render;

    #[test]
    fn test_search_by_phone() {
        let clients = vec![
            Record::with_id(1)
                .set("name", "John Smith")
                .set("email", "john@example.com")
                .set("phone", "(555) 123-4567"),
            Record::with_id(2)
                .set("name", "Sarah Johnson")
                .set("email", "sarah@example.com")
                .set("phone", "(555) 987-6543"),
        ];
        let found = search_clients(&clients, "987");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), Some(2));
        assert_eq!(search_clients(&clients, "").len(), 2);
    }

    #[tokio::test]
    async fn test_added_client_renders_creation_date() {
        let reporter = Reporter::new(InMemoryStore::new(), MemoryNotifier::new());
        let client = add_client(
            &reporter,
            Record::new().set("name", "Ada Lovelace").set("email", "ada@example.com"),
        )
        .await
        .unwrap();
        assert_eq!(client.id(), Some(1));
        assert!(client.get_date("createdAt").unwrap().is_some());

        let clients = reporter.load(EntityKind::Client).await.unwrap();
        let columns = client_columns();
        let view =
            render(&clients, &columns, &SortState::asc("name"), &PageState::default()).unwrap();
        assert_eq!(view.rows.len(), 1);
        assert!(!view.rows[0].cells[4].is_empty());

        delete_client(&reporter, 1).await.unwrap();
        assert_eq!(
            reporter.notifier().toasts(),
            vec![
                Toast::success("Client added successfully"),
                Toast::success("Client deleted successfully"),
            ]
        );
    }
}
