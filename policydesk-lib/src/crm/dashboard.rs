//! Dashboard: metric cards, recent activity and upcoming tasks.

use chrono::NaiveDate;
use futures::try_join;
use rust_decimal::Decimal;

use super::metrics::Metric;
use super::metrics::MetricFormat;
use super::pipeline::Pipeline;
use super::policies::PolicySummary;
use crate::error::SourceError;
use crate::model::EntityKind;
use crate::model::Record;
use crate::notify::Notifier;
use crate::report::Reporter;
use crate::store::RecordSource;
use crate::view::Column;
use crate::view::ColumnKind;
use crate::view::Direction;
use crate::view::ViewConfig;
use crate::view::sort_rows;

/// Toast shown when any part of the dashboard fails to load.
pub const DASHBOARD_LOAD_FAILURE: &str = "Failed to load dashboard data. Please try again.";

/// Rows shown in each dashboard table.
pub const DASHBOARD_ROW_LIMIT: usize = 5;

/// Column schema for the recent activity table.
pub fn activity_columns() -> Vec<Column> {
    vec![
        Column::new("type", "Type").not_sortable(),
        Column::new("description", "Description"),
        Column::new("clientName", "Client"),
        Column::new("timestamp", "Time").kind(ColumnKind::Date),
    ]
}

/// Column schema for the upcoming task table.
pub fn upcoming_task_columns() -> Vec<Column> {
    vec![
        Column::new("title", "Task"),
        Column::new("priority", "Priority").kind(ColumnKind::Status),
        Column::new("dueDate", "Due Date").kind(ColumnKind::Date),
        Column::new("relatedTo", "Related To"),
    ]
}

/// Both dashboard tables show every row unsorted and unpaged.
pub fn dashboard_view_config() -> ViewConfig {
    ViewConfig::default()
        .with_pagination(false)
        .with_sorting(false)
}

/// Everything the dashboard shows.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub metrics: Vec<Metric>,
    /// Newest first.
    pub recent_activities: Vec<Record>,
    /// Open tasks, soonest due first.
    pub upcoming_tasks: Vec<Record>,
}

impl Dashboard {
    /// Builds the dashboard from already-loaded collections.
    pub fn from_records(
        clients: &[Record],
        policies: &[Record],
        leads: &[Record],
        activities: &[Record],
        tasks: &[Record],
        today: NaiveDate,
    ) -> Self {
        let recent_activities = sort_rows(activities, "timestamp", Direction::Desc)
            .into_iter()
            .take(DASHBOARD_ROW_LIMIT)
            .cloned()
            .collect();

        let open: Vec<Record> = tasks
            .iter()
            .filter(|task| !task.get_bool("completed").ok().flatten().unwrap_or(false))
            .cloned()
            .collect();
        let upcoming_tasks = sort_rows(&open, "dueDate", Direction::Asc)
            .into_iter()
            .take(DASHBOARD_ROW_LIMIT)
            .cloned()
            .collect();

        Self {
            metrics: dashboard_metrics(clients, policies, leads, today),
            recent_activities,
            upcoming_tasks,
        }
    }
}

/// Metric cards derived from the current records.
pub fn dashboard_metrics(
    clients: &[Record],
    policies: &[Record],
    leads: &[Record],
    today: NaiveDate,
) -> Vec<Metric> {
    let summary = PolicySummary::from_records(policies, today);
    let pipeline = Pipeline::from_leads(leads);

    vec![
        Metric::new("Total Clients", Decimal::from(clients.len()), MetricFormat::Number),
        Metric::new(
            "Active Policies",
            Decimal::from(summary.active + summary.pending),
            MetricFormat::Number,
        ),
        Metric::new("Pipeline Value", pipeline.total_value().value(), MetricFormat::Currency),
        Metric::new(
            "Conversion Rate",
            Decimal::from(pipeline.conversion_rate()),
            MetricFormat::Percentage,
        ),
    ]
}

/// Loads every collection the dashboard needs, concurrently.
///
/// Any failure aborts the whole load and is reported with a single toast.
pub async fn load_dashboard<S, N>(
    reporter: &Reporter<S, N>,
    today: NaiveDate,
) -> Result<Dashboard, SourceError>
where
    S: RecordSource,
    N: Notifier,
{
    let loaded = try_join!(
        reporter.fetch(EntityKind::Client),
        reporter.fetch(EntityKind::Policy),
        reporter.fetch(EntityKind::Lead),
        reporter.fetch(EntityKind::Activity),
        reporter.fetch(EntityKind::Task),
    );

    match loaded {
        Ok((clients, policies, leads, activities, tasks)) => Ok(Dashboard::from_records(
            &clients,
            &policies,
            &leads,
            &activities,
            &tasks,
            today,
        )),
        Err(e) => {
            reporter.report_failure(DASHBOARD_LOAD_FAILURE);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::MemoryNotifier;
    use crate::notify::Toast;
    use crate::report::RetryConfig;
    use crate::store::InMemoryStore;
    use crate::view::TableView;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 12).unwrap()
    }

    fn task(id: u64, title: &str, due: &str, completed: bool) -> Record {
        Record::with_id(id)
            .set("title", title)
            .set("dueDate", due)
            .set("completed", completed)
    }

    fn store() -> InMemoryStore {
        let store = InMemoryStore::new();
        store.seed(
            EntityKind::Client,
            vec![
                Record::with_id(1).set("name", "John Smith"),
                Record::with_id(2).set("name", "Sarah Johnson"),
            ],
        );
        store.seed(
            EntityKind::Policy,
            vec![
                Record::with_id(1).set("premium", 1200).set("renewalDate", "2024-12-01"),
                Record::with_id(2).set("premium", 800).set("renewalDate", "2024-01-01"),
            ],
        );
        store.seed(
            EntityKind::Lead,
            vec![
                Record::with_id(1).set("stage", "closed").set("value", 4000),
                Record::with_id(2).set("stage", "quoted").set("value", 1500.5),
            ],
        );
        store.seed(
            EntityKind::Activity,
            (1..=7)
                .map(|day| {
                    Record::with_id(day)
                        .set("type", "call")
                        .set("description", format!("Call #{day}"))
                        .set("clientName", "John Smith")
                        .set("timestamp", format!("2024-06-{day:02}T09:00:00Z"))
                })
                .collect(),
        );
        store.seed(
            EntityKind::Task,
            vec![
                task(1, "Later", "2024-06-30", false),
                task(2, "Done", "2024-06-01", true),
                task(3, "Soon", "2024-06-14", false),
            ],
        );
        store
    }

    #[tokio::test]
    async fn test_load_dashboard() {
        let reporter = Reporter::new(store(), MemoryNotifier::new());
        let dashboard = load_dashboard(&reporter, today()).await.unwrap();

        let shown: Vec<String> = dashboard.metrics.iter().map(Metric::formatted_value).collect();
        assert_eq!(shown, vec!["2", "1", "$5,500.50", "50%"]);

        let ids = |rows: &[Record]| rows.iter().filter_map(Record::id).collect::<Vec<_>>();
        assert_eq!(ids(&dashboard.recent_activities), vec![7, 6, 5, 4, 3]);
        assert_eq!(ids(&dashboard.upcoming_tasks), vec![3, 1]);
        assert!(reporter.notifier().toasts().is_empty());
    }

    #[tokio::test]
    async fn test_failure_reported_once() {
        let reporter = Reporter::new(FailingActivities(store()), MemoryNotifier::new())
            .with_retry(RetryConfig::no_retry());

        assert!(load_dashboard(&reporter, today()).await.is_err());
        assert_eq!(reporter.notifier().toasts(), vec![Toast::error(DASHBOARD_LOAD_FAILURE)]);
    }

    #[test]
    fn test_tables_are_unsorted_and_unpaged() {
        let mut table = TableView::new(activity_columns(), dashboard_view_config()).unwrap();
        assert_eq!(table.toggle_sort("description"), Ok(false));
        assert_eq!(table.toggle_sort("type"), Ok(false));

        table.set_rows((1..=12).map(Record::with_id).collect());
        let view = table.render().unwrap();
        assert_eq!(view.rows.len(), 12);
        assert_eq!(view.total_pages, 1);

        let columns = upcoming_task_columns();
        assert_eq!(columns[1].kind, ColumnKind::Status);
        assert_eq!(columns[2].kind, ColumnKind::Date);
    }

    struct FailingActivities(InMemoryStore);

    #[async_trait::async_trait]
    impl RecordSource for FailingActivities {
        async fn list(&self, kind: EntityKind) -> Result<Vec<Record>, SourceError> {
            match kind {
                EntityKind::Activity => Err(SourceError::unavailable(kind, "timeout")),
                _ => self.0.list(kind).await,
            }
        }

        async fn get(&self, kind: EntityKind, id: u64) -> Result<Record, SourceError> {
            self.0.get(kind, id).await
        }

        async fn create(&self, kind: EntityKind, record: Record) -> Result<Record, SourceError> {
            self.0.create(kind, record).await
        }

        async fn update(
            &self,
            kind: EntityKind,
            id: u64,
            patch: Record,
        ) -> Result<Record, SourceError> {
            self.0.update(kind, id, patch).await
        }

        async fn delete(&self, kind: EntityKind, id: u64) -> Result<(), SourceError> {
            self.0.delete(kind, id).await
        }
    }
}
