//! Sales pipeline board.

use serde::Serialize;

use crate::error::SourceError;
use crate::model::EntityKind;
use crate::model::Record;
use crate::model::types::Money;
use crate::notify::Notifier;
use crate::report::Messages;
use crate::report::Reporter;
use crate::store::RecordSource;

/// A column of the pipeline board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Prospect,
    Quoted,
    Negotiating,
    Closed,
}

impl Stage {
    /// All stages, in board order.
    pub const ALL: [Stage; 4] = [Stage::Prospect, Stage::Quoted, Stage::Negotiating, Stage::Closed];

    /// Value stored in a lead's `stage` field.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Prospect => "prospect",
            Self::Quoted => "quoted",
            Self::Negotiating => "negotiating",
            Self::Closed => "closed",
        }
    }

    /// Column heading.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Prospect => "Prospects",
            Self::Quoted => "Quoted",
            Self::Negotiating => "Negotiating",
            Self::Closed => "Closed",
        }
    }

    /// Resolves a stored stage, ignoring case.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|stage| stage.id().eq_ignore_ascii_case(id.trim()))
    }

    /// Stages a lead in this stage can be moved to.
    pub fn others(self) -> impl Iterator<Item = Stage> {
        Self::ALL.into_iter().filter(move |stage| *stage != self)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

fn lead_value(lead: &Record) -> Money {
    lead.get_money("value").ok().flatten().unwrap_or_default()
}

fn lead_stage(lead: &Record) -> Option<Stage> {
    lead.get_string("stage").ok().flatten().and_then(Stage::from_id)
}

/// Leads in one stage.
#[derive(Debug, Clone, PartialEq)]
pub struct StageGroup {
    pub stage: Stage,
    pub leads: Vec<Record>,
    pub total_value: Money,
}

impl StageGroup {
    pub fn count(&self) -> usize {
        self.leads.len()
    }
}

/// Leads grouped into board columns.
///
/// # Example
///
/// ```
/// use policydesk_lib::crm::{Pipeline, Stage};
/// use policydesk_lib::model::Record;
///
/// let leads = vec![
///     Record::with_id(1).set("stage", "Prospect").set("value", 5000),
///     Record::with_id(2).set("stage", "closed").set("value", 12000),
/// ];
///
/// let pipeline = Pipeline::from_leads(&leads);
/// assert_eq!(pipeline.group(Stage::Prospect).count(), 1);
/// assert_eq!(pipeline.total_value().to_usd(), "$17,000.00");
/// assert_eq!(pipeline.conversion_rate(), 50);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    groups: [StageGroup; 4],
    lead_count: usize,
    total_value: Money,
}

impl Pipeline {
    /// Groups `leads` by their `stage` field.
    ///
    /// Leads in an unknown stage appear in no group but still count toward
    /// the overall totals.
    pub fn from_leads(leads: &[Record]) -> Self {
        let mut groups = Stage::ALL.map(|stage| StageGroup {
            stage,
            leads: Vec::new(),
            total_value: Money::default(),
        });

        for lead in leads {
            match lead_stage(lead) {
                Some(stage) => {
                    let group = &mut groups[stage as usize];
                    group.total_value = group.total_value.saturating_add(lead_value(lead));
                    group.leads.push(lead.clone());
                }
                None => log::debug!("lead {:?} has no known stage", lead.id()),
            }
        }

        Self {
            groups,
            lead_count: leads.len(),
            total_value: leads.iter().map(lead_value).sum(),
        }
    }

    /// Groups in board order.
    pub fn groups(&self) -> &[StageGroup] {
        &self.groups
    }

    pub fn group(&self, stage: Stage) -> &StageGroup {
        &self.groups[stage as usize]
    }

    pub fn lead_count(&self) -> usize {
        self.lead_count
    }

    /// Value of every lead on the board.
    pub fn total_value(&self) -> Money {
        self.total_value
    }

    /// Share of leads that are closed, as a whole percentage rounded half up.
    pub fn conversion_rate(&self) -> u32 {
        if self.lead_count == 0 {
            return 0;
        }
        let closed = self.group(Stage::Closed).count();
        ((closed * 200 + self.lead_count) / (self.lead_count * 2)) as u32
    }
}

/// Moves a lead to another stage.
pub async fn move_lead<S, N>(
    reporter: &Reporter<S, N>,
    id: u64,
    stage: Stage,
) -> Result<Record, SourceError>
where
    S: RecordSource,
    N: Notifier,
{
    let messages = Messages::on_failure("Failed to update lead stage")
        .with_success("Lead stage updated successfully");
    reporter
        .update(
            EntityKind::Lead,
            id,
            Record::new().set("stage", stage.id()),
            &messages,
        )
        .await
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::notify::MemoryNotifier;
    use crate::notify::Toast;
    use crate::store::InMemoryStore;

    fn leads() -> Vec<Record> {
        vec![
            Record::with_id(1).set("name", "Acme").set("stage", "prospect").set("value", 5000),
            Record::with_id(2).set("name", "Globex").set("stage", "Quoted").set("value", 7500.5),
            Record::with_id(3).set("name", "Initech").set("stage", "quoted").set("value", 2500),
            Record::with_id(4).set("name", "Umbrella").set("stage", "CLOSED").set("value", 10000),
            Record::with_id(5).set("name", "Hooli").set("stage", "lost").set("value", 1000),
        ]
    }

    #[test]
    fn test_groups_by_stage_ignoring_case() {
        let pipeline = Pipeline::from_leads(&leads());

        let counts: Vec<usize> = pipeline.groups().iter().map(StageGroup::count).collect();
        assert_eq!(counts, vec![1, 2, 0, 1]);
        assert_eq!(pipeline.group(Stage::Quoted).total_value.to_usd(), "$10,000.50");
        assert_eq!(pipeline.lead_count(), 5);
        assert_eq!(pipeline.total_value().to_usd(), "$26,000.50");
        assert_eq!(pipeline.conversion_rate(), 20);
    }

    #[test]
    fn test_values_beyond_decimal_range_saturate() {
        let leads = vec![
            Record::with_id(1).set("stage", "closed").set("value", 5e28),
            Record::with_id(2).set("stage", "closed").set("value", 5e28),
        ];

        let pipeline = Pipeline::from_leads(&leads);
        assert_eq!(pipeline.group(Stage::Closed).total_value, Money::new(Decimal::MAX));
        assert_eq!(pipeline.total_value(), Money::new(Decimal::MAX));
    }

    #[test]
    fn test_empty_pipeline() {
        let pipeline = Pipeline::from_leads(&[]);
        assert_eq!(pipeline.conversion_rate(), 0);
        assert_eq!(pipeline.total_value().to_usd(), "$0.00");
    }

    #[test]
    fn test_stage_lookup() {
        assert_eq!(Stage::from_id(" Negotiating "), Some(Stage::Negotiating));
        assert_eq!(Stage::from_id("won"), None);
        let others: Vec<Stage> = Stage::Quoted.others().collect();
        assert_eq!(others, vec![Stage::Prospect, Stage::Negotiating, Stage::Closed]);
    }

    #[tokio::test]
    async fn test_move_lead() {
        let store = InMemoryStore::new();
        store.seed(EntityKind::Lead, leads());
        let reporter = Reporter::new(store, MemoryNotifier::new());

        let lead = move_lead(&reporter, 1, Stage::Negotiating).await.unwrap();
        assert_eq!(lead.get_string("stage").unwrap(), Some("negotiating"));
        assert!(move_lead(&reporter, 42, Stage::Closed).await.is_err());

        assert_eq!(
            reporter.notifier().toasts(),
            vec![
                Toast::success("Lead stage updated successfully"),
                Toast::error("Failed to update lead stage"),
            ]
        );

        let leads = reporter.load(EntityKind::Lead).await.unwrap();
        let pipeline = Pipeline::from_leads(&leads);
        assert_eq!(pipeline.group(Stage::Negotiating).count(), 1);
    }
}
