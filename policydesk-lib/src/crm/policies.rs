//! Policy renewals.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::FieldError;
use crate::model::Record;
use crate::model::types::Money;
use crate::view::Cell;
use crate::view::Column;
use crate::view::ColumnKind;
use crate::view::filter;

/// Policies renewing within this many days are pending renewal.
pub const RENEWAL_WINDOW_DAYS: i64 = 30;

/// Fields matched by the policy search box.
pub const POLICY_SEARCH_FIELDS: [&str; 3] = ["policyNumber", "type", "provider"];

/// Where a policy stands relative to its renewal date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenewalStatus {
    Active,
    Pending,
    Expired,
}

impl RenewalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Expired => "expired",
        }
    }
}

impl std::fmt::Display for RenewalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renewal status of a policy renewing on `renewal`, as seen on `today`.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use policydesk_lib::crm::policies::{renewal_status, RenewalStatus};
///
/// let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let soon = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
/// assert_eq!(renewal_status(soon, today), RenewalStatus::Pending);
/// ```
pub fn renewal_status(renewal: NaiveDate, today: NaiveDate) -> RenewalStatus {
    let days = (renewal - today).num_days();
    if days < 0 {
        RenewalStatus::Expired
    } else if days <= RENEWAL_WINDOW_DAYS {
        RenewalStatus::Pending
    } else {
        RenewalStatus::Active
    }
}

/// Renewal status of a policy record, from its `renewalDate` field.
pub fn policy_renewal_status(
    policy: &Record,
    today: NaiveDate,
) -> Result<Option<RenewalStatus>, FieldError> {
    Ok(policy
        .get_date("renewalDate")?
        .map(|renewal| renewal_status(renewal, today)))
}

/// Column schema for the policies table.
///
/// The status column is derived from the renewal date rather than read from
/// the record.
pub fn policy_columns(today: NaiveDate) -> Vec<Column> {
    vec![
        Column::new("policyNumber", "Policy Number"),
        Column::new("type", "Type"),
        Column::new("provider", "Provider"),
        Column::new("premium", "Premium").kind(ColumnKind::Currency),
        Column::new("renewalDate", "Renewal Date").kind(ColumnKind::Date),
        Column::new("status", "Status")
            .kind(ColumnKind::Status)
            .render(move |_, policy| match policy_renewal_status(policy, today) {
                Ok(Some(status)) => Cell::status(status.as_str()),
                _ => Cell::Empty,
            }),
    ]
}

/// Applies the status filter (`"all"` keeps everything) and the search term.
pub fn filter_policies(policies: &[Record], term: &str, status: &str) -> Vec<Record> {
    filter::retain_where(policies, |policy| {
        (status.eq_ignore_ascii_case("all") || filter::field_matches(policy, "status", status))
            && filter::matches_search(policy, term, &POLICY_SEARCH_FIELDS)
    })
}

/// Summary figures shown above the policies table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PolicySummary {
    pub total: usize,
    pub active: usize,
    pub pending: usize,
    pub expired: usize,
    pub total_premiums: Money,
}

impl PolicySummary {
    /// Tallies `policies` as of `today`.
    ///
    /// Policies without a readable renewal date count toward the total only;
    /// unreadable premiums count as zero.
    pub fn from_records(policies: &[Record], today: NaiveDate) -> Self {
        let mut summary = Self {
            total: policies.len(),
            ..Self::default()
        };

        for policy in policies {
            match policy_renewal_status(policy, today) {
                Ok(Some(RenewalStatus::Active)) => summary.active += 1,
                Ok(Some(RenewalStatus::Pending)) => summary.pending += 1,
                Ok(Some(RenewalStatus::Expired)) => summary.expired += 1,
                Ok(None) => {}
                Err(e) => log::debug!("policy {:?}: {e}", policy.id()),
            }
            if let Ok(Some(premium)) = policy.get_money("premium") {
                summary.total_premiums = summary.total_premiums.saturating_add(premium);
            }
        }
        summary
    }

    /// Text for the renewal reminder banner, if any renewals are pending.
    pub fn renewal_notice(&self) -> Option<String> {
        match self.pending {
            0 => None,
            1 => Some(format!(
                "You have 1 policy requiring renewal within {RENEWAL_WINDOW_DAYS} days."
            )),
            n => Some(format!(
                "You have {n} policies requiring renewal within {RENEWAL_WINDOW_DAYS} days."
            )),
        }
    }
}
