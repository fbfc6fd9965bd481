//! Grouping by Affected Component

use std::collections::HashMap;

use crate::alert::Alert;

/// Alerts keyed by component, borrowing from the scanned batch
pub type AlertGroups<'a> = HashMap<&'a str, Vec<&'a Alert>>;

/// Partition alerts by their `component`
///
/// Every alert lands in exactly one group; relative input order is kept
/// within each group.
pub fn group_by_component<'a, I>(alerts: I) -> AlertGroups<'a>
where
    I: IntoIterator<Item = &'a Alert>,
{
    let mut groups: AlertGroups<'a> = HashMap::new();
    for alert in alerts {
        groups.entry(alert.component.as_str()).or_default().push(alert);
    }
    groups
}
