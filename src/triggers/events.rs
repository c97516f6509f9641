//! Trigger event lookup table.
//!
//! Maps an Oracle Forms event name to what it does, what it becomes in a
//! Java/MBO implementation, and where that code lives on the target
//! platform. Unknown names get a generic, synthesized description.

/// Static description of a trigger event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventInfo {
    pub description: &'static str,
    pub java_use: &'static str,
    pub location: &'static str,
}

/// Owned event description, for known and synthesized events alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDescription {
    pub description: String,
    pub java_use: String,
    pub location: String,
}

impl From<&EventInfo> for EventDescription {
    fn from(info: &EventInfo) -> Self {
        Self {
            description: info.description.to_string(),
            java_use: info.java_use.to_string(),
            location: info.location.to_string(),
        }
    }
}

const fn info(description: &'static str, java_use: &'static str, location: &'static str) -> EventInfo {
    EventInfo {
        description,
        java_use,
        location,
    }
}

const MBO_INIT: &str = "Mbo.init()";
const MBO_SAVE: &str = "Mbo.save()";
const MBO_DELETE: &str = "Mbo.canDelete() / Mbo.delete()";
const FIELD_VALIDATE: &str = "MboValueAdapter.validate()";
const FIELD_ACTION: &str = "MboValueAdapter.action()";
const APP_BEAN: &str = "AppBean event method";
const MBOSET: &str = "MboSet.setWhere() / MboSet.reset()";

const LOC_MBO: &str = "MBO class";
const LOC_FIELD: &str = "Field validation class";
const LOC_BEAN: &str = "Application bean";
const LOC_MBOSET: &str = "MBO set class";
const LOC_UI: &str = "Application presentation (UI)";
const LOC_NONE: &str = "Not required (platform default)";

/// Known events, keyed by upper-case name.
pub const EVENTS: &[(&str, EventInfo)] = &[
    // Form lifecycle
    ("PRE-FORM", info("Runs before the form is displayed", MBO_INIT, LOC_BEAN)),
    ("POST-FORM", info("Runs when the form is exited", "AppBean cleanup", LOC_BEAN)),
    ("WHEN-NEW-FORM-INSTANCE", info("Initializes the form on first display", "AppBean.initializeApp()", LOC_BEAN)),
    ("WHEN-WINDOW-CLOSED", info("Handles closing of a window", "AppBean dialog close", LOC_BEAN)),
    ("WHEN-WINDOW-ACTIVATED", info("Runs when a window gains focus", APP_BEAN, LOC_UI)),
    ("WHEN-TIMER-EXPIRED", info("Runs when a programmatic timer fires", "Cron task", "Cron task instance")),
    ("WHEN-TAB-PAGE-CHANGED", info("Runs when the user switches tab pages", APP_BEAN, LOC_UI)),
    // Navigation
    ("WHEN-NEW-BLOCK-INSTANCE", info("Runs when focus enters a block", APP_BEAN, LOC_BEAN)),
    ("WHEN-NEW-RECORD-INSTANCE", info("Runs when focus enters a record", MBO_INIT, LOC_MBO)),
    ("WHEN-NEW-ITEM-INSTANCE", info("Runs when focus enters an item", FIELD_ACTION, LOC_FIELD)),
    ("PRE-BLOCK", info("Runs before navigating into a block", APP_BEAN, LOC_BEAN)),
    ("POST-BLOCK", info("Runs after navigating out of a block", APP_BEAN, LOC_BEAN)),
    ("PRE-RECORD", info("Runs before navigating into a record", MBO_INIT, LOC_MBO)),
    ("POST-RECORD", info("Runs after navigating out of a record", MBO_SAVE, LOC_MBO)),
    ("PRE-TEXT-ITEM", info("Runs before navigating into a text item", FIELD_ACTION, LOC_FIELD)),
    ("POST-TEXT-ITEM", info("Runs after navigating out of a text item", FIELD_ACTION, LOC_FIELD)),
    // Validation and item events
    ("WHEN-VALIDATE-ITEM", info("Validates an item value after change", FIELD_VALIDATE, LOC_FIELD)),
    ("WHEN-VALIDATE-RECORD", info("Validates a record before it is left", MBO_SAVE, LOC_MBO)),
    ("POST-CHANGE", info("Runs when an item value changes (legacy)", FIELD_ACTION, LOC_FIELD)),
    ("WHEN-BUTTON-PRESSED", info("Handles a push button click", APP_BEAN, LOC_BEAN)),
    ("WHEN-CHECKBOX-CHANGED", info("Runs when a check box is toggled", FIELD_ACTION, LOC_FIELD)),
    ("WHEN-LIST-CHANGED", info("Runs when a list selection changes", FIELD_ACTION, LOC_FIELD)),
    ("WHEN-RADIO-CHANGED", info("Runs when a radio selection changes", FIELD_ACTION, LOC_FIELD)),
    ("WHEN-MOUSE-CLICK", info("Runs on a mouse click", APP_BEAN, LOC_UI)),
    ("WHEN-MOUSE-DOUBLECLICK", info("Runs on a mouse double click", APP_BEAN, LOC_UI)),
    // Query
    ("PRE-QUERY", info("Adjusts query criteria before a query runs", MBOSET, LOC_MBOSET)),
    ("POST-QUERY", info("Populates non-base items after each fetched row", MBO_INIT, LOC_MBO)),
    ("ON-POPULATE-DETAILS", info("Queries detail blocks for the current master", "Mbo.getMboSet() relationship", "Database relationship")),
    ("ON-CLEAR-DETAILS", info("Clears detail blocks when the master changes", "Relationship reset", "Database relationship")),
    // Transactions
    ("PRE-INSERT", info("Runs before a new row is inserted", "Mbo.add()", LOC_MBO)),
    ("POST-INSERT", info("Runs after a new row is inserted", MBO_SAVE, LOC_MBO)),
    ("PRE-UPDATE", info("Runs before a row is updated", MBO_SAVE, LOC_MBO)),
    ("POST-UPDATE", info("Runs after a row is updated", MBO_SAVE, LOC_MBO)),
    ("PRE-DELETE", info("Runs before a row is deleted", MBO_DELETE, LOC_MBO)),
    ("POST-DELETE", info("Runs after a row is deleted", MBO_DELETE, LOC_MBO)),
    ("PRE-COMMIT", info("Runs before the transaction is committed", "MboSet.save()", LOC_MBOSET)),
    ("POST-COMMIT", info("Runs after the transaction is committed", "MboSet.commit()", LOC_MBOSET)),
    ("POST-FORMS-COMMIT", info("Runs after changes are posted, before commit", "MboSet.save()", LOC_MBOSET)),
    ("ON-CHECK-DELETE-MASTER", info("Blocks master deletion while details exist", MBO_DELETE, LOC_MBO)),
    ("ON-LOCK", info("Overrides default row locking", LOC_NONE, LOC_NONE)),
    ("ON-ERROR", info("Replaces default error handling", "MXException handling", LOC_MBO)),
    ("ON-MESSAGE", info("Replaces default informative messages", "Message bundle", "Message table")),
    // Keys
    ("KEY-COMMIT", info("Save key", "AppBean.SAVE()", LOC_BEAN)),
    ("KEY-EXIT", info("Exit key", "AppBean cleanup", LOC_BEAN)),
    ("KEY-EXEQRY", info("Execute query key", "AppBean.SEARCH()", LOC_BEAN)),
    ("KEY-ENTQRY", info("Enter query key", "AppBean.SEARCH()", LOC_BEAN)),
    ("KEY-NEXT-ITEM", info("Next item key", APP_BEAN, LOC_UI)),
    ("KEY-LISTVAL", info("List of values key", "Lookup dialog", LOC_UI)),
    ("KEY-DELREC", info("Delete record key", MBO_DELETE, LOC_BEAN)),
    ("KEY-CREREC", info("Insert record key", "MboSet.add()", LOC_BEAN)),
];

/// Look up a known event (case-insensitive exact match).
pub fn lookup_event(name: &str) -> Option<&'static EventInfo> {
    let name = name.trim();
    EVENTS
        .iter()
        .find(|(event, _)| event.eq_ignore_ascii_case(name))
        .map(|(_, info)| info)
}

/// Describe any event, synthesizing a generic entry for unknown names.
pub fn describe_event(name: &str) -> EventDescription {
    match lookup_event(name) {
        Some(info) => info.into(),
        None => EventDescription {
            description: format!("Custom trigger {}", name.trim()),
            java_use: "Custom Java implementation".to_string(),
            location: "Automation script".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("PRE-INSERT")]
    #[case("pre-insert")]
    #[case(" When-Validate-Item ")]
    #[case("KEY-COMMIT")]
    fn test_known_events(#[case] name: &str) {
        assert!(lookup_event(name).is_some());
    }

    #[test]
    fn test_unknown_event_is_synthesized() {
        let desc = describe_event("MY-CUSTOM-EVENT");
        assert!(lookup_event("MY-CUSTOM-EVENT").is_none());
        assert_eq!(desc.description, "Custom trigger MY-CUSTOM-EVENT");
        assert!(!desc.java_use.is_empty());
    }

    #[test]
    fn test_event_names_are_unique() {
        for (i, (a, _)) in EVENTS.iter().enumerate() {
            assert!(
                EVENTS[i + 1..].iter().all(|(b, _)| a != b),
                "duplicate event {a}"
            );
        }
    }
}
