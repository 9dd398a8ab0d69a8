use std::collections::BTreeSet;

use super::model::{Record, Table};

// ---------------------------------------------------------------------------
// Filter predicate: which payment modes and names are selected
// ---------------------------------------------------------------------------

/// Selected values for the two filter dimensions.
/// An empty set selects nothing (it is not "show all").
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSelection {
    pub payment_modes: BTreeSet<String>,
    pub names: BTreeSet<String>,
}

impl FilterSelection {
    pub fn new<M, N>(payment_modes: M, names: N) -> Self
    where
        M: IntoIterator,
        M::Item: Into<String>,
        N: IntoIterator,
        N::Item: Into<String>,
    {
        FilterSelection {
            payment_modes: payment_modes.into_iter().map(Into::into).collect(),
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Everything in `table` selected (the state after picking a month).
    pub fn all(table: &Table) -> Self {
        FilterSelection::new(table.payment_modes(), table.names())
    }

    /// A record passes when both its payment mode and its name are selected.
    pub fn matches(&self, record: &Record) -> bool {
        let mode_ok = record
            .payment_mode
            .as_ref()
            .is_some_and(|m| self.payment_modes.contains(m));
        let name_ok = record
            .name
            .as_ref()
            .is_some_and(|n| self.names.contains(n));
        mode_ok && name_ok
    }

    /// Flip one payment mode in or out of the selection.
    pub fn toggle_payment_mode(&mut self, mode: &str) {
        toggle(&mut self.payment_modes, mode);
    }

    /// Flip one name in or out of the selection.
    pub fn toggle_name(&mut self, name: &str) {
        toggle(&mut self.names, name);
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}

/// Keep the records passing `selection`, in their original order.
pub fn filter_table(table: &Table, selection: &FilterSelection) -> Table {
    Table::new(
        table
            .records
            .iter()
            .filter(|r| selection.matches(r))
            .cloned()
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Amount;

    fn table() -> Table {
        Table::new(vec![
            Record::new("Food", "Cash", 50.0),
            Record::new("Food", "Card", 30.0),
            Record::new("Rent", "UPI", 900.0),
            Record::new("Total Amount", "Cash", 80.0),
            Record {
                name: None,
                payment_mode: Some("Cash".into()),
                amount: Amount::Missing,
            },
        ])
    }

    #[test]
    fn test_filter_is_logical_and() {
        let sel = FilterSelection::new(["Cash"], ["Food", "Rent"]);
        let out = filter_table(&table(), &sel);
        assert_eq!(out.records, vec![Record::new("Food", "Cash", 50.0)]);
    }

    #[test]
    fn test_filter_is_exact() {
        let input = table();
        let sel = FilterSelection::new(["Cash", "UPI"], ["Food", "Rent", "Total Amount"]);
        let out = filter_table(&input, &sel);

        assert!(out.records.iter().all(|r| sel.matches(r)));
        let expected: Vec<_> = input.records.iter().filter(|r| sel.matches(r)).collect();
        assert_eq!(out.records.iter().collect::<Vec<_>>(), expected);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_empty_selection_yields_empty_table() {
        let names_only = FilterSelection::new(Vec::<String>::new(), ["Food"]);
        assert!(filter_table(&table(), &names_only).is_empty());
        assert!(filter_table(&table(), &FilterSelection::default()).is_empty());
    }

    #[test]
    fn test_all_keeps_every_labelled_record_in_order() {
        let t = table();
        let out = filter_table(&t, &FilterSelection::all(&t));
        assert_eq!(out.records, t.records[..4].to_vec());
    }

    #[test]
    fn test_toggle() {
        let mut sel = FilterSelection::new(["Cash"], ["Food"]);
        sel.toggle_payment_mode("Cash");
        sel.toggle_name("Rent");
        assert!(sel.payment_modes.is_empty());
        assert_eq!(sel.names.len(), 2);
    }
}
