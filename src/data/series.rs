use serde::Serialize;

use super::model::{Amount, Table};

/// Summary row mixed into the source sheets.
pub const SENTINEL_NAME: &str = "Total Amount";

/// One plotted point: an expense name and its (possibly missing) amount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub category: String,
    pub value: Amount,
}

/// Flattened (category, value) pairs that drive a chart.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Series {
    pub points: Vec<SeriesPoint>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sum of the present values.
    pub fn total(&self) -> f64 {
        self.points.iter().filter_map(|p| p.value.value()).sum()
    }
}

/// Explode a table into one point per record, grouped by name.
///
/// Groups appear in first-seen order and keep their row order; records
/// with the same name are not summed. Records without a name are skipped.
pub fn flatten(table: &Table, exclude_sentinel: bool) -> Series {
    let mut groups: Vec<(&str, Vec<Amount>)> = Vec::new();

    for record in &table.records {
        let Some(name) = record.name.as_deref() else {
            continue;
        };
        if exclude_sentinel && name == SENTINEL_NAME {
            continue;
        }
        match groups.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => values.push(record.amount),
            None => groups.push((name, vec![record.amount])),
        }
    }

    let points = groups
        .into_iter()
        .flat_map(|(name, values)| {
            values.into_iter().map(move |value| SeriesPoint {
                category: name.to_string(),
                value,
            })
        })
        .collect();

    Series { points }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn pairs(series: &Series) -> Vec<(&str, Option<f64>)> {
        series
            .points
            .iter()
            .map(|p| (p.category.as_str(), p.value.value()))
            .collect()
    }

    #[test]
    fn test_groups_by_first_seen_name() {
        let table = Table::new(vec![
            Record::new("Food", "Cash", 50.0),
            Record::new("Rent", "UPI", 900.0),
            Record::new("Food", "Card", 30.0),
        ]);
        let series = flatten(&table, false);
        assert_eq!(
            pairs(&series),
            vec![("Food", Some(50.0)), ("Food", Some(30.0)), ("Rent", Some(900.0))]
        );
    }

    #[test]
    fn test_sentinel_exclusion() {
        let table = Table::new(vec![
            Record::new("Food", "Cash", 50.0),
            Record::new("Total Amount", "Cash", 50.0),
        ]);
        assert!(flatten(&table, true)
            .points
            .iter()
            .all(|p| p.category != SENTINEL_NAME));
        assert_eq!(flatten(&table, false).len(), 2);
    }

    #[test]
    fn test_missing_amount_still_emitted() {
        let table = Table::new(vec![
            Record::new("Food", "Cash", Amount::Missing),
            Record::new("Food", "Cash", 10.0),
        ]);
        let series = flatten(&table, true);
        assert_eq!(pairs(&series), vec![("Food", None), ("Food", Some(10.0))]);
        assert_eq!(series.total(), 10.0);
    }

    #[test]
    fn test_reordered_table_same_multiset() {
        let a = Table::new(vec![
            Record::new("Food", "Cash", 1.0),
            Record::new("Rent", "UPI", 2.0),
            Record::new("Food", "Card", 3.0),
        ]);
        let b = Table::new(vec![
            Record::new("Rent", "UPI", 2.0),
            Record::new("Food", "Cash", 1.0),
            Record::new("Food", "Card", 3.0),
        ]);
        let (sa, sb) = (flatten(&a, false), flatten(&b, false));
        assert_ne!(sa, sb);

        let mut pa = pairs(&sa);
        let mut pb = pairs(&sb);
        pa.sort_by(|x, y| x.partial_cmp(y).unwrap());
        pb.sort_by(|x, y| x.partial_cmp(y).unwrap());
        assert_eq!(pa, pb);

        // Within the "Food" group the row order survives.
        let food: Vec<_> = pairs(&sb).into_iter().filter(|p| p.0 == "Food").collect();
        assert_eq!(food, vec![("Food", Some(1.0)), ("Food", Some(3.0))]);
    }

    #[test]
    fn test_empty_table() {
        assert!(flatten(&Table::default(), true).is_empty());
    }
}
