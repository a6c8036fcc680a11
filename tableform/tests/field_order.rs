//! Property tests for field ordering and filtering

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;
use tableform::prelude::*;

fn column_for(index: usize, kind: u8) -> Column {
    let name = format!("col_{index}");
    match kind % 6 {
        0 => Column::integer(name),
        1 => Column::varchar(name),
        2 => Column::text(name),
        3 => Column::boolean(name),
        4 => Column::new(name, ColumnType::Jsonb),
        _ => Column::date(name),
    }
}

fn table_from(kinds: &[u8]) -> Table {
    kinds
        .iter()
        .enumerate()
        .fold(Table::new("Generated"), |table, (i, kind)| {
            table.column(column_for(i, *kind))
        })
}

proptest! {
    #[test]
    fn fields_follow_column_order(
        kinds in prop::collection::vec(any::<u8>(), 0..24),
        picks in prop::collection::vec(any::<bool>(), 24),
    ) {
        let table = table_from(&kinds);
        let names: Vec<String> = table.column_names().into_iter().map(String::from).collect();
        let chosen: HashSet<String> = names
            .iter()
            .zip(&picks)
            .filter(|(_, keep)| **keep)
            .map(|(name, _)| name.clone())
            .collect();

        let converter = TableConverter::default().warn_unmapped(false);
        let filter = if chosen.is_empty() {
            FieldFilter::all()
        } else {
            FieldFilter::only(chosen.iter().cloned())
        };
        let fields = table_fields(&table, &filter, &HashMap::new(), Some(&converter as &dyn Converter));

        let expected: Vec<&String> = names
            .iter()
            .zip(&kinds)
            .filter(|(name, _)| chosen.is_empty() || chosen.contains(*name))
            .filter(|(_, kind)| *kind % 6 != 4)
            .map(|(name, _)| name)
            .collect();
        prop_assert_eq!(fields.keys().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn exclude_removes_exactly_named_columns(
        kinds in prop::collection::vec(0_u8..4, 1..16),
        drop in prop::collection::vec(any::<bool>(), 16),
    ) {
        let table = table_from(&kinds);
        let excluded: Vec<String> = table
            .column_names()
            .into_iter()
            .zip(&drop)
            .filter(|(_, d)| **d)
            .map(|(name, _)| name.to_string())
            .collect();

        let form_class = TableFormBuilder::new(&table).exclude(excluded.clone()).build();
        prop_assert_eq!(form_class.len(), kinds.len() - excluded.len());
        for name in &excluded {
            prop_assert!(form_class.field(name).is_none());
        }
    }
}
