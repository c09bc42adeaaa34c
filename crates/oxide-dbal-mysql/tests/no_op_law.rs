//! Property tests: comparing a table with itself compiles to nothing, and
//! compiling is deterministic.

mod common;

use common::platform;
use oxide_dbal_core::diff_table;
use oxide_dbal_core::prelude::*;
use proptest::prelude::*;

fn column_type() -> impl Strategy<Value = ColumnType> {
    prop::sample::select(ColumnType::ALL.to_vec())
}

/// Column specs: type, nullable, comment.
fn columns() -> impl Strategy<Value = Vec<(ColumnType, bool, Option<String>)>> {
    prop::collection::vec(
        (
            column_type(),
            any::<bool>(),
            prop::option::of("[a-z ]{0,12}"),
        ),
        1..8,
    )
}

fn build_table(
    name: &str,
    specs: &[(ColumnType, bool, Option<String>)],
    primary_key: bool,
    index_on_last: bool,
) -> Table {
    let mut table = Table::new(name);
    for (position, (column_type, nullable, comment)) in specs.iter().enumerate() {
        table
            .add_column(&format!("col_{position}"), *column_type)
            .unwrap()
            .set_not_null(!nullable)
            .set_comment(comment.as_deref());
    }
    if primary_key {
        table.set_primary_key(&["col_0"]).unwrap();
    }
    if index_on_last && specs.len() > 1 {
        let last = format!("col_{}", specs.len() - 1);
        table.add_index(&[last.as_str()], None).unwrap();
    }
    table
}

proptest! {
    #[test]
    fn comparing_a_table_with_itself_compiles_to_nothing(
        name in "[a-z][a-z_]{0,15}",
        specs in columns(),
        primary_key in any::<bool>(),
        index_on_last in any::<bool>(),
    ) {
        let table = build_table(&name, &specs, primary_key, index_on_last);
        let diff = diff_table(&table, &table.clone());

        prop_assert!(diff.is_empty(), "{diff:?}");
        prop_assert!(platform().alter_table_sql(&diff).unwrap().is_empty());
    }

    #[test]
    fn compiling_twice_gives_the_same_statements(
        specs in columns(),
        extra in column_type(),
        primary_key in any::<bool>(),
    ) {
        let from = build_table("subject", &specs, primary_key, true);
        let mut to = from.clone();
        to.add_column("extra", extra).unwrap().set_not_null(false);
        let diff = diff_table(&from, &to);

        let first = platform().alter_table_sql(&diff).unwrap();
        let second = platform().alter_table_sql(&diff).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.len(), 1);
    }
}
