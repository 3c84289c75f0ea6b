use std::fs;
use std::path::Path;

use ftab_core::{
    CellValue, FieldPattern, MatchMode, Normalizer, Seek, TableError, TableOptions, extract_table,
    open_table,
};
use ftab_ingest::IngestError;
use ftab_model::MemoryGrid;
use ftab_transform::{Choice, Integer, StringChoice};

fn write_csv(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn seeks_header_below_a_preamble() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "staff.csv",
        "Staff report,,\nGenerated 2024-01-31,,\nFirst Name,Last Name,Age\nRose,Tyler,19\nAmy,Pond,\n",
    );
    let options = TableOptions::new()
        .name("staff")
        .field(FieldPattern::new("first_name").alias("First Name"))
        .field(FieldPattern::new("last_name").alias("Last Name"))
        .field(FieldPattern::new("age").normalizer(Normalizer::new(Integer::default())))
        .case_sensitive(false)
        .header_row_seek(Seek::Default);

    let table = open_table(&path, None, &options).unwrap();

    assert_eq!(table.sheet().header_row, 3);
    assert_eq!(table.sheet().path.as_deref(), Some(path.as_path()));
    assert_eq!(table.sheet().sheet_name, None);
    assert_eq!(
        table.keys().collect::<Vec<_>>(),
        vec!["first_name", "last_name", "age", "row"]
    );
    assert_eq!(
        table.get("age").unwrap(),
        &[CellValue::Int(19), CellValue::Empty]
    );
    insta::assert_json_snapshot!(table.records(), @r#"
    [
      {
        "first_name": "Rose",
        "last_name": "Tyler",
        "age": 19,
        "row": 4
      },
      {
        "first_name": "Amy",
        "last_name": "Pond",
        "age": null,
        "row": 5
      }
    ]
    "#);
}

#[test]
fn blank_csv_lines_count_as_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "people.csv",
        "\n\n\nfirst_name,last_name\nRose,Tyler\n",
    );
    let seeking = TableOptions::new()
        .fields(["first_name", "last_name"])
        .header_row_seek(Seek::Default);
    let fixed = TableOptions::new()
        .fields(["first_name", "last_name"])
        .header_row(4);

    for options in [seeking, fixed] {
        let table = open_table(&path, None, &options).unwrap();
        assert_eq!(table.sheet().header_row, 4);
        assert_eq!(table.sheet().row_count, 5);
        assert_eq!(table.get("last_name").unwrap(), &[CellValue::text("Tyler")]);
        assert_eq!(table.get("row").unwrap(), &[CellValue::Int(5)]);
    }
}

#[test]
fn no_fields_binds_every_header_column() {
    let grid = MemoryGrid::from_text([
        vec!["id", "", "status"],
        vec!["1", "x", "open"],
        vec!["2", "y", "closed"],
    ]);
    let table = extract_table(&grid, &TableOptions::new().include_row_num(false)).unwrap();

    assert_eq!(table.keys().collect::<Vec<_>>(), vec!["id", "status"]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.records().len(), 2);
    let second = table.records().get(1).unwrap();
    assert_eq!(second.get("status"), Some(&CellValue::text("closed")));
    assert!(second.get("row").is_none());
}

#[test]
fn row_column_can_be_toggled_after_extraction() {
    let grid = MemoryGrid::from_text([vec!["id"], vec!["7"]]);
    let mut table = extract_table(&grid, &TableOptions::new()).unwrap();
    assert!(table.contains_key("row"));

    table.set_include_row_num(false);
    assert!(!table.contains_key("row"));
    assert_eq!(table.values().count(), 1);
}

#[test]
fn field_named_row_shadows_row_numbers() {
    let grid = MemoryGrid::from_text([vec!["row", "value"], vec!["a", "1"]]);
    let table = extract_table(&grid, &TableOptions::new()).unwrap();

    assert_eq!(table.keys().collect::<Vec<_>>(), vec!["row", "value"]);
    assert_eq!(table.get("row").unwrap(), &[CellValue::text("a")]);
}

#[test]
fn duplicate_names_keep_the_first_column() {
    let grid = MemoryGrid::from_text([vec!["code", "code"], vec!["A", "B"]]);
    let table = extract_table(&grid, &TableOptions::new().include_row_num(false)).unwrap();

    assert_eq!(table.fields().len(), 2);
    assert_eq!(table.len(), 1);
    assert_eq!(table.get("code").unwrap(), &[CellValue::text("A")]);
}

#[test]
fn choice_normalizer_maps_fuzzy_labels() {
    let grid = MemoryGrid::from_text([
        vec!["Name", "Status"],
        vec!["Rose", "ACTIVE member"],
        vec!["Amy", "retired"],
    ]);
    let status =
        StringChoice::new([Choice::new("active"), Choice::new("retired")]).with_default("unknown");
    let options = TableOptions::new()
        .field(
            FieldPattern::new("status")
                .mode(MatchMode::Approx)
                .case_sensitive(false)
                .normalizer(Normalizer::new(status)),
        )
        .include_row_num(false);

    let table = extract_table(&grid, &options).unwrap();

    assert_eq!(
        table.get("status").unwrap(),
        &[CellValue::text("active"), CellValue::text("retired")]
    );
}

#[test]
fn strict_mode_names_the_table() {
    let grid = MemoryGrid::from_text([vec!["id"], vec!["1"]]);
    let options = TableOptions::new()
        .name("orders")
        .fields(["id", "total", "customer"])
        .missing_fields_error(true);

    let err = extract_table(&grid, &options).unwrap_err();

    assert_eq!(
        err.to_string(),
        r#"the "orders" table is missing fields ["total", "customer"]"#
    );
}

#[test]
fn open_errors_pass_through() {
    let dir = tempfile::tempdir().unwrap();
    let err = open_table(dir.path().join("missing.csv"), None, &TableOptions::new()).unwrap_err();
    assert!(matches!(
        err,
        TableError::Ingest(IngestError::FileNotFound { .. })
    ));
}
