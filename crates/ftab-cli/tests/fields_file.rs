use std::fs;

use ftab_cli::config::{ConfigError, load_options};
use ftab_cli::output::{HeaderReport, write_csv};
use ftab_core::{CellValue, TableOptions, open_table};

const PEOPLE: &str = "\
Quarterly staff export,,,
,,,
Given Name,Surname,Age (years),Start
Rose,Tyler,19,2005-03-26
Amy,Pond,,2010-04-03
";

const FIELDS: &str = r#"
[table]
name = "staff"
case_sensitive = false
header_row_seek = true
missing_fields_error = true

[[field]]
name = "first_name"
aliases = ["given name"]

[[field]]
name = "last_name"
aliases = ["surname"]

[[field]]
name = "age"
mode = "contains"
normalizer = { kind = "integer", default = 0 }

[[field]]
name = "start"
normalizer = { kind = "date" }
"#;

#[test]
fn fields_file_drives_extraction() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("staff.csv");
    let fields = dir.path().join("fields.toml");
    fs::write(&data, PEOPLE).unwrap();
    fs::write(&fields, FIELDS).unwrap();

    let options = load_options(&fields, TableOptions::new()).unwrap();
    let table = open_table(&data, None, &options).unwrap();

    assert_eq!(table.sheet().header_row, 3);
    assert_eq!(
        table.get("age").unwrap(),
        &[CellValue::Int(19), CellValue::Int(0)]
    );
    assert!(matches!(
        table.get("start").unwrap()[0],
        CellValue::DateTime(_)
    ));

    let mut buffer = Vec::new();
    write_csv(&mut buffer, &table, Some(1)).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    insta::assert_snapshot!(text.trim_end(), @r"
    first_name,last_name,age,start,row
    Rose,Tyler,19,2005-03-26T00:00:00,4
    ");

    let report = serde_json::to_value(HeaderReport::new(&table)).unwrap();
    assert_eq!(report["table"], "staff");
    assert_eq!(report["fields"][2]["header"], "Age (years)");
}

#[test]
fn missing_fields_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_options(&dir.path().join("absent.toml"), TableOptions::new()).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn invalid_threshold_in_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let fields = dir.path().join("fields.toml");
    fs::write(&fields, "[table]\nmin_ratio = 1.5\n[[field]]\nname = \"id\"\n").unwrap();
    let options = load_options(&fields, TableOptions::new()).unwrap();

    let data = dir.path().join("ids.csv");
    fs::write(&data, "id\n1\n").unwrap();
    let err = open_table(&data, None, &options).unwrap_err();
    assert!(err.to_string().contains("min_ratio"));
}
