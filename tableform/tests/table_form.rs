//! Integration tests for generating forms from a table
//!
//! Uses a `Book` table referencing `Author` and checks field order,
//! filtering, labels, kinds, validators and foreign-key choices.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use tableform::prelude::*;

fn author() -> Table {
    Table::new("Author")
        .column(Column::serial("id"))
        .column(Column::varchar("name").required())
}

fn book() -> Table {
    Table::new("Book")
        .column(Column::serial("id"))
        .column(Column::varchar("title").required())
        .column(Column::text("content").required())
        .column(Column::timestamp("created"))
        .column(Column::boolean("released").default(false))
        .column(Column::date("released_date"))
        .column(Column::numeric("price").digits(5, 2))
        .column(Column::integer("rating").default(0_i64))
        .column(Column::foreign_key("book_author", author().name()))
}

fn book_form(filter: &FieldFilter) -> FormClass {
    table_form(&book(), &FormClass::base(), filter, &HashMap::new(), None)
}

#[test]
fn test_only_with_keyword_data() {
    let form_class = book_form(&FieldFilter::only(["title"]));
    let form = form_class.with_data(&Row::new().with("title", "Book title"));

    let data = form.data();
    assert_eq!(data.len(), 1);
    assert_eq!(data["title"], FieldValue::from("Book title"));
}

#[test]
fn test_all_fields_in_column_order() {
    let form_class = book_form(&FieldFilter::all());
    assert_eq!(form_class.name(), "BookForm");
    assert_eq!(
        form_class.field_names(),
        vec![
            "id",
            "title",
            "content",
            "created",
            "released",
            "released_date",
            "price",
            "rating",
            "book_author",
        ]
    );
}

#[test]
fn test_default_data() {
    let form = book_form(&FieldFilter::all()).instantiate();
    let data = form.data();

    assert_eq!(data["id"], FieldValue::Null);
    assert_eq!(data["title"], FieldValue::from(""));
    assert_eq!(data["content"], FieldValue::from(""));
    assert!(matches!(data["created"], FieldValue::DateTime(_)));
    assert_eq!(data["released"], FieldValue::Bool(false));
    assert!(matches!(data["released_date"], FieldValue::Date(_)));
    assert_eq!(data["price"], FieldValue::Float(0.0));
    assert_eq!(data["rating"], FieldValue::Int(0));
    assert_eq!(data["book_author"], FieldValue::Null);
}

#[test]
fn test_exclude() {
    let form_class = book_form(&FieldFilter::exclude(["id", "content", "rating"]));
    assert_eq!(
        form_class.field_names(),
        vec![
            "title",
            "created",
            "released",
            "released_date",
            "price",
            "book_author",
        ]
    );
    assert!(form_class.field("id").is_none());
}

#[test]
fn test_only_keeps_table_order() {
    let form_class = book_form(&FieldFilter::only(["rating", "content", "title"]));
    assert_eq!(form_class.field_names(), vec!["title", "content", "rating"]);

    let kwargs = Row::new()
        .with("title", "Book1")
        .with("content", "Book1")
        .with("rating", 95_i64);
    let data = form_class.with_data(&kwargs).data();
    assert_eq!(data["title"], FieldValue::from("Book1"));
    assert_eq!(data["content"], FieldValue::from("Book1"));
    assert_eq!(data["rating"], FieldValue::Int(95));
}

#[test]
fn test_label_override() {
    let field_args = HashMap::from([(
        "title".to_string(),
        FieldArgs::new().label("Your new label"),
    )]);
    let form_class = table_form(
        &book(),
        &FormClass::base(),
        &FieldFilter::only(["title"]),
        &field_args,
        None,
    );
    assert_eq!(form_class.field("title").unwrap().label, "Your new label");
}

#[test]
fn test_default_labels_are_title_case() {
    let form_class = book_form(&FieldFilter::all());
    assert_eq!(form_class.field("title").unwrap().label, "Title");
    assert_eq!(form_class.field("book_author").unwrap().label, "Book Author");
}

#[test]
fn test_field_kinds() {
    let form_class = book_form(&FieldFilter::all());
    let kind = |name: &str| form_class.field(name).unwrap().kind.as_str();

    assert_eq!(kind("id"), "integer");
    assert_eq!(kind("title"), "string");
    assert_eq!(kind("content"), "textarea");
    assert_eq!(kind("created"), "datetime");
    assert_eq!(kind("released"), "boolean");
    assert_eq!(kind("released_date"), "date");
    assert_eq!(kind("price"), "float");
    assert_eq!(kind("rating"), "integer");
    assert_eq!(kind("book_author"), "select");
}

#[test]
fn test_validators() {
    let form_class = book_form(&FieldFilter::all());

    let title = form_class.field("title").unwrap();
    assert_eq!(
        title.validators,
        vec![Validator::data_required(), Validator::max_length(255)]
    );

    let content = form_class.field("content").unwrap();
    assert_eq!(content.validators, vec![Validator::data_required()]);

    assert!(form_class.field("rating").unwrap().validators.is_empty());
}

#[test]
fn test_length_validator_survives_field_args() {
    let field_args = HashMap::from([(
        "title".to_string(),
        FieldArgs::new().validators(vec![Validator::length(Some(2), None)]),
    )]);
    let form_class = table_form(
        &book(),
        &FormClass::base(),
        &FieldFilter::only(["title"]),
        &field_args,
        None,
    );
    assert_eq!(
        form_class.field("title").unwrap().validators,
        vec![
            Validator::length(Some(2), None),
            Validator::data_required(),
            Validator::max_length(255),
        ]
    );
}

fn full_book_data() -> Row {
    let created = NaiveDate::from_ymd_opt(2024, 5, 1)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .map(FieldValue::from)
        .unwrap();
    Row::new()
        .with("id", 1_i64)
        .with("title", "Book1")
        .with("content", "Book1")
        .with("created", created)
        .with("released", false)
        .with("released_date", NaiveDate::from_ymd_opt(2024, 5, 2).unwrap())
        .with("price", 10.5)
        .with("rating", 95_i64)
        .with("book_author", 1_i64)
}

#[test]
fn test_foreign_key_choice_passes() {
    let mut form = book_form(&FieldFilter::all()).with_data(&full_book_data());
    form.set_choices("book_author", [1_i64, 2_i64]).unwrap();

    assert_eq!(form.get("price"), Some(&FieldValue::Float(10.5)));
    assert_eq!(form.get("book_author"), Some(&FieldValue::Int(1)));
    assert!(form.validate(), "{:?}", form.errors());
}

#[test]
fn test_foreign_key_choice_outside_list_fails() {
    let mut form = book_form(&FieldFilter::all())
        .with_data(&full_book_data().with("book_author", 3_i64));
    form.set_choices("book_author", [(1_i64, "alice"), (2_i64, "bob")])
        .unwrap();

    assert!(!form.validate());
    assert_eq!(form.errors().fields_with_errors(), vec!["book_author"]);
    assert_eq!(form.errors().messages("book_author"), vec!["Not a valid choice."]);
}

#[test]
fn test_foreign_key_without_choices_fails() {
    let mut form = book_form(&FieldFilter::all()).with_data(&full_book_data());
    assert!(!form.validate());
    assert!(form.errors().has_field_error("book_author"));
}

#[test]
fn test_submitted_choice() {
    let form_class = book_form(&FieldFilter::only(["book_author"]));

    let mut form = form_class.from_formdata(&FormData::new().with("book_author", "1"));
    form.set_choices("book_author", [(1_i64, "alice"), (2_i64, "bob")])
        .unwrap();
    assert!(form.validate());

    let mut form = form_class.from_formdata(&FormData::new().with("book_author", "7"));
    form.set_choices("book_author", [(1_i64, "alice"), (2_i64, "bob")])
        .unwrap();
    assert!(!form.validate());
}

#[test]
fn test_missing_required_value() {
    let form_class = book_form(&FieldFilter::only(["title", "content"]));
    let mut form = form_class.from_formdata(&FormData::new().with("title", "  "));

    assert!(!form.validate());
    assert_eq!(form.errors().messages("title"), vec!["This field is required."]);
    assert_eq!(form.errors().messages("content"), vec!["This field is required."]);
}

#[test]
fn test_overlong_title() {
    let form_class = book_form(&FieldFilter::only(["title"]));
    let mut form = form_class.from_formdata(&FormData::new().with("title", "x".repeat(256)));

    assert!(!form.validate());
    assert_eq!(
        form.errors().messages("title"),
        vec!["Field cannot be longer than 255 characters."]
    );
}

#[test]
fn test_unmapped_column_is_skipped() {
    let table = Table::new("Event")
        .column(Column::serial("id"))
        .column(Column::new("payload", ColumnType::Jsonb))
        .column(Column::new("starts_at", ColumnType::Time))
        .column(Column::varchar("name"));

    let fields = table_fields(&table, &FieldFilter::all(), &HashMap::new(), None);
    assert_eq!(fields.keys().collect::<Vec<_>>(), ["id", "name"]);
}

#[test]
fn test_submitted_datetime() {
    let form_class = book_form(&FieldFilter::only(["created"]));
    let form = form_class.from_formdata(&FormData::new().with("created", "2024-05-01 12:30:00"));

    let expected = NaiveDateTime::parse_from_str("2024-05-01 12:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
    assert_eq!(form.get("created"), Some(&FieldValue::DateTime(expected)));
}
