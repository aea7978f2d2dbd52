use proptest::prelude::*;
use schema_form::schema::{
    error::SchemaError,
    field_model::{Bounds, Field, FieldKind, FieldOption, FieldType},
    normalize::{normalize_field, normalize_fields, normalize_options, parse_schema},
    schema_model::{RawField, RawOption},
};

mod common;
use crate::common::fixtures::{FULL_SCHEMA, full_schema};

// =========================================================================
// Option coercion
// =========================================================================

#[test]
fn bare_string_options_become_label_value_pairs() {
    let options = normalize_options("r", vec![RawOption::Bare("a".into()), RawOption::Bare("b".into())]).unwrap();
    assert_eq!(
        options,
        vec![FieldOption::new("a", "a"), FieldOption::new("b", "b")]
    );
}

#[test]
fn mixed_options_normalize_with_trimming_and_label_fallback() {
    let options = normalize_options(
        "country",
        vec![
            RawOption::Bare(" India ".into()),
            RawOption::Pair {
                label: Some("Kenya".into()),
                value: "ke".into(),
            },
            RawOption::Pair {
                label: None,
                value: "fr".into(),
            },
            RawOption::Pair {
                label: Some("  ".into()),
                value: "pe".into(),
            },
        ],
    )
    .unwrap();
    assert_eq!(
        options,
        vec![
            FieldOption::new("India", "India"),
            FieldOption::new("Kenya", "ke"),
            FieldOption::new("fr", "fr"),
            FieldOption::new("pe", "pe"),
        ]
    );
}

#[test]
fn blank_option_values_are_rejected() {
    let bare = normalize_options("r", vec![RawOption::Bare("a".into()), RawOption::Bare("  ".into())]);
    assert_eq!(
        bare,
        Err(SchemaError::BlankOption {
            name: "r".into(),
            index: 1
        })
    );

    let pair = normalize_options(
        "r",
        vec![RawOption::Pair {
            label: Some("Nowhere".into()),
            value: " ".into(),
        }],
    );
    assert!(matches!(pair, Err(SchemaError::BlankOption { index: 0, .. })));
}

#[test]
fn blank_options_fail_the_whole_schema() {
    let json = r#"{ "form": { "title": "T", "groups": [ { "title": "G", "fields": [
        { "type": "radio", "name": "r", "options": ["a", "", { "label": "B", "value": "  " }] } ] } ] } }"#;
    let err = parse_schema(json).unwrap_err();
    assert_eq!(
        err.root(),
        &SchemaError::BlankOption {
            name: "r".into(),
            index: 1
        }
    );
    assert_eq!(
        err.to_string(),
        "group 'G': field 'r' has a blank value at option #1"
    );
}

#[test]
fn options_parse_from_json_in_both_shapes() {
    let raw: RawField = serde_json::from_str(
        r#"{ "type": "radio", "name": "r", "options": ["x", { "label": "Why", "value": "y" }] }"#,
    )
    .unwrap();
    let field = normalize_field(raw).unwrap();
    assert_eq!(
        field.options(),
        &[FieldOption::new("x", "x"), FieldOption::new("Why", "y")]
    );
}

// =========================================================================
// Field normalization
// =========================================================================

#[test]
fn missing_type_or_name_is_a_schema_error() {
    let no_type = RawField {
        name: Some("x".into()),
        ..RawField::default()
    };
    assert_eq!(normalize_field(no_type), Err(SchemaError::MissingType { index: 0 }));

    let blank_name = RawField {
        field_type: Some("text".into()),
        name: Some("   ".into()),
        ..RawField::default()
    };
    assert_eq!(normalize_field(blank_name), Err(SchemaError::MissingName { index: 0 }));
}

#[test]
fn field_list_reports_position_of_bad_field() {
    let fields = vec![RawField::new("text", "ok"), RawField::default()];
    assert_eq!(normalize_fields(fields), Err(SchemaError::MissingType { index: 1 }));
}

#[test]
fn label_defaults_to_name_and_blank_placeholder_drops() {
    let raw = RawField {
        placeholder: Some("".into()),
        ..RawField::new("text", "nickname")
    };
    let field = normalize_field(raw).unwrap();
    assert_eq!(field.label, "nickname");
    assert_eq!(field.placeholder, None);
    assert!(!field.required);
    assert_eq!(field.kind, FieldKind::Text);
}

#[test]
fn options_on_non_choice_fields_are_ignored() {
    let raw = RawField {
        options: Some(vec![RawOption::Bare("a".into())]),
        min: Some(1.0),
        ..RawField::new("text", "t")
    };
    let field = normalize_field(raw).unwrap();
    assert_eq!(field.kind, FieldKind::Text);
    assert!(field.options().is_empty());
    assert!(field.kind.bounds().is_none());
}

#[test]
fn choice_fields_need_options() {
    for t in ["radio", "checkbox", "dropdown"] {
        let err = normalize_field(RawField::new(t, "c")).unwrap_err();
        assert!(
            matches!(err, SchemaError::MissingOptions { ref name, .. } if name == "c"),
            "{} without options should fail, got {:?}",
            t,
            err
        );
    }
}

#[test]
fn duplicate_option_values_are_rejected() {
    let raw = RawField {
        options: Some(vec![RawOption::Bare("a".into()), RawOption::Bare("a".into())]),
        ..RawField::new("dropdown", "d")
    };
    assert_eq!(
        normalize_field(raw),
        Err(SchemaError::DuplicateOption {
            name: "d".into(),
            value: "a".into()
        })
    );
}

#[test]
fn slider_bounds_are_checked() {
    let inverted = RawField {
        min: Some(10.0),
        max: Some(1.0),
        ..RawField::new("slider", "s")
    };
    assert!(matches!(normalize_field(inverted), Err(SchemaError::InvalidRange { .. })));

    let zero_step = RawField {
        step: Some(0.0),
        ..RawField::new("number", "n")
    };
    assert!(matches!(normalize_field(zero_step), Err(SchemaError::InvalidStep { .. })));

    let ok = RawField {
        min: Some(1.0),
        max: Some(1.0),
        step: Some(0.5),
        ..RawField::new("slider", "s")
    };
    assert_eq!(
        normalize_field(ok).unwrap().kind,
        FieldKind::Slider(Bounds {
            min: Some(1.0),
            max: Some(1.0),
            step: Some(0.5)
        })
    );
}

#[test]
fn unknown_type_is_kept_for_render_time_diagnostics() {
    let field = normalize_field(RawField::new("date", "birthday")).unwrap();
    assert_eq!(field.kind, FieldKind::Unknown("date".into()));
    assert_eq!(field.kind.type_name(), "date");
    assert_eq!(field.kind.field_type(), None);
}

#[test]
fn type_names_parse_case_insensitively() {
    for t in FieldType::ALL {
        assert_eq!(FieldType::parse(&t.as_str().to_uppercase()), Some(t));
    }
    assert_eq!(FieldType::parse("email"), None);
}

// =========================================================================
// Documents
// =========================================================================

#[test]
fn full_schema_loads_every_field_type() {
    let schema = full_schema();
    assert_eq!(schema.title, "Personal Information");
    assert_eq!(schema.description.as_deref(), Some("Tell us about yourself"));
    assert_eq!(schema.groups.len(), 3);

    let prefs = schema.group("Preferences").unwrap();
    let hobbies = prefs.field("hobbies").unwrap();
    assert!(matches!(hobbies.kind, FieldKind::Checkbox(ref o) if o.len() == 3));
    assert_eq!(hobbies.options()[1], FieldOption::new("Chess", "Chess"));
}

#[test]
fn duplicate_titles_and_names_are_rejected() {
    let dup_group = r#"{ "form": { "title": "T", "groups": [
        { "title": "A", "fields": [] }, { "title": "A", "fields": [] } ] } }"#;
    assert_eq!(parse_schema(dup_group), Err(SchemaError::DuplicateGroup("A".into())));

    let dup_field = r#"{ "form": { "title": "T", "groups": [
        { "title": "A", "fields": [ { "type": "text", "name": "x" }, { "type": "number", "name": "x" } ] } ] } }"#;
    assert_eq!(
        parse_schema(dup_field),
        Err(SchemaError::DuplicateField {
            group: "A".into(),
            name: "x".into()
        })
    );
}

#[test]
fn field_errors_carry_their_group() {
    let doc = r#"{ "form": { "title": "T", "groups": [
        { "title": "Contact", "fields": [ { "name": "x" } ] } ] } }"#;
    let err = parse_schema(doc).unwrap_err();
    assert!(matches!(err, SchemaError::InGroup { ref group, .. } if group == "Contact"));
    assert_eq!(err.root(), &SchemaError::MissingType { index: 0 });
    assert!(err.to_string().contains("Contact"));
}

#[test]
fn empty_or_malformed_documents_fail() {
    assert_eq!(
        parse_schema(r#"{ "form": { "title": "T", "groups": [] } }"#),
        Err(SchemaError::NoGroups)
    );
    assert_eq!(
        parse_schema(r#"{ "form": { "title": "T", "groups": [ { "title": " ", "fields": [] } ] } }"#),
        Err(SchemaError::EmptyTitle)
    );
    assert!(matches!(parse_schema("not json"), Err(SchemaError::Parse(_))));
}

#[test]
fn document_round_trips_through_json() {
    let schema = full_schema();
    let json = serde_json::to_string(&schema.to_document()).unwrap();
    let again = parse_schema(&json).unwrap();
    assert_eq!(again, schema);
    assert_eq!(again.fingerprint(), schema.fingerprint());
}

#[test]
fn fingerprint_changes_with_content() {
    let schema = full_schema();
    let mut other = schema.clone();
    other.groups[0].fields[0].required = false;
    assert_eq!(schema.fingerprint().len(), 40);
    assert_ne!(schema.fingerprint(), other.fingerprint());
    // Title is not part of the fingerprint.
    other = schema.clone();
    other.title = "Renamed".into();
    assert_eq!(schema.fingerprint(), other.fingerprint());
    assert!(FULL_SCHEMA.contains("Personal Information"));
}

#[test]
fn field_deserialization_goes_through_the_normalizer() {
    let field: Field = serde_json::from_str(r#"{ "type": "dropdown", "name": "c", "options": ["x"] }"#).unwrap();
    assert_eq!(field.options(), &[FieldOption::bare("x")]);

    let bad = serde_json::from_str::<Field>(r#"{ "type": "dropdown", "name": "c" }"#);
    assert!(bad.is_err());
}

// =========================================================================
// Idempotence
// =========================================================================

fn raw_option() -> impl Strategy<Value = RawOption> {
    prop_oneof![
        "[a-c ]{0,3}".prop_map(RawOption::Bare),
        (proptest::option::of("[A-C ]{0,3}"), "[a-c ]{0,3}")
            .prop_map(|(label, value)| RawOption::Pair { label, value }),
    ]
}

fn raw_field() -> impl Strategy<Value = RawField> {
    (
        proptest::option::of(prop_oneof![
            Just("text".to_string()),
            Just("number".to_string()),
            Just("textarea".to_string()),
            Just("radio".to_string()),
            Just("checkbox".to_string()),
            Just("dropdown".to_string()),
            Just("slider".to_string()),
            Just("color".to_string()),
            Just(" ".to_string()),
        ]),
        proptest::option::of("[a-z ]{0,5}"),
        proptest::option::of("[A-Za-z ]{0,5}"),
        proptest::option::of("[a-z ]{0,5}"),
        proptest::option::of(proptest::collection::vec(raw_option(), 0..4)),
        proptest::option::of(any::<bool>()),
        proptest::option::of(-10.0f64..10.0),
        proptest::option::of(-10.0f64..10.0),
        proptest::option::of(-1.0f64..5.0),
    )
        .prop_map(
            |(field_type, name, label, placeholder, options, required, min, max, step)| RawField {
                field_type,
                label,
                name,
                placeholder,
                options,
                required,
                min,
                max,
                step,
            },
        )
}

proptest! {
    #[test]
    fn normalizing_twice_equals_normalizing_once(raw in raw_field()) {
        if let Ok(field) = normalize_field(raw) {
            let again = normalize_field(RawField::from(field.clone()));
            prop_assert_eq!(again, Ok(field));
        }
    }

    #[test]
    fn normalizing_field_lists_is_idempotent(raws in proptest::collection::vec(raw_field(), 0..5)) {
        if let Ok(fields) = normalize_fields(raws) {
            let again = normalize_fields(fields.iter().cloned().map(RawField::from).collect());
            prop_assert_eq!(again, Ok(fields));
        }
    }
}
