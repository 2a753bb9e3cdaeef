use adt::interchange::{self, Migration};
use adt::{Adt, DocumentError, Variant, templates};

#[test]
fn legacy_operations_become_profiles() {
    let json = r#"{
        "name": "Stack",
        "domain": "LIFO",
        "operations": [
            { "id": "op-push", "name": "push", "signature": "push(s, x)", "description": "adds" },
            { "id": "op-pop", "name": "pop", "signature": "pop(s)", "preconditions": ["!empty(s)"] }
        ]
    }"#;
    let (adt, migrations) = interchange::from_json_with_migrations(json).unwrap();
    assert_eq!(migrations, vec![Migration::OperationsToProfiles]);
    assert_eq!(adt.profiles.len(), 2);
    assert_eq!(adt.profiles[0].id, "op-push");
    assert_eq!(adt.profiles[0].description.as_deref(), Some("adds"));
    assert!(adt.profiles[1].preconditions.is_empty());
    assert_eq!(adt.implementation(Variant::Chained).id, "impl-chained");
}

#[test]
fn existing_profiles_win_over_operations() {
    let json = r#"{
        "profiles": [{ "id": "a", "name": "a", "signature": "a()" }],
        "operations": [{ "id": "b", "name": "b", "signature": "b()" }]
    }"#;
    let (adt, migrations) = interchange::from_json_with_migrations(json).unwrap();
    assert!(migrations.is_empty());
    assert_eq!(adt.profiles.len(), 1);
    assert_eq!(adt.profiles[0].id, "a");
}

#[test]
fn string_implementations_become_records() {
    let json = r#"{
        "name": "Queue",
        "profiles": [],
        "implementations": {
            "contiguous": "struct Queue { items: Array }",
            "chained": {
                "id": "impl-chained",
                "name": "Chained",
                "domainSpace": "struct Node",
                "methods": { "op-front": "procedure front(q)" }
            }
        }
    }"#;
    let (adt, migrations) = interchange::from_json_with_migrations(json).unwrap();
    assert_eq!(migrations, vec![Migration::StringImplementation(Variant::Contiguous)]);

    let contiguous = adt.implementation(Variant::Contiguous);
    assert_eq!(contiguous.id, "impl-contiguous");
    assert_eq!(contiguous.name, "Contiguous");
    assert_eq!(contiguous.domain_space, "struct Queue { items: Array }");
    assert!(contiguous.methods.is_empty());

    let chained = adt.implementation(Variant::Chained);
    assert_eq!(chained.method("op-front"), Some("procedure front(q)"));
}

#[test]
fn both_legacy_generations_at_once() {
    let json = r#"{
        "operations": [{ "id": "op-x", "name": "x", "signature": "x()" }],
        "implementations": { "contiguous": "A", "chained": "B" }
    }"#;
    let (adt, migrations) = interchange::from_json_with_migrations(json).unwrap();
    assert_eq!(
        migrations,
        vec![
            Migration::OperationsToProfiles,
            Migration::StringImplementation(Variant::Contiguous),
            Migration::StringImplementation(Variant::Chained),
        ]
    );
    assert_eq!(adt.implementation(Variant::Chained).domain_space, "B");
}

#[test]
fn export_uses_camel_case_keys() {
    let json = interchange::to_json(&templates::stack()).unwrap();
    assert!(json.contains("\"relatedProfileIds\""));
    assert!(json.contains("\"domainSpace\""));
    assert!(json.starts_with("{\n  \"name\": \"Stack\""));
}

#[test]
fn templates_survive_export_and_import() {
    for name in templates::NAMES {
        let original = templates::by_name(name).unwrap();
        let json = interchange::to_json(&original).unwrap();
        assert_eq!(interchange::from_json(&json).unwrap(), original);
    }
}

#[test]
fn wrong_field_types_are_reported() {
    let err = interchange::from_json(r#"{ "profiles": "none" }"#).unwrap_err();
    assert!(matches!(err, DocumentError::Json(_)), "{err}");
}

#[test]
fn save_and_load_through_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(interchange::export_file_name(&templates::queue()));
    interchange::save(&templates::queue(), &path).unwrap();
    assert!(path.ends_with("Queue.json"));
    assert_eq!(interchange::load(&path).unwrap(), templates::queue());
}

#[test]
fn missing_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = interchange::load(&path).unwrap_err();
    assert!(matches!(err, DocumentError::Read { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn empty_object_is_the_default_document() {
    assert_eq!(interchange::from_json("{}").unwrap(), Adt::default());
}
