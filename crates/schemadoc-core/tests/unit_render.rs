//! Rendering of complete schemas
//!
//! Output is compared verbatim: the markdown dialect is whitespace sensitive
//! and nested tables only unmask at the top-level call.

use pretty_assertions::assert_eq;
use schemadoc_core::{
    render_schema, MemorySource, ReferenceResolver, RenderMode, RenderOptions, Renderer,
    ResolvedRef, Schema, SchemaResult,
};
use schemadoc_core::markdown::slugify;
use serde_json::{json, Value};

fn render(value: Value) -> String {
    let schema = Schema::from_value(&value).unwrap();
    render_schema(&schema, RenderOptions::new().suppress_examples()).unwrap()
}

/// Resolves every reference to its last segment, with a body-less schema
fn definitions(reference: &str) -> SchemaResult<Option<ResolvedRef>> {
    let label = reference.rsplit('/').next().unwrap_or(reference).to_string();
    let href = format!("#{}", reference.trim_start_matches("#/").replace('/', "-"));
    Ok(Some(ResolvedRef {
        label: Some(label),
        href,
        schema: Schema::default(),
    }))
}

#[test]
fn test_one_of_alongside_declared_type() {
    let output = render(json!({
        "type": "object",
        "properties": {"value": {"type": "string"}},
        "oneOf": [{"type": "string"}, {"type": "number"}]
    }));

    assert_eq!(
        output,
        r#"{% cut "**Type**: object" %}

#|
|| **Name** | **Description** ||
||

_value_{.json-schema-reset .json-schema-property}
{.table-cell}|
**Type**: string
{.table-cell}
||
|#{.json-schema-properties}

{% endcut %}

{% cut "**One of 2 types**" %}{.json-schema-combinators data-marker=or}

- **Type**: string

- **Type**: number

{% endcut %}"#
    );
}

#[test]
fn test_one_of_variant_with_metadata_stays_nested() {
    let output = render(json!({
        "oneOf": [
            {
                "description": "Комбинированное значение",
                "oneOf": [
                    {"type": "string", "description": "Строка"},
                    {"type": "number", "description": "Число"}
                ]
            },
            {"type": "boolean", "description": "Булевый флаг"}
        ]
    }));

    assert_eq!(
        output,
        r#"{% cut "**One of 2 types**" %}{.json-schema-combinators data-marker=or}

- {% cut "**One of 2 types**" %}{.json-schema-combinators data-marker=or}

  - **Type**: string

    Строка

  - **Type**: number

    Число

  {% endcut %}

  Комбинированное значение

- **Type**: boolean

  Булевый флаг

{% endcut %}"#
    );
}

#[test]
fn test_plain_nested_one_of_is_flattened() {
    let output = render(json!({
        "oneOf": [
            {"oneOf": [
                {"type": "string", "description": "Строка"},
                {"type": "number", "description": "Число"}
            ]},
            {"type": "boolean", "description": "Булевый флаг"}
        ]
    }));

    assert_eq!(
        output,
        r#"{% cut "**One of 3 types**" %}{.json-schema-combinators data-marker=or}

- **Type**: string

  Строка

- **Type**: number

  Число

- **Type**: boolean

  Булевый флаг

{% endcut %}"#
    );
}

#[test]
fn test_single_variant_collapses() {
    assert_eq!(
        render(json!({"oneOf": [{"type": "boolean", "description": "Булевый флаг"}]})),
        "**Type**: boolean\n\nБулевый флаг"
    );
}

#[test]
fn test_any_of_and_all_of_markers() {
    assert_eq!(
        render(json!({"anyOf": [{"type": "string", "description": "Строка"}, {"type": "number"}]})),
        r#"{% cut "**Any of 2 types**" %}{.json-schema-combinators data-marker=or}

- **Type**: string

  Строка

- **Type**: number

{% endcut %}"#
    );

    assert_eq!(
        render(json!({"allOf": [
            {"type": "string", "description": "Строка"},
            {"type": "number", "description": "Число"}
        ]})),
        r#"{% cut "**All of 2 types**" %}{.json-schema-combinators data-marker=and}

- **Type**: string

  Строка

- **Type**: number

  Число

{% endcut %}"#
    );
}

#[test]
fn test_array_of_primitives() {
    assert_eq!(
        render(json!({
            "type": "array",
            "description": "Массив строк",
            "items": {"type": "string", "description": "Строка"}
        })),
        "**Type**: string[]\n\nМассив строк"
    );
    assert_eq!(
        render(json!({
            "type": "array",
            "description": "Матрица строк",
            "items": {"type": "array", "items": {"type": "string"}}
        })),
        "**Type**: string[][]\n\nМатрица строк"
    );
    assert_eq!(
        render(json!({
            "type": "array",
            "nullable": true,
            "description": "Опциональный список идентификаторов",
            "items": {"type": "string"}
        })),
        "**Type**: string[] | null\n\nОпциональный список идентификаторов"
    );
}

#[test]
fn test_array_of_objects_is_collapsed_table() {
    let output = render(json!({
        "type": "array",
        "description": "Список сущностей",
        "items": {
            "type": "object",
            "description": "Элемент списка",
            "properties": {
                "foo": {"type": "string", "description": "Поле foo"},
                "bar": {"type": "integer", "description": "Поле bar"}
            }
        }
    }));

    assert_eq!(
        output,
        r#"{% cut "**Type**: object[]" %}

#|
|| **Name** | **Description** ||
||

_bar_{.json-schema-reset .json-schema-property}
{.table-cell}|
**Type**: integer

Поле bar
{.table-cell}
||
||

_foo_{.json-schema-reset .json-schema-property}
{.table-cell}|
**Type**: string

Поле foo
{.table-cell}
||
|#{.json-schema-properties}

{% endcut %}

Список сущностей"#
    );
}

#[test]
fn test_array_of_combinator_items() {
    let resolver = |reference: &str| -> SchemaResult<Option<ResolvedRef>> {
        let label = reference.rsplit('/').next().unwrap_or(reference).to_string();
        let schema = match label.as_str() {
            "UrlGoal" => json!({"type": "object", "properties": {
                "id": {"type": "integer", "example": 42},
                "url": {"type": "string", "example": "https://example.com"}
            }}),
            "VisitDurationGoal" => json!({"type": "object", "properties": {
                "duration": {"type": "integer", "example": 60}
            }}),
            _ => return Ok(None),
        };
        Ok(Some(ResolvedRef {
            href: format!("#entity-{label}"),
            label: Some(label),
            schema: Schema::from_value(&schema)?,
        }))
    };

    let schema = Schema::from_value(&json!({
        "type": "array",
        "description": "Список целей",
        "example": [{"id": 1}],
        "items": {"oneOf": [
            {"$ref": "#/components/schemas/UrlGoal"},
            {"$ref": "#/components/schemas/VisitDurationGoal"}
        ]}
    }))
    .unwrap();

    let output = render_schema(&schema, RenderOptions::new().with_resolver(&resolver)).unwrap();

    let start = output.find(r#"{% cut "**Type**: array" %}"#).unwrap();
    let combinators = output[start..].find("**One of 2 types**").unwrap() + start;
    let head = &output[start..combinators];
    assert!(!head.contains("\"id\": 1"));
    assert!(!head.contains("Список целей"));

    assert!(output.contains("[UrlGoal](#entity-UrlGoal)"));
    assert!(output.contains("[VisitDurationGoal](#entity-VisitDurationGoal)"));
    assert!(output.contains("Список целей"));
}

#[test]
fn test_reference_labels() {
    let schema = Schema::from_value(&json!({
        "type": "object",
        "properties": {
            "address": {"$ref": "#/definitions/Address", "description": "Ссылка на адрес"}
        }
    }))
    .unwrap();
    let options = RenderOptions::new().with_resolver(&definitions).suppress_examples();

    assert_eq!(
        render_schema(&schema, options).unwrap(),
        r#"{% cut "**Type**: object" %}

#|
|| **Name** | **Description** ||
||

_address_{.json-schema-reset .json-schema-property}
{.table-cell}|
**Type**: [Address](#definitions-Address)

Ссылка на адрес
{.table-cell}
||
|#{.json-schema-properties}

{% endcut %}"#
    );
}

#[test]
fn test_nested_array_of_references() {
    let schema = Schema::from_value(&json!({
        "type": "array",
        "description": "Матрица ссылок",
        "items": {"type": "array", "items": {"$ref": "#/definitions/Node"}}
    }))
    .unwrap();
    let options = RenderOptions::new().with_resolver(&definitions).suppress_examples();

    assert_eq!(
        render_schema(&schema, options).unwrap(),
        "**Type**: [Node](#definitions-Node)[][]\n\nМатрица ссылок"
    );
}

#[test]
fn test_top_level_reference_with_before_and_after() {
    let schema = Schema::from_value(&json!({
        "$ref": "#/definitions/Address",
        "description": "Ссылка на определение адреса"
    }))
    .unwrap();
    let options = RenderOptions::new()
        .with_resolver(&definitions)
        .with_before("# Header")
        .with_after("---")
        .suppress_examples();

    assert_eq!(
        render_schema(&schema, options).unwrap(),
        "# Header\n\n**Type**: [Address](#definitions-Address)\n\nСсылка на определение адреса\n\n---"
    );
}

#[test]
fn test_description_from_referenced_schema() {
    let resolver = |_: &str| -> SchemaResult<Option<ResolvedRef>> {
        Ok(Some(ResolvedRef {
            label: Some("Address".to_string()),
            href: "#address".to_string(),
            schema: Schema::from_value(&json!({"description": "Описание адреса"}))?,
        }))
    };
    let schema = Schema::from_value(&json!({"$ref": "#/definitions/Address"})).unwrap();
    let options = RenderOptions::new().with_resolver(&resolver).suppress_examples();

    assert_eq!(
        render_schema(&schema, options).unwrap(),
        "**Type**: [Address](#address)\n\nОписание адреса"
    );
}

#[test]
fn test_nullable_reference() {
    let schema = Schema::from_value(&json!({"$ref": "#/definitions/User", "nullable": true})).unwrap();
    let options = RenderOptions::new().with_resolver(&definitions).suppress_examples();

    assert_eq!(render_schema(&schema, options).unwrap(), "**Type**: [User](#definitions-User) | null");
}

#[test]
fn test_visibility_hides_properties() {
    let schema = Schema::from_value(&json!({
        "type": "object",
        "properties": {
            "id": {"type": "string", "readOnly": true},
            "password": {"type": "string", "writeOnly": true}
        }
    }))
    .unwrap();

    let read = render_schema(&schema, RenderOptions::new().read_only().suppress_examples()).unwrap();
    assert!(read.contains("_id_"));
    assert!(!read.contains("_password_"));

    let write = render_schema(&schema, RenderOptions::new().write_only().suppress_examples()).unwrap();
    assert!(!write.contains("_id_"));
    assert!(write.contains("_password_"));
}

fn page() -> ReferenceResolver<MemorySource> {
    let mut refs = ReferenceResolver::new(
        MemorySource::new(),
        "/spec/main.yaml",
        json!({
            "components": {"schemas": {
                "Owner": {
                    "type": "object",
                    "description": "Pet owner",
                    "properties": {"name": {"type": "string"}}
                },
                "Pet": {
                    "type": "object",
                    "properties": {
                        "owner": {"$ref": "#/components/schemas/Owner"},
                        "previousOwner": {"$ref": "#/components/schemas/Owner"}
                    }
                }
            }}
        }),
    );
    refs.resolve_root().unwrap();
    refs
}

#[test]
fn test_session_emits_each_linked_entity_once() {
    let refs = page();
    let session = Renderer::new(&refs);

    let table = session
        .table(&json!({"$ref": "#/components/schemas/Pet"}), RenderMode::Read)
        .unwrap();
    assert!(table.starts_with("#|"));
    assert!(table.contains("[Owner](#entity-Owner)"));

    let sections = session.refs(RenderMode::Read).unwrap();
    assert_eq!(sections.len(), 1);
    assert!(sections[0].starts_with("<div class=\"openapi-entity\">\n\n### Owner {#entity-Owner}"));
    assert!(sections[0].contains("Pet owner"));
    assert!(sections[0].ends_with("</div>"));

    assert!(session.refs(RenderMode::Read).unwrap().is_empty());

    // Owner renders the same in both modes, so only Pet is new
    let write = session.refs(RenderMode::Write).unwrap();
    assert_eq!(write.len(), 1);
    assert!(write[0].contains("### Pet {#entity-Pet}"));
}

#[test]
fn test_session_body_section() {
    let refs = page();
    let session = Renderer::new(&refs);

    let body = session
        .body(
            Some(&json!({"$ref": "#/components/schemas/Pet"})),
            RenderMode::Write,
            Some("application/json"),
        )
        .unwrap();

    assert!(body.starts_with("<div class=\"openapi-entity\">\n\n### Body\n\n{% cut \"application/json\" %}"));
    assert!(body.contains("### Owner {#entity-Owner}"));
    assert_eq!(
        session.linked_refs(),
        vec!["#/components/schemas/Pet", "#/components/schemas/Owner"]
    );
}

#[test]
fn test_non_ascii_entities_get_distinct_anchors() {
    let mut refs = ReferenceResolver::new(
        MemorySource::new(),
        "/spec/main.yaml",
        json!({
            "components": {"schemas": {
                "Holder": {
                    "type": "object",
                    "properties": {
                        "user": {"$ref": "#/components/schemas/Пользователь"},
                        "order": {"$ref": "#/components/schemas/Заказ"}
                    }
                },
                "Пользователь": {"type": "object", "properties": {"login": {"type": "string"}}},
                "Заказ": {"type": "object", "properties": {"total": {"type": "integer"}}}
            }}
        }),
    );
    refs.resolve_root().unwrap();
    let session = Renderer::new(&refs);

    let table = session
        .table(&json!({"$ref": "#/components/schemas/Holder"}), RenderMode::Read)
        .unwrap();
    let user_anchor = format!("#entity-{}", slugify("Пользователь"));
    assert!(table.contains(&format!("[Пользователь]({user_anchor})")));
    assert!(table.contains("[Заказ](#entity-Zakaz)"));
    assert_ne!(user_anchor, "#entity-Zakaz");

    let sections = session.refs(RenderMode::Read).unwrap();
    assert_eq!(sections.len(), 2);
    let user_title = format!("### Пользователь {{{user_anchor}}}");
    assert!(sections.iter().any(|section| section.contains(&user_title)));
    assert!(sections.iter().any(|section| section.contains("### Заказ {#entity-Zakaz}")));
}
