//! Loading schemas and configuration from disk

mod helpers;

use biolink_toolkit::Toolkit;
use biolink_toolkit_core::{SchemaDefect, ToolkitConfig, ToolkitError};
use helpers::{biolink, fixture, init_tracing, strings};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

#[tokio::test]
async fn test_async_load_matches_blocking_load() -> anyhow::Result<()> {
    init_tracing();
    let loaded = Toolkit::load(fixture("biolink-model.yaml"), ToolkitConfig::default()).await?;
    let blocking = biolink();

    assert_eq!(loaded.get_all_elements(true), blocking.get_all_elements(true));
    assert_eq!(loaded.index().stats(), blocking.index().stats());
    assert_eq!(
        loaded.get_value_type_for_slot("negated", true).as_deref(),
        Some("metatype:Boolean")
    );
    Ok(())
}

#[tokio::test]
async fn test_missing_import_is_reported() -> anyhow::Result<()> {
    init_tracing();
    let dir = TempDir::new()?;
    let model = dir.path().join("model.yaml");
    fs::write(
        &model,
        "id: https://example.org/model\nname: model\nimports: [linkml:types]\nclasses:\n  entity: {}\n",
    )?;

    let err = Toolkit::load(&model, ToolkitConfig::default())
        .await
        .unwrap_err();
    assert!(
        matches!(&err, ToolkitError::ImportError { import, .. } if import == "linkml:types"),
        "{err}"
    );
    Ok(())
}

#[tokio::test]
async fn test_malformed_schema_is_a_parse_error() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let model = dir.path().join("broken.yaml");
    fs::write(&model, "id: x\nclasses: [unclosed\n")?;

    let err = Toolkit::load(&model, ToolkitConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ToolkitError::ParseError { .. }), "{err}");
    Ok(())
}

#[test]
fn test_configuration_file_shapes_the_index() -> anyhow::Result<()> {
    init_tracing();
    let dir = TempDir::new()?;
    let path = dir.path().join("toolkit.yaml");
    fs::write(
        &path,
        r"
aliases:
  hereditary unit: gene
implicit_domains:
  negated: [gene to gene association]
index:
  eager_descendants: true
",
    )?;
    let config = ToolkitConfig::from_file(&path)?;
    let toolkit = Toolkit::from_file(fixture("biolink-model.yaml"), config)?;
    assert_eq!(toolkit.index().config().aliases["hereditary unit"], "gene");
    assert!(toolkit.index().config().index.eager_descendants);

    assert_eq!(
        toolkit.resolve("Hereditary_Unit").map(|n| n.to_string()),
        Some("gene".to_string())
    );
    assert_eq!(
        toolkit.get_slot_domain("negated", false, false),
        strings(&["association", "gene to gene association"])
    );
    assert!(
        toolkit
            .get_all_slots_with_class_domain("gene to gene association", false, false)
            .contains(&"negated".to_string())
    );

    let stats = toolkit.index().stats();
    assert_eq!(stats.memoized_descendants, stats.elements);
    Ok(())
}

#[test]
fn test_configuration_naming_unknown_class_is_a_defect() {
    init_tracing();
    let config = ToolkitConfig::from_yaml_str("implicit_domains:\n  negated: [gene pool]\n")
        .expect("well-formed configuration");

    let err = Toolkit::from_file(fixture("biolink-model.yaml"), config).unwrap_err();
    assert_eq!(
        err.defects(),
        &[SchemaDefect::DanglingReference {
            element: "negated".to_string(),
            field: "implicit_domains",
            target: "gene pool".to_string(),
        }]
    );
}

#[test]
fn test_custom_roots_and_prefix() -> anyhow::Result<()> {
    let config = ToolkitConfig::from_yaml_str(
        r"
naming:
  prefix: bl
roots:
  category_root: biological entity
",
    )?;
    let toolkit = Toolkit::from_file(fixture("biolink-model.yaml"), config)?;

    assert!(toolkit.is_category("gene"));
    assert!(!toolkit.is_category("drug"));
    assert_eq!(toolkit.format_name("gene").as_deref(), Some("bl:Gene"));
    assert_eq!(toolkit.resolve("bl:Gene").map(|n| n.to_string()), Some("gene".to_string()));
    Ok(())
}
