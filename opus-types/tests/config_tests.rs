use opus_types::{ConfigAccessor, RepositoryConfig};
use pretty_assertions::assert_eq;
use std::io::Write;

const SAMPLE: &str = r#"
[model]
field_descriptor = "default"

[field_types]
disabled = ["TextareaType", "BooleanType"]

[urn]
nid = "nbn:de"
nss = "kobv:83-opus"
"#;

// ── Lookup ───────────────────────────────────────────────────────

#[test]
fn dotted_key_lookup() {
    let config = RepositoryConfig::from_toml_str(SAMPLE).unwrap();
    assert_eq!(config.get("model.field_descriptor").as_deref(), Some("default"));
    assert_eq!(config.get("urn.nss").as_deref(), Some("kobv:83-opus"));
}

#[test]
fn missing_key_is_none() {
    let config = RepositoryConfig::from_toml_str(SAMPLE).unwrap();
    assert!(config.get("model.missing").is_none());
    assert!(config.get("nothing.at.all").is_none());
}

#[test]
fn array_list_lookup() {
    let config = RepositoryConfig::from_toml_str(SAMPLE).unwrap();
    assert_eq!(
        config.get_list("field_types.disabled"),
        vec!["TextareaType".to_string(), "BooleanType".to_string()]
    );
}

#[test]
fn comma_separated_list_lookup() {
    let config = RepositoryConfig::from_toml_str("[field_types]\ndisabled = \"A, B,,C\"").unwrap();
    assert_eq!(config.get_list("field_types.disabled"), vec!["A", "B", "C"]);
}

#[test]
fn missing_list_is_empty() {
    let config = RepositoryConfig::empty();
    assert!(config.get_list("field_types.disabled").is_empty());
}

#[test]
fn non_string_values_are_rendered() {
    let config = RepositoryConfig::from_toml_str("[limits]\nmax = 80\nstrict = true").unwrap();
    assert_eq!(config.get("limits.max").as_deref(), Some("80"));
    assert_eq!(config.get("limits.strict").as_deref(), Some("true"));
}

#[test]
fn set_creates_intermediate_tables() {
    let mut config = RepositoryConfig::empty();
    config.set("urn.nid", "nbn:de");
    config.set("urn.nss", "test");
    assert_eq!(config.get("urn.nid").as_deref(), Some("nbn:de"));
    assert_eq!(config.get("urn.nss").as_deref(), Some("test"));
}

#[test]
fn set_replaces_scalar_with_table() {
    let mut config = RepositoryConfig::from_toml_str("urn = \"flat\"").unwrap();
    config.set("urn.nid", "nbn:de");
    assert_eq!(config.get("urn.nid").as_deref(), Some("nbn:de"));
}

// ── Parsing / loading ────────────────────────────────────────────

#[test]
fn invalid_toml_is_an_error() {
    let err = RepositoryConfig::from_toml_str("[model\nbroken").unwrap_err();
    assert!(format!("{err}").contains("config error"));
}

#[test]
fn load_from_missing_file_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let config = RepositoryConfig::load_from(dir.path().join("absent.toml"));
    assert!(config.source().is_none());
    assert!(config.get("model.field_descriptor").is_none());
}

#[test]
fn load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SAMPLE.as_bytes()).unwrap();
    let config = RepositoryConfig::load_from(file.path());
    assert_eq!(config.source(), Some(file.path()));
    assert_eq!(config.get("urn.nid").as_deref(), Some("nbn:de"));
}

#[test]
fn load_from_malformed_file_falls_back() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"not = [valid").unwrap();
    let config = RepositoryConfig::load_from(file.path());
    assert_eq!(config.source(), Some(file.path()));
    assert!(config.get("not").is_none());
}

// ── Default list splitting ───────────────────────────────────────

struct Fixed(&'static str);

impl ConfigAccessor for Fixed {
    fn get(&self, _key: &str) -> Option<String> {
        Some(self.0.to_string())
    }
}

#[test]
fn default_get_list_splits_on_commas() {
    let config = Fixed("RegexType , SelectType");
    assert_eq!(config.get_list("any"), vec!["RegexType", "SelectType"]);
}
