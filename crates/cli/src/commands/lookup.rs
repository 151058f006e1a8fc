//! Lookup and show command implementation
//!
//! `analytics-mock lookup <ids>...` runs the same filter the HTTP endpoint
//! runs and prints the response envelope. `analytics-mock show` prints the
//! entire catalog. Neither starts a listener.

use anyhow::{Context, Result};
use analytics_catalog::{Catalog, CatalogSource};
use analytics_protocol::GetByIdsResponse;

/// Arguments for the lookup command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupArgs {
    /// Identifiers to look up
    pub ids: Vec<String>,
    /// Catalog to query
    pub source: CatalogSource,
}

/// Execute the lookup command
pub fn execute_lookup_command(args: LookupArgs) -> Result<()> {
    let catalog = load(&args.source)?;
    println!("{}", render_lookup(&catalog, &args.ids)?);
    Ok(())
}

/// Execute the show command
pub fn execute_show_command(source: &CatalogSource) -> Result<()> {
    let catalog = load(source)?;
    println!("{}", render_catalog(&catalog)?);
    Ok(())
}

fn load(source: &CatalogSource) -> Result<Catalog> {
    source
        .load()
        .with_context(|| format!("Failed to load catalog from {}", source))
}

/// Pretty JSON of the `{"analytics": ...}` envelope for `ids`.
pub fn render_lookup(catalog: &Catalog, ids: &[String]) -> Result<String> {
    let response = GetByIdsResponse::new(catalog.get_by_ids(ids));
    serde_json::to_string_pretty(&response).context("Failed to encode lookup response")
}

/// Pretty JSON of every catalog entry, in key order.
pub fn render_catalog(catalog: &Catalog) -> Result<String> {
    serde_json::to_string_pretty(&catalog.snapshot()).context("Failed to encode catalog")
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics_catalog::CatalogVariant;
    use serde_json::{json, Value};
    use std::io::Write;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_render_lookup_matches_endpoint_shape() {
        let catalog = Catalog::builtin(CatalogVariant::Reduced);
        let rendered = render_lookup(&catalog, &ids(&["func1", "unknown"])).unwrap();
        let value: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value, json!({"analytics": {"func1": {"errors": 15}}}));
    }

    #[test]
    fn test_render_lookup_empty() {
        let catalog = Catalog::builtin(CatalogVariant::Full);
        let rendered = render_lookup(&catalog, &[]).unwrap();
        let value: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value, json!({"analytics": {}}));
    }

    #[test]
    fn test_render_catalog_lists_every_entry() {
        let catalog = Catalog::builtin(CatalogVariant::Full);
        let value: Value = serde_json::from_str(&render_catalog(&catalog).unwrap()).unwrap();
        let entries = value.as_object().unwrap();
        assert_eq!(entries.len(), catalog.len());
        assert_eq!(entries["B.func"], json!({"trend": "down", "errorFlows": []}));
    }

    #[test]
    fn test_lookup_against_catalog_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"svc.run": {{"errors": 9}}}}"#).unwrap();

        let args = LookupArgs {
            ids: ids(&["svc.run"]),
            source: CatalogSource::File(file.path().to_path_buf()),
        };
        assert!(execute_lookup_command(args).is_ok());
    }

    #[test]
    fn test_show_reports_bad_catalog_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let source = CatalogSource::File(file.path().to_path_buf());
        let err = execute_show_command(&source).unwrap_err();
        assert!(err.to_string().contains("Failed to load catalog"));
    }
}
