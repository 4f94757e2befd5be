//! Catalog file commands.

use std::io::Write;
use std::path::Path;

use dewdrop_admin::catalog::{CatalogError, CatalogFile, seed_catalog};

/// Write the seed catalog to `output`, or stdout when `None`.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn export(output: Option<&Path>) -> Result<(), CatalogError> {
    let catalog = seed_catalog()?;
    match output {
        Some(path) => {
            catalog.write(path)?;
            tracing::info!(
                path = %path.display(),
                products = catalog.products.len(),
                categories = catalog.categories.len(),
                "Catalog exported"
            );
        }
        None => std::io::stdout().lock().write_all(catalog.to_json()?.as_bytes())?,
    }
    Ok(())
}

/// Parse and check a catalog file.
///
/// # Errors
///
/// Returns the first parse or validation error.
pub fn validate(path: &Path) -> Result<(), CatalogError> {
    let catalog = CatalogFile::read(path)?;
    catalog.validate()?;
    tracing::info!(
        path = %path.display(),
        products = catalog.products.len(),
        categories = catalog.categories.len(),
        "Catalog is valid"
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_path() -> std::path::PathBuf {
        std::env::temp_dir().join(format!("dd-cli-{}.json", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_exported_catalog_validates() {
        let path = temp_path();
        export(Some(&path)).unwrap();
        validate(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_validate_rejects_dangling_category() {
        let path = temp_path();
        let mut catalog = seed_catalog().unwrap();
        catalog.categories.clear();
        catalog.write(&path).unwrap();

        assert!(matches!(validate(&path), Err(CatalogError::Validation(_))));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_validate_missing_file() {
        assert!(matches!(
            validate(&temp_path()),
            Err(CatalogError::Io(_))
        ));
    }
}
