pub mod catalog;
pub mod error;
pub mod extract;
pub mod model;
pub mod parsing;

use catalog::{Catalog, DEFAULT_ANNOTATION_TYPE};
use error::Manga109Error;
use model::{AnnotationDocument, OutputMode};

/// Options for loading a book's annotation.
#[derive(Debug, Clone)]
pub struct AnnotationOptions {
    /// Subdirectory of the dataset root holding `<book>.xml` files.
    pub annotation_type: String,
    pub mode: OutputMode,
}

impl Default for AnnotationOptions {
    fn default() -> Self {
        Self {
            annotation_type: DEFAULT_ANNOTATION_TYPE.to_string(),
            mode: OutputMode::default(),
        }
    }
}

/// Main API entry point: read and normalize the annotation of one book.
///
/// The book must be listed in the catalog. The file is read from
/// `<root>/<annotation_type>/<book>.xml`.
pub fn load_annotation(
    catalog: &Catalog,
    book: &str,
    options: &AnnotationOptions,
) -> Result<AnnotationDocument, Manga109Error> {
    let path = catalog.annotation_path(book, &options.annotation_type)?;
    let xml = std::fs::read_to_string(&path).map_err(|source| Manga109Error::Io {
        path: path.clone(),
        source,
    })?;

    tracing::debug!(path = %path.display(), bytes = xml.len(), "read annotation file");

    parsing::parse_annotation(&xml, options.mode).map_err(|e| match e {
        Manga109Error::ParseError(reason) => Manga109Error::Xml { path, reason },
        other => other,
    })
}
