use std::path::{Path, PathBuf};

use crate::error::Manga109Error;

/// File name of the book manifest under the dataset root.
pub const MANIFEST_FILE: &str = "books.txt";

/// Default annotation subdirectory under the dataset root.
pub const DEFAULT_ANNOTATION_TYPE: &str = "annotations";

/// The set of books in a Manga109 dataset, in manifest order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    root: PathBuf,
    books: Vec<String>,
}

impl Catalog {
    /// Load `<root>/books.txt`.
    pub fn open(root: impl AsRef<Path>) -> Result<Catalog, Manga109Error> {
        Catalog::load(root.as_ref().join(MANIFEST_FILE))
    }

    /// Load a manifest file; its parent directory becomes the dataset root.
    ///
    /// One book per line, order and duplicates kept. An empty manifest
    /// yields an empty catalog.
    pub fn load(manifest_path: impl AsRef<Path>) -> Result<Catalog, Manga109Error> {
        let manifest_path = manifest_path.as_ref();
        let content =
            std::fs::read_to_string(manifest_path).map_err(|source| Manga109Error::Io {
                path: manifest_path.to_path_buf(),
                source,
            })?;

        let root = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let catalog = Catalog::from_manifest(root, &content);

        tracing::debug!(
            manifest = %manifest_path.display(),
            books = catalog.len(),
            "loaded book manifest"
        );

        Ok(catalog)
    }

    /// Build a catalog from manifest text already in memory.
    pub fn from_manifest(root: impl Into<PathBuf>, content: &str) -> Catalog {
        Catalog {
            root: root.into(),
            books: content.lines().map(str::to_string).collect(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn books(&self) -> &[String] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn contains(&self, book: &str) -> bool {
        self.books.iter().any(|b| b == book)
    }

    fn check_book(&self, book: &str) -> Result<(), Manga109Error> {
        if self.contains(book) {
            Ok(())
        } else {
            Err(Manga109Error::InvalidArgument(format!(
                "unknown book '{book}' (not listed in {})",
                self.root.join(MANIFEST_FILE).display()
            )))
        }
    }

    /// Absolute path of a page image: `<root>/images/<book>/<NNN>.jpg`.
    ///
    /// The index is zero-padded to at least three digits; wider indices
    /// keep all their digits.
    pub fn image_path(&self, book: &str, index: i64) -> Result<PathBuf, Manga109Error> {
        self.check_book(book)?;
        if index < 0 {
            return Err(Manga109Error::InvalidArgument(format!(
                "page index must be non-negative, got {index}"
            )));
        }

        let path = self
            .root
            .join("images")
            .join(book)
            .join(format!("{index:03}.jpg"));
        absolute(&path)
    }

    /// Path of a book's annotation file: `<root>/<annotation_type>/<book>.xml`.
    pub fn annotation_path(
        &self,
        book: &str,
        annotation_type: &str,
    ) -> Result<PathBuf, Manga109Error> {
        self.check_book(book)?;
        Ok(self
            .root
            .join(annotation_type)
            .join(format!("{book}.xml")))
    }
}

fn absolute(path: &Path) -> Result<PathBuf, Manga109Error> {
    std::path::absolute(path).map_err(|source| Manga109Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
