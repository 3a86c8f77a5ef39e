//! Crop planning for region extraction.
//!
//! Decides which annotated regions of a book are cut out of which page
//! images. Decoding and writing images is left to the caller.

use std::path::PathBuf;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::Manga109Error;
use crate::model::{AnnotationDocument, BoundingBox};

pub const DEFAULT_MIN_SIZE: i64 = 128;

#[derive(Debug, Clone)]
pub struct CropRequest {
    pub book: String,
    /// Region tag to extract (`frame`, `face`, `body`, `text` or an extension).
    pub kind: String,
    /// Number of leading pages to scan.
    pub pages: usize,
    /// Regions narrower or shorter than half this size are skipped. The
    /// half is exact: an odd size never rounds down.
    pub min_size: i64,
}

impl CropRequest {
    pub fn new(book: impl Into<String>, kind: impl Into<String>) -> Self {
        CropRequest {
            book: book.into(),
            kind: kind.into(),
            pages: 1,
            min_size: DEFAULT_MIN_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CropTarget {
    pub page: i64,
    pub image_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_id: Option<String>,
    pub bbox: BoundingBox,
}

/// List the crops for the first `request.pages` pages of `document`.
pub fn plan_crops(
    catalog: &Catalog,
    document: &AnnotationDocument,
    request: &CropRequest,
) -> Result<Vec<CropTarget>, Manga109Error> {
    if request.kind.is_empty() {
        return Err(Manga109Error::InvalidArgument(
            "region kind must not be empty".into(),
        ));
    }
    if !catalog.contains(&request.book) {
        return Err(Manga109Error::InvalidArgument(format!(
            "unknown book '{}'",
            request.book
        )));
    }

    let mut targets = Vec::new();

    for page in document.pages.iter().take(request.pages) {
        // Page images are named by the `index` attribute, not the position.
        let image_path = catalog.image_path(&request.book, page.index)?;
        let mut kept = 0usize;

        for region in page.regions_of(&request.kind) {
            let Some(bbox) = region.bbox() else {
                tracing::debug!(
                    region = ?region.id,
                    "skipping region without integer bounding box"
                );
                continue;
            };
            if !is_large_enough(&bbox, request.min_size) {
                continue;
            }
            kept += 1;
            targets.push(CropTarget {
                page: page.index,
                image_path: image_path.clone(),
                region_id: region.id.clone(),
                bbox,
            });
        }

        tracing::debug!(
            book = %request.book,
            page = page.index,
            kind = %request.kind,
            kept,
            "planned crops"
        );
    }

    Ok(targets)
}

/// Both sides at least `min_size / 2`, compared without truncating the half.
fn is_large_enough(bbox: &BoundingBox, min_size: i64) -> bool {
    2 * bbox.width() >= min_size && 2 * bbox.height() >= min_size
}
