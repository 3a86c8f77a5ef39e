use manga109_core::catalog::Catalog;
use manga109_core::error::Manga109Error;
use manga109_core::extract::{plan_crops, CropRequest};
use manga109_core::AnnotationOptions;
use std::path::Path;

use crate::output;

pub fn run(
    root: &Path,
    book: String,
    kind: String,
    pages: usize,
    min_size: i64,
    annotation_type: String,
    output_format: &str,
) -> Result<(), Manga109Error> {
    let catalog = Catalog::open(root)?;
    let options = AnnotationOptions {
        annotation_type,
        ..Default::default()
    };
    let doc = manga109_core::load_annotation(&catalog, &book, &options)?;

    let request = CropRequest {
        book,
        kind,
        pages,
        min_size,
    };
    let targets = plan_crops(&catalog, &doc, &request)?;

    match output_format {
        "json" => output::json::print(&targets)?,
        _ => output::table::print_crops(&targets),
    }

    tracing::info!(
        book = %request.book,
        kind = %request.kind,
        regions = targets.len(),
        "planned crops"
    );

    Ok(())
}
