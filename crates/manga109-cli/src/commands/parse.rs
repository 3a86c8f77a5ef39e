use manga109_core::catalog::Catalog;
use manga109_core::error::Manga109Error;
use manga109_core::model::OutputMode;
use manga109_core::AnnotationOptions;
use std::path::{Path, PathBuf};

use crate::output;

pub fn run(
    root: &Path,
    book: &str,
    mode: &str,
    annotation_type: String,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<(), Manga109Error> {
    let mode = parse_mode(mode)?;
    let catalog = Catalog::open(root)?;
    let options = AnnotationOptions {
        annotation_type,
        mode,
    };
    let doc = manga109_core::load_annotation(&catalog, book, &options)?;

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            let json = serde_json::to_string_pretty(&doc)?;
            std::fs::write(&path, json).map_err(|source| Manga109Error::Io {
                path: path.clone(),
                source,
            })?;
            tracing::info!(
                book = %doc.title,
                pages = doc.pages.len(),
                path = %path.display(),
                "wrote parsed annotation"
            );
        }
        None => match output_format {
            "json" => output::json::print(&doc)?,
            _ => print!("{}", output::table::format_document(&doc)),
        },
    }

    Ok(())
}

pub fn parse_mode(mode: &str) -> Result<OutputMode, Manga109Error> {
    OutputMode::from_str_loose(mode).ok_or_else(|| {
        Manga109Error::InvalidArgument(format!(
            "unknown mode '{mode}' (expected 'tagged' or 'flat')"
        ))
    })
}
