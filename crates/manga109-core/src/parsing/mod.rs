pub mod normalize;
pub mod values;
pub mod xml;

use crate::error::Manga109Error;
use crate::model::{AnnotationDocument, OutputMode};
use normalize::normalize;
use xml::parse_element_tree;

/// Parse an annotation XML document and normalize it in one step.
pub fn parse_annotation(
    xml: &str,
    mode: OutputMode,
) -> Result<AnnotationDocument, Manga109Error> {
    let root = parse_element_tree(xml)?;
    let document = normalize(&root, mode)?;

    tracing::debug!(
        title = %document.title,
        characters = document.characters.len(),
        pages = document.pages.len(),
        %mode,
        "normalized annotation"
    );

    Ok(document)
}
