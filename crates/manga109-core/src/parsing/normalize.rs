use crate::error::Manga109Error;
use crate::model::{
    AnnotationDocument, Attributes, Character, OutputMode, Page, PageRegions, Region,
    TaggedRegions,
};
use crate::parsing::values::{coerce_literal, parse_integer};
use crate::parsing::xml::Element;

/// Normalize a raw `<book>` tree into an `AnnotationDocument`.
///
/// The tree is only borrowed. `title` on the root and a `pages` child are
/// required; a missing `characters` child yields an empty character list.
/// Character and region records never fail: missing `id`/`name` stay `None`.
pub fn normalize(root: &Element, mode: OutputMode) -> Result<AnnotationDocument, Manga109Error> {
    let title = root
        .attr("title")
        .ok_or_else(|| {
            Manga109Error::MalformedAnnotation(format!(
                "root element <{}> has no 'title' attribute",
                root.tag
            ))
        })?
        .to_string();

    let characters = match root.child("characters") {
        Some(section) => section
            .children
            .iter()
            .map(normalize_character)
            .collect(),
        None => Vec::new(),
    };

    let pages = root
        .child("pages")
        .ok_or_else(|| {
            Manga109Error::MalformedAnnotation(format!("book '{title}' has no <pages> element"))
        })?
        .children
        .iter()
        .map(|page| normalize_page(page, mode))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AnnotationDocument {
        title,
        characters,
        pages,
    })
}

fn normalize_character(element: &Element) -> Character {
    Character {
        id: element.attr("id").map(str::to_string),
        name: element.attr("name").map(str::to_string),
        attributes: coerce_attributes(element, &["id", "name"]),
    }
}

fn normalize_page(element: &Element, mode: OutputMode) -> Result<Page, Manga109Error> {
    let index = required_int(element, "index")?;
    let width = required_int(element, "width")?;
    let height = required_int(element, "height")?;
    let attributes = coerce_attributes(element, &["index", "width", "height"]);

    let regions = element.children.iter().map(normalize_region);
    let regions = match mode {
        OutputMode::Tagged => {
            let mut tagged = TaggedRegions::default();
            for region in regions {
                tagged.push(region);
            }
            PageRegions::Tagged(tagged)
        }
        OutputMode::Flat => PageRegions::Flat {
            contents: regions.collect(),
        },
    };

    Ok(Page {
        index,
        width,
        height,
        attributes,
        regions,
    })
}

fn normalize_region(element: &Element) -> Region {
    Region {
        id: element.attr("id").map(str::to_string),
        kind: element.tag.clone(),
        text: element.text.as_ref().filter(|t| !t.is_empty()).cloned(),
        attributes: coerce_attributes(element, &["id"]),
    }
}

fn coerce_attributes(element: &Element, typed: &[&str]) -> Attributes {
    element
        .attributes
        .iter()
        .filter(|(name, _)| !typed.contains(&name.as_str()))
        .map(|(name, raw)| (name.clone(), coerce_literal(raw)))
        .collect()
}

fn required_int(element: &Element, name: &str) -> Result<i64, Manga109Error> {
    let raw = element.attr(name).ok_or_else(|| {
        Manga109Error::MalformedAnnotation(format!(
            "<{}> has no '{}' attribute",
            element.tag, name
        ))
    })?;
    parse_integer(raw).ok_or_else(|| {
        Manga109Error::MalformedAnnotation(format!(
            "<{}> attribute '{}' is not an integer: '{}'",
            element.tag, name, raw
        ))
    })
}
