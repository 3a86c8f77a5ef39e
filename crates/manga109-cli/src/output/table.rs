use manga109_core::extract::CropTarget;
use manga109_core::model::{AnnotationDocument, PageRegions};

/// Human-readable summary of a normalized annotation.
pub fn format_document(doc: &AnnotationDocument) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== {} ===\n\n", doc.title));

    out.push_str(&format!("  Characters: {}\n", doc.characters.len()));
    if !doc.characters.is_empty() {
        let max_id = doc
            .characters
            .iter()
            .map(|c| c.id.as_deref().unwrap_or("-").len())
            .max()
            .unwrap_or(8);
        for c in &doc.characters {
            out.push_str(&format!(
                "    {:<width$}  {}\n",
                c.id.as_deref().unwrap_or("-"),
                c.name.as_deref().unwrap_or("-"),
                width = max_id
            ));
        }
    }
    out.push('\n');

    let Some(first) = doc.pages.first() else {
        out.push_str("  Pages: 0\n");
        return out;
    };
    out.push_str(&format!(
        "  Pages: {} ({} layout)\n\n",
        doc.pages.len(),
        first.mode()
    ));

    let columns = region_columns(doc);
    out.push_str(&format!("  {:>6}  {:>11}", "Index", "Size"));
    for col in &columns {
        out.push_str(&format!("  {:>8}", col));
    }
    out.push_str(&format!("  {:>8}\n", "Total"));
    out.push_str(&format!("  {}\n", "-".repeat(31 + columns.len() * 10)));

    for page in &doc.pages {
        let size = format!("{}x{}", page.width, page.height);
        out.push_str(&format!("  {:>6}  {:>11}", page.index, size));
        for col in &columns {
            let count = match (&page.regions, col.as_str()) {
                (PageRegions::Flat { contents }, "contents") => contents.len(),
                _ => page.regions_of(col).len(),
            };
            out.push_str(&format!("  {:>8}", count));
        }
        out.push_str(&format!("  {:>8}\n", page.region_count()));
    }

    out
}

/// Column names: the known kinds (plus extensions seen anywhere) for
/// tagged documents, a single `contents` column for flat ones.
fn region_columns(doc: &AnnotationDocument) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for page in &doc.pages {
        let names: Vec<&str> = match &page.regions {
            PageRegions::Tagged(tagged) => tagged.iter().map(|(name, _)| name).collect(),
            PageRegions::Flat { .. } => vec!["contents"],
        };
        for name in names {
            if !columns.iter().any(|c| c == name) {
                columns.push(name.to_string());
            }
        }
    }
    columns
}

pub fn print_crops(targets: &[CropTarget]) {
    if targets.is_empty() {
        println!("No regions to crop.");
        return;
    }

    let max_id = targets
        .iter()
        .map(|t| t.region_id.as_deref().unwrap_or("-").len())
        .max()
        .unwrap_or(8);

    println!(
        "  {:>5}  {:<width$}  {:>6} {:>6} {:>6} {:>6}  Image",
        "Page",
        "Region",
        "xmin",
        "ymin",
        "xmax",
        "ymax",
        width = max_id
    );
    for t in targets {
        println!(
            "  {:>5}  {:<width$}  {:>6} {:>6} {:>6} {:>6}  {}",
            t.page,
            t.region_id.as_deref().unwrap_or("-"),
            t.bbox.xmin,
            t.bbox.ymin,
            t.bbox.xmax,
            t.bbox.ymax,
            t.image_path.display(),
            width = max_id
        );
    }
    println!("\n  {} region(s)", targets.len());
}
