use manga109_core::catalog::Catalog;
use manga109_core::error::Manga109Error;
use std::path::Path;

pub fn run(root: &Path) -> Result<(), Manga109Error> {
    let catalog = Catalog::open(root)?;
    for book in catalog.books() {
        println!("{book}");
    }
    tracing::info!(books = catalog.len(), root = %root.display(), "listed manifest");
    Ok(())
}
