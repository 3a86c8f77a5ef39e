use manga109_core::catalog::Catalog;
use manga109_core::error::Manga109Error;
use std::path::Path;

pub fn run(root: &Path, book: &str, index: i64) -> Result<(), Manga109Error> {
    let catalog = Catalog::open(root)?;
    let path = catalog.image_path(book, index)?;
    println!("{}", path.display());
    Ok(())
}
