use manga109_core::error::Manga109Error;
use serde::Serialize;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), Manga109Error> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
