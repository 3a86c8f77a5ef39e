pub mod books;
pub mod crops;
pub mod img_path;
pub mod parse;
