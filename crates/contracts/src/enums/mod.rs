pub mod mime_category;

pub use mime_category::MimeCategory;
