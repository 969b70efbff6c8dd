mod layout;
mod render;

pub use layout::{build_document, number_pages, Align, Element, Page, PagedDocument};
pub use render::render_pdf;
