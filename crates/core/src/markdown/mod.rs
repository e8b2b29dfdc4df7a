//! Pure text operations over note content: wiki-link extraction and
//! heading-scoped section slicing.

pub mod links;
pub mod section;

pub use links::{WikiLink, extract_links, scan_links};
pub use section::{HeadingInfo, extract_section, find_headings, normalize_heading};
