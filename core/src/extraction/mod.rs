pub mod sniff;
pub mod tags;
pub mod value;

pub use sniff::{sniff_file, DicomLayout};
pub use tags::{is_bulk_pixel_data, keyword_for_tag, lookup_keyword};
pub use value::{render_bytes, render_value};
