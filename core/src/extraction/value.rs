use crate::error::TagValueError;
use crate::types::{ExtractOptions, SequenceMode, TagId};
use dicom_core::value::{PrimitiveValue, Value};
use dicom_core::VR;
use dicom_object::mem::InMemElement;
use dicom_object::InMemDicomObject;

use super::tags::is_bulk_pixel_data;

/// Nested sequences deeper than this are not expanded
pub const MAX_SEQUENCE_DEPTH: usize = 16;

/// Number of leading bytes shown in a binary summary
const SUMMARY_HEX_BYTES: usize = 16;

/// Renders an element value as text, never failing
///
/// A value that cannot be rendered becomes `<Unreadable value: reason>`
/// so one bad tag does not cost the rest of the file.
pub fn render_value(elem: &InMemElement, options: &ExtractOptions) -> String {
    match render_element(elem, options, 0) {
        Ok(text) => text,
        Err(e) => unreadable_placeholder(&e),
    }
}

/// Placeholder used when a single value cannot be rendered
pub fn unreadable_placeholder(e: &TagValueError) -> String {
    format!("<Unreadable value: {}>", e)
}

/// Renders an element value as text
///
/// # Rendering
///
/// - text and numbers: DICOM string form, multiple values joined by `\`
/// - binary VRs: UTF-8 text when printable, hex otherwise, summary when
///   longer than `max_binary_length`
/// - sequences: `<Sequence, N items>` or, in expand mode,
///   `[{(GGGG,EEEE)=value; ...}, ...]`
/// - encapsulated fragments: `<Encapsulated data, N fragments>`
pub fn render_element(
    elem: &InMemElement,
    options: &ExtractOptions,
    depth: usize,
) -> Result<String, TagValueError> {
    match elem.value() {
        Value::Primitive(PrimitiveValue::Empty) => Ok(String::new()),
        Value::Primitive(primitive) if is_binary_vr(elem.header().vr) => {
            Ok(render_bytes(&primitive.to_bytes(), options.max_binary_length))
        }
        Value::Primitive(_) => {
            let text = elem.to_str()?;
            Ok(trim_padding(&text).to_string())
        }
        Value::Sequence(seq) => match options.sequence_mode {
            SequenceMode::Summary => Ok(format!("<Sequence, {} items>", seq.items().len())),
            SequenceMode::Expand => render_items(seq.items(), options, depth + 1),
        },
        Value::PixelSequence(seq) => Ok(format!(
            "<Encapsulated data, {} fragments>",
            seq.fragments().len()
        )),
    }
}

/// Renders sequence items as `[{tag=value; ...}, ...]`
fn render_items(
    items: &[InMemDicomObject],
    options: &ExtractOptions,
    depth: usize,
) -> Result<String, TagValueError> {
    if depth > MAX_SEQUENCE_DEPTH {
        return Err(TagValueError(format!(
            "sequence nesting deeper than {} levels",
            MAX_SEQUENCE_DEPTH
        )));
    }

    let mut rendered = Vec::with_capacity(items.len());
    for item in items {
        let mut fields = Vec::new();
        for elem in item.iter() {
            let tag = elem.header().tag;
            if is_bulk_pixel_data(tag) {
                continue;
            }
            let value = render_element(elem, options, depth)?;
            fields.push(format!("{}={}", TagId(tag), value));
        }
        rendered.push(format!("{{{}}}", fields.join("; ")));
    }

    Ok(format!("[{}]", rendered.join(", ")))
}

/// Value representations carrying raw bytes
pub fn is_binary_vr(vr: VR) -> bool {
    matches!(
        vr,
        VR::OB | VR::OW | VR::OD | VR::OF | VR::OL | VR::OV | VR::UN
    )
}

/// Renders a byte payload as text
pub fn render_bytes(bytes: &[u8], max_length: usize) -> String {
    if bytes.len() > max_length {
        let head = &bytes[..bytes.len().min(SUMMARY_HEX_BYTES)];
        return format!(
            "<Binary data, {} bytes, first {} hex: {}...>",
            bytes.len(),
            head.len(),
            to_hex(head)
        );
    }

    // padding-only payloads (all NULs) fall through to hex
    match std::str::from_utf8(bytes).map(trim_padding) {
        Ok(text) if !text.is_empty() && is_printable(text) => text.to_string(),
        _ => to_hex(bytes),
    }
}

/// Lowercase hex string
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Strips DICOM value padding (trailing spaces and NULs)
fn trim_padding(text: &str) -> &str {
    text.trim_end_matches([' ', '\0'])
}

fn is_printable(text: &str) -> bool {
    text.chars()
        .all(|c| !c.is_control() || matches!(c, '\t' | '\n' | '\r'))
}
