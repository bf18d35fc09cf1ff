use dicom_core::dictionary::DataDictionary;
use dicom_core::Tag;
use dicom_dictionary_std::StandardDataDictionary;

// Bulk Pixel Data Tags
pub const FLOAT_PIXEL_DATA: Tag = Tag(0x7FE0, 0x0008);
pub const DOUBLE_FLOAT_PIXEL_DATA: Tag = Tag(0x7FE0, 0x0009);
pub const PIXEL_DATA: Tag = Tag(0x7FE0, 0x0010);

/// Tags never emitted as records
pub const BULK_PIXEL_DATA_TAGS: [Tag; 3] = [FLOAT_PIXEL_DATA, DOUBLE_FLOAT_PIXEL_DATA, PIXEL_DATA];

// Keyword placeholders for tags the dictionary does not know
pub const PRIVATE_CREATOR_KEYWORD: &str = "Private Creator";
pub const PRIVATE_TAG_KEYWORD: &str = "Private Tag";
pub const GROUP_LENGTH_KEYWORD: &str = "GroupLength";
pub const UNKNOWN_TAG_KEYWORD: &str = "Unknown Standard Tag";

/// Whether `tag` holds bulk pixel data
pub fn is_bulk_pixel_data(tag: Tag) -> bool {
    BULK_PIXEL_DATA_TAGS.contains(&tag)
}

/// Looks up the standard dictionary keyword for a tag
///
/// Returns `None` for private and unknown tags.
pub fn lookup_keyword(tag: Tag) -> Option<&'static str> {
    StandardDataDictionary
        .by_tag(tag)
        .map(|entry| entry.alias)
        .filter(|alias| !alias.is_empty())
}

/// Keyword for a tag, never empty
///
/// # Fallbacks
///
/// - private creator element (odd group, element 0x0010-0x00FF) → "Private Creator"
/// - other private tags → "Private Tag"
/// - group length (gggg,0000) → "GroupLength"
/// - anything else → "Unknown Standard Tag"
pub fn keyword_for_tag(tag: Tag) -> &'static str {
    if tag.group() % 2 == 1 {
        return if (0x0010..=0x00FF).contains(&tag.element()) {
            PRIVATE_CREATOR_KEYWORD
        } else {
            PRIVATE_TAG_KEYWORD
        };
    }

    lookup_keyword(tag).unwrap_or(if tag.element() == 0x0000 {
        GROUP_LENGTH_KEYWORD
    } else {
        UNKNOWN_TAG_KEYWORD
    })
}
