use crate::error::ExtractError;
use crate::extraction::sniff::{sniff_file, DicomLayout};
use crate::extraction::tags::{is_bulk_pixel_data, keyword_for_tag};
use crate::extraction::value::render_value;
use crate::types::{ExtractOptions, Extraction, FileResult, MetadataRecord};
use dicom_object::file::ReadPreamble;
use dicom_object::mem::InMemElement;
use dicom_object::{DefaultDicomObject, FileMetaTable, InMemDicomObject, OpenFileOptions};
use std::path::Path;

/// Extractor turning DICOM files into flat metadata records
///
/// Every element of the file meta group and the dataset becomes one
/// [`MetadataRecord`], in ascending tag order, except bulk pixel data.
/// Elements stored after the pixel data (odd-group vendor data, digital
/// signatures, trailing padding) are kept.
///
/// # Example
///
/// ```
/// use dcmharvest_core::{DicomExtractor, ExtractOptions};
/// use dicom_object::InMemDicomObject;
/// use dicom_core::{DataElement, PrimitiveValue, VR, Tag};
///
/// let mut dcm = InMemDicomObject::new_empty();
/// dcm.put(DataElement::new(
///     Tag(0x0010, 0x0010), // PatientName
///     VR::PN,
///     PrimitiveValue::from("Doe^Jane"),
/// ));
/// dcm.put(DataElement::new(
///     Tag(0x0008, 0x0060), // Modality
///     VR::CS,
///     PrimitiveValue::from("MG"),
/// ));
///
/// let extractor = DicomExtractor::new(ExtractOptions::default());
/// let records = extractor.records_from_dataset(&dcm);
///
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].tag.to_string(), "(0008,0060)");
/// assert_eq!(records[0].keyword, "Modality");
/// assert_eq!(records[1].value, "Doe^Jane");
/// ```
#[derive(Debug, Clone, Default)]
pub struct DicomExtractor {
    options: ExtractOptions,
}

impl DicomExtractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Extracts one file, folding every failure into the outcome
    ///
    /// Never panics and never returns an error: a file that is not DICOM
    /// is `Skipped`, a file that cannot be read or decoded is `Errored`.
    pub fn extract_file(&self, path: &Path) -> Extraction {
        self.try_extract_file(path).into()
    }

    /// Extracts one file
    ///
    /// # Errors
    ///
    /// - [`ExtractError::Read`] if the file cannot be opened or read
    /// - [`ExtractError::NotDicom`] if the DICM magic is missing
    /// - [`ExtractError::Parse`] if the file is corrupt or truncated
    pub fn try_extract_file(&self, path: &Path) -> Result<FileResult, ExtractError> {
        let preamble = match sniff_file(path)? {
            Some(DicomLayout::Preamble) => ReadPreamble::Always,
            Some(DicomLayout::NoPreamble) => ReadPreamble::Never,
            None => {
                return Err(ExtractError::NotDicom(
                    "no DICM magic at offset 0 or 128".to_string(),
                ))
            }
        };

        let dcm = OpenFileOptions::new()
            .read_preamble(preamble)
            .open_file(path)?;

        Ok(self.records_from_file(&dcm))
    }

    /// Records of an opened file: file meta group first, then the dataset
    pub fn records_from_file(&self, dcm: &DefaultDicomObject) -> FileResult {
        let mut records = if self.options.include_file_meta {
            self.records_from_meta(dcm.meta())
        } else {
            Vec::new()
        };
        records.extend(self.records_from_dataset(dcm));
        records
    }

    /// Records of a dataset, ascending by tag, pixel data excluded
    pub fn records_from_dataset(&self, dcm: &InMemDicomObject) -> FileResult {
        dcm.iter()
            .filter(|elem| !is_bulk_pixel_data(elem.header().tag))
            .map(|elem| self.record(elem))
            .collect()
    }

    /// Records of every attribute present in the file meta table
    fn records_from_meta(&self, meta: &FileMetaTable) -> FileResult {
        // meta elements are all primitive
        meta.to_element_iter()
            .filter_map(|elem| {
                let header = elem.header();
                elem.value()
                    .primitive()
                    .map(|value| InMemElement::new(header.tag, header.vr, value.clone()))
            })
            .map(|elem| self.record(&elem))
            .collect()
    }

    fn record(&self, elem: &InMemElement) -> MetadataRecord {
        let tag = elem.header().tag;
        MetadataRecord::new(tag, keyword_for_tag(tag), render_value(elem, &self.options))
    }
}

/// Extracts one file with the given options
pub fn extract_file(path: &Path, options: &ExtractOptions) -> Extraction {
    DicomExtractor::new(options.clone()).extract_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::tags::PIXEL_DATA;
    use crate::testing::{
        meta_builder, sample_object, write_dicom, write_dicom_with_meta,
        write_dicom_without_preamble,
    };
    use crate::types::{SequenceMode, TagId};
    use dicom_core::{DataElement, PrimitiveValue, Tag, VR};
    use dicom_dictionary_std::tags::{
        DATA_SET_TRAILING_PADDING, PATIENT_NAME, PRIVATE_INFORMATION,
        PRIVATE_INFORMATION_CREATOR_UID, RECEIVING_APPLICATION_ENTITY_TITLE, ROWS,
        SENDING_APPLICATION_ENTITY_TITLE, TRANSFER_SYNTAX_UID,
    };
    use std::fs;
    use tempfile::TempDir;

    fn tags_of(records: &[MetadataRecord]) -> Vec<TagId> {
        records.iter().map(|r| r.tag).collect()
    }

    #[test]
    fn test_extract_valid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("image.dcm");
        write_dicom(&path, sample_object("Doe^Jane"));

        let records = DicomExtractor::default().try_extract_file(&path).unwrap();

        let patient = records
            .iter()
            .find(|r| r.tag == TagId(PATIENT_NAME))
            .unwrap();
        assert_eq!(patient.keyword, "PatientName");
        assert_eq!(patient.value, "Doe^Jane");

        let transfer_syntax = records
            .iter()
            .find(|r| r.tag == TagId(TRANSFER_SYNTAX_UID))
            .unwrap();
        assert_eq!(transfer_syntax.value, "1.2.840.10008.1.2.1");
    }

    #[test]
    fn test_pixel_data_is_never_extracted() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("image.dcm");
        write_dicom(&path, sample_object("Doe^Jane"));

        let records = DicomExtractor::default().try_extract_file(&path).unwrap();

        assert!(!tags_of(&records).contains(&TagId(PIXEL_DATA)));
        assert!(tags_of(&records).contains(&TagId(ROWS)));
    }

    #[test]
    fn test_elements_after_pixel_data_are_extracted() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("image.dcm");
        let mut dcm = sample_object("Doe^Jane");
        dcm.put(DataElement::new(
            Tag(0x7FE1, 0x0010),
            VR::LO,
            PrimitiveValue::from("VENDOR"),
        ));
        dcm.put(DataElement::new(
            DATA_SET_TRAILING_PADDING,
            VR::OB,
            PrimitiveValue::U8(vec![0_u8; 4].into()),
        ));
        write_dicom(&path, dcm);

        let records = DicomExtractor::default().try_extract_file(&path).unwrap();

        let vendor = records
            .iter()
            .find(|r| r.tag == TagId(Tag(0x7FE1, 0x0010)))
            .unwrap();
        assert_eq!(vendor.keyword, "Private Creator");
        assert_eq!(vendor.value, "VENDOR");

        let padding = records
            .iter()
            .find(|r| r.tag == TagId(DATA_SET_TRAILING_PADDING))
            .unwrap();
        assert_eq!(padding.value, "00000000");
        assert!(!tags_of(&records).contains(&TagId(PIXEL_DATA)));
    }

    #[test]
    fn test_every_present_meta_attribute_is_extracted() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("image.dcm");
        let meta = meta_builder()
            .sending_application_entity_title("SENDER")
            .receiving_application_entity_title("RECEIVER")
            .private_information_creator_uid("1.2.3.99")
            .private_information(vec![0x01_u8, 0x02, 0x03, 0x04]);
        write_dicom_with_meta(&path, sample_object("Doe^Jane"), meta);

        let records = DicomExtractor::default().try_extract_file(&path).unwrap();
        let value_of = |tag: Tag| {
            records
                .iter()
                .find(|r| r.tag == TagId(tag))
                .map(|r| r.value.clone())
                .unwrap()
        };

        assert_eq!(value_of(SENDING_APPLICATION_ENTITY_TITLE), "SENDER");
        assert_eq!(value_of(RECEIVING_APPLICATION_ENTITY_TITLE), "RECEIVER");
        assert_eq!(value_of(PRIVATE_INFORMATION_CREATOR_UID), "1.2.3.99");
        assert_eq!(value_of(PRIVATE_INFORMATION), "01020304");
        assert_eq!(value_of(Tag(0x0002, 0x0001)), "0001");
    }

    #[test]
    fn test_records_are_in_header_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("image.dcm");
        write_dicom(&path, sample_object("Doe^Jane"));

        let tags = tags_of(&DicomExtractor::default().try_extract_file(&path).unwrap());
        let mut sorted = tags.clone();
        sorted.sort();

        assert_eq!(tags, sorted);
        assert_eq!(tags[0].group(), 0x0002);
    }

    #[test]
    fn test_file_meta_can_be_left_out() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("image.dcm");
        write_dicom(&path, sample_object("Doe^Jane"));

        let options = ExtractOptions {
            include_file_meta: false,
            ..ExtractOptions::default()
        };
        let records = DicomExtractor::new(options).try_extract_file(&path).unwrap();

        assert!(records.iter().all(|r| r.tag.group() != 0x0002));
    }

    #[test]
    fn test_private_tags_get_placeholder_keywords() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("image.dcm");
        write_dicom(&path, sample_object("Doe^Jane"));

        let records = DicomExtractor::default().try_extract_file(&path).unwrap();

        let creator = records
            .iter()
            .find(|r| r.tag == TagId(Tag(0x0009, 0x0010)))
            .unwrap();
        assert_eq!(creator.keyword, "Private Creator");
        assert_eq!(creator.value, "ACME");

        let blob = records
            .iter()
            .find(|r| r.tag == TagId(Tag(0x0009, 0x1001)))
            .unwrap();
        assert_eq!(blob.keyword, "Private Tag");
        assert_eq!(blob.value, "deadbeef");
    }

    #[test]
    fn test_sequence_mode_applies_to_files() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("image.dcm");
        write_dicom(&path, sample_object("Doe^Jane"));

        let summary = DicomExtractor::default().try_extract_file(&path).unwrap();
        let options = ExtractOptions {
            sequence_mode: SequenceMode::Expand,
            ..ExtractOptions::default()
        };
        let expanded = DicomExtractor::new(options).try_extract_file(&path).unwrap();

        let view = |records: &[MetadataRecord]| {
            records
                .iter()
                .find(|r| r.keyword == "ViewCodeSequence")
                .map(|r| r.value.clone())
                .unwrap()
        };
        assert_eq!(view(&summary), "<Sequence, 1 items>");
        assert_eq!(
            view(&expanded),
            "[{(0008,0100)=R-10242; (0008,0104)=cranio-caudal}]"
        );
    }

    #[test]
    fn test_extract_file_without_preamble() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bare");
        write_dicom_without_preamble(&path, sample_object("Roe^Richard"));

        match DicomExtractor::default().extract_file(&path) {
            Extraction::Extracted(records) => {
                assert!(records.iter().any(|r| r.value == "Roe^Richard"));
            }
            other => panic!("expected Extracted, got {:?}", other),
        }
    }

    #[test]
    fn test_non_dicom_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes");
        fs::write(&path, "plain text, not an image").unwrap();

        assert!(matches!(
            DicomExtractor::default().extract_file(&path),
            Extraction::Skipped(_)
        ));
    }

    #[test]
    fn test_truncated_file_is_errored() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.dcm");
        write_dicom(&path, sample_object("Doe^Jane"));

        let bytes = fs::read(&path).unwrap();
        fs::write(&path, &bytes[..140]).unwrap();

        assert!(matches!(
            DicomExtractor::default().extract_file(&path),
            Extraction::Errored(_)
        ));
    }

    #[test]
    fn test_missing_file_is_errored() {
        let temp_dir = TempDir::new().unwrap();
        let outcome = extract_file(&temp_dir.path().join("gone.dcm"), &ExtractOptions::default());

        assert!(matches!(outcome, Extraction::Errored(_)));
    }
}
