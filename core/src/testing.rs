//! DICOM fixtures for unit tests

use crate::extraction::tags::PIXEL_DATA;
use dicom_core::value::DataSetSequence;
use dicom_core::{DataElement, PrimitiveValue, Tag, VR};
use dicom_dictionary_std::tags::{
    CODE_MEANING, CODE_VALUE, COLUMNS, MODALITY, PATIENT_ID, PATIENT_NAME, ROWS, SOP_CLASS_UID,
    SOP_INSTANCE_UID, VIEW_CODE_SEQUENCE,
};
use dicom_object::{FileMetaTableBuilder, InMemDicomObject};
use std::fs;
use std::path::Path;

const SOP_CLASS: &str = "1.2.840.10008.5.1.4.1.1.1.2";
const EXPLICIT_VR_LITTLE_ENDIAN: &str = "1.2.840.10008.1.2.1";

/// A small mammography-like dataset with a sequence, private tags and pixel data
pub fn sample_object(patient_name: &str) -> InMemDicomObject {
    let view_item = InMemDicomObject::from_element_iter([
        DataElement::new(CODE_VALUE, VR::SH, PrimitiveValue::from("R-10242")),
        DataElement::new(CODE_MEANING, VR::LO, PrimitiveValue::from("cranio-caudal")),
    ]);

    InMemDicomObject::from_element_iter([
        DataElement::new(SOP_CLASS_UID, VR::UI, PrimitiveValue::from(SOP_CLASS)),
        DataElement::new(SOP_INSTANCE_UID, VR::UI, PrimitiveValue::from("1.2.3.4.5")),
        DataElement::new(MODALITY, VR::CS, PrimitiveValue::from("MG")),
        DataElement::new(Tag(0x0009, 0x0010), VR::LO, PrimitiveValue::from("ACME")),
        DataElement::new(
            Tag(0x0009, 0x1001),
            VR::OB,
            PrimitiveValue::U8(vec![0xde_u8, 0xad, 0xbe, 0xef].into()),
        ),
        DataElement::new(PATIENT_NAME, VR::PN, PrimitiveValue::from(patient_name)),
        DataElement::new(PATIENT_ID, VR::LO, PrimitiveValue::from("P-0001")),
        DataElement::new(ROWS, VR::US, PrimitiveValue::from(4_u16)),
        DataElement::new(COLUMNS, VR::US, PrimitiveValue::from(4_u16)),
        DataElement::new(
            VIEW_CODE_SEQUENCE,
            VR::SQ,
            DataSetSequence::from(vec![view_item]),
        ),
        DataElement::new(
            PIXEL_DATA,
            VR::OB,
            PrimitiveValue::U8(vec![0x7f_u8; 16].into()),
        ),
    ])
}

/// Minimal file meta table for [`sample_object`]
pub fn meta_builder() -> FileMetaTableBuilder {
    FileMetaTableBuilder::new()
        .media_storage_sop_class_uid(SOP_CLASS)
        .media_storage_sop_instance_uid("1.2.3.4.5")
        .transfer_syntax(EXPLICIT_VR_LITTLE_ENDIAN)
}

/// Writes a standard DICOM file (preamble + DICM + meta + dataset)
pub fn write_dicom(path: &Path, dcm: InMemDicomObject) {
    write_dicom_with_meta(path, dcm, meta_builder());
}

/// Writes a standard DICOM file with a custom file meta table
pub fn write_dicom_with_meta(path: &Path, dcm: InMemDicomObject, meta: FileMetaTableBuilder) {
    dcm.with_meta(meta)
        .unwrap()
        .write_to_file(path)
        .unwrap();
}

/// Writes a DICOM file starting directly with the DICM magic
pub fn write_dicom_without_preamble(path: &Path, dcm: InMemDicomObject) {
    write_dicom(path, dcm);
    let bytes = fs::read(path).unwrap();
    fs::write(path, &bytes[128..]).unwrap();
}
