#![allow(dead_code)]

use std::io::{Cursor, Read, Write};

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

pub const XLSM_CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/xl/workbook.xml" ContentType="application/vnd.ms-excel.sheet.macroEnabled.main+xml"/>
  <Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
  <Override PartName="/xl/vbaProject.bin" ContentType="application/vnd.ms-office.vbaProject"/>
</Types>"#;

pub const XLSX_CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
  <Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#;

pub const XLSM_WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
  <Relationship Id="rId2" Type="http://schemas.microsoft.com/office/2006/relationships/vbaProject" Target="vbaProject.bin"/>
</Relationships>"#;

pub const XLSX_WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#;

pub const WORKBOOK_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"
 xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets>
    <sheet name="Sheet1" sheetId="1" r:id="rId1"/>
  </sheets>
</workbook>"#;

pub const SHEET1_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <sheetData>
    <row r="1"><c r="A1"><f>SUM(1,2)</f><v>3</v></c></row>
  </sheetData>
</worksheet>"#;

pub const VBA_PROJECT_BYTES: &[u8] = b"\xd0\xcf\x11\xe0dummy-vba-project";

pub const SPREADSHEETML_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
pub const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
pub const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

pub fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let with_methods: Vec<(&str, &[u8], CompressionMethod)> = entries
        .iter()
        .map(|(name, bytes)| (*name, *bytes, CompressionMethod::Deflated))
        .collect();
    build_zip_with_methods(&with_methods)
}

pub fn build_zip_with_methods(entries: &[(&str, &[u8], CompressionMethod)]) -> Vec<u8> {
    let cursor = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(cursor);
    for (name, bytes, method) in entries {
        let options = FileOptions::<()>::default().compression_method(*method);
        zip.start_file(*name, options).unwrap();
        zip.write_all(bytes).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// The five-entry macro-enabled package used throughout the tests.
pub fn xlsm_package() -> Vec<u8> {
    build_zip(&[
        ("[Content_Types].xml", XLSM_CONTENT_TYPES.as_bytes()),
        ("xl/_rels/workbook.xml.rels", XLSM_WORKBOOK_RELS.as_bytes()),
        ("xl/vbaProject.bin", VBA_PROJECT_BYTES),
        ("xl/workbook.xml", WORKBOOK_XML.as_bytes()),
        ("xl/worksheets/sheet1.xml", SHEET1_XML.as_bytes()),
    ])
}

/// The same workbook without any macro markers.
pub fn xlsx_package() -> Vec<u8> {
    build_zip(&[
        ("[Content_Types].xml", XLSX_CONTENT_TYPES.as_bytes()),
        ("xl/_rels/workbook.xml.rels", XLSX_WORKBOOK_RELS.as_bytes()),
        ("xl/workbook.xml", WORKBOOK_XML.as_bytes()),
        ("xl/worksheets/sheet1.xml", SHEET1_XML.as_bytes()),
    ])
}

/// Entry names and uncompressed bytes, in central-directory order.
pub fn read_entries(bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("valid zip");
    let mut out = Vec::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).unwrap();
        let mut buf = Vec::new();
        file.read_to_end(&mut buf).unwrap();
        out.push((file.name().to_string(), buf));
    }
    out
}

pub fn entry_names(bytes: &[u8]) -> Vec<String> {
    read_entries(bytes).into_iter().map(|(name, _)| name).collect()
}

pub fn entry(bytes: &[u8], name: &str) -> Option<Vec<u8>> {
    read_entries(bytes)
        .into_iter()
        .find(|(n, _)| n == name)
        .map(|(_, data)| data)
}

pub fn entry_text(bytes: &[u8], name: &str) -> String {
    String::from_utf8(entry(bytes, name).unwrap_or_else(|| panic!("missing {name}")))
        .expect("utf-8 part")
}

/// `(PartName, ContentType)` for every content-type override.
pub fn overrides(content_types: &str) -> Vec<(String, String)> {
    let doc = roxmltree::Document::parse(content_types).expect("valid content types xml");
    doc.descendants()
        .filter(|n| n.has_tag_name((CONTENT_TYPES_NS, "Override")))
        .map(|n| {
            (
                n.attribute("PartName").unwrap_or_default().to_string(),
                n.attribute("ContentType").unwrap_or_default().to_string(),
            )
        })
        .collect()
}

/// `(Id, Type)` for every relationship.
pub fn relationships(rels: &str) -> Vec<(String, String)> {
    let doc = roxmltree::Document::parse(rels).expect("valid rels xml");
    doc.descendants()
        .filter(|n| n.has_tag_name((RELATIONSHIPS_NS, "Relationship")))
        .map(|n| {
            (
                n.attribute("Id").unwrap_or_default().to_string(),
                n.attribute("Type").unwrap_or_default().to_string(),
            )
        })
        .collect()
}

pub fn strip_bytes(input: &[u8]) -> Vec<u8> {
    let mut output = Cursor::new(Vec::new());
    xlsm_strip::rewrite_package(
        Cursor::new(input),
        &mut output,
        &xlsm_strip::StripOptions::default(),
    )
    .expect("rewrite package");
    output.into_inner()
}
