//! KML document assembly and serialization
//!
//! The document is written compactly first and then re-indented for
//! readability. If re-indenting fails the compact text is used instead.

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{PhotoKmlError, Result};
use crate::models::{AnnotatedPlacemark, MapSettings};

/// KML 2.2 namespace
pub const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

/// Placemark counts for one `<Folder>` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderSummary {
    pub name: String,
    pub exported: usize,
    pub total: usize,
}

/// Serialized KML document with per-folder counts
#[derive(Debug, Clone)]
pub struct KmlDocument {
    pub content: String,
    pub folders: Vec<FolderSummary>,
}

impl KmlDocument {
    pub fn placemarks_exported(&self) -> usize {
        self.folders.iter().map(|f| f.exported).sum()
    }

    pub fn placemarks_total(&self) -> usize {
        self.folders.iter().map(|f| f.total).sum()
    }
}

/// Build the KML document for already sorted and filtered placemarks
///
/// A new folder is opened whenever a placemark's group differs from the last
/// opened folder. Only placemarks with `include` set are written.
pub fn build_kml(settings: &MapSettings, placemarks: &[AnnotatedPlacemark]) -> Result<KmlDocument> {
    let (compact, folders) = write_compact(settings, placemarks)?;
    let document = KmlDocument {
        content: pretty_or_compact(compact),
        folders,
    };
    info!(
        "{} placemarks exported to KML",
        document.placemarks_exported()
    );
    Ok(document)
}

/// Re-indent a compact document, falling back to the input on failure
pub fn pretty_or_compact(compact: String) -> String {
    match pretty_print(&compact) {
        Ok(pretty) => pretty,
        Err(e) => {
            warn!("Problems converting KML to indented form, writing it compact: {}", e);
            compact
        }
    }
}

/// Re-indent an XML document with two spaces per level
pub fn pretty_print(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            event => writer.write_event(event)?,
        }
    }

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).map_err(|e| PhotoKmlError::Serialization(e.to_string()))
}

fn write_compact(
    settings: &MapSettings,
    placemarks: &[AnnotatedPlacemark],
) -> Result<(String, Vec<FolderSummary>)> {
    let mut w = Writer::new(Vec::new());
    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut kml = BytesStart::new("kml");
    kml.push_attribute(("xmlns", KML_NAMESPACE));
    w.write_event(Event::Start(kml))?;
    w.write_event(Event::Start(BytesStart::new("Document")))?;

    write_text_element(&mut w, "name", &settings.name)?;
    write_text_element(&mut w, "description", &settings.description)?;

    let mut folders: Vec<FolderSummary> = Vec::new();

    for annotated in placemarks {
        let placemark = &annotated.placemark;

        let opens_folder = folders
            .last()
            .map_or(true, |folder| folder.name != placemark.group);
        if opens_folder {
            if !folders.is_empty() {
                w.write_event(Event::End(BytesEnd::new("Folder")))?;
            }
            w.write_event(Event::Start(BytesStart::new("Folder")))?;
            write_text_element(&mut w, "name", &placemark.group)?;
            folders.push(FolderSummary {
                name: placemark.group.clone(),
                exported: 0,
                total: 0,
            });
        }

        // `folders` is non-empty here
        if let Some(folder) = folders.last_mut() {
            folder.total += 1;
            if annotated.include {
                folder.exported += 1;
            }
        }

        if !annotated.include {
            continue;
        }

        w.write_event(Event::Start(BytesStart::new("Placemark")))?;
        if !placemark.label.is_empty() {
            write_text_element(&mut w, "name", &placemark.file_name())?;
            write_text_element(&mut w, "description", &placemark.directory())?;
        }
        w.write_event(Event::Start(BytesStart::new("Point")))?;
        write_text_element(
            &mut w,
            "coordinates",
            &format!(
                "{},{}",
                format_degrees(placemark.longitude()),
                format_degrees(placemark.latitude())
            ),
        )?;
        w.write_event(Event::End(BytesEnd::new("Point")))?;
        w.write_event(Event::End(BytesEnd::new("Placemark")))?;
    }

    if !folders.is_empty() {
        w.write_event(Event::End(BytesEnd::new("Folder")))?;
    }
    w.write_event(Event::End(BytesEnd::new("Document")))?;
    w.write_event(Event::End(BytesEnd::new("kml")))?;

    let content = String::from_utf8(w.into_inner())
        .map_err(|e| PhotoKmlError::Serialization(e.to_string()))?;
    Ok((content, folders))
}

/// Decimal degrees, always with a fractional part (`-73.0`, not `-73`)
fn format_degrees(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Write `<tag>text</tag>`, or `<tag/>` when the text is empty
fn write_text_element<W: Write>(w: &mut Writer<W>, tag: &str, text: &str) -> Result<()> {
    if text.is_empty() {
        w.write_event(Event::Empty(BytesStart::new(tag)))?;
    } else {
        w.write_event(Event::Start(BytesStart::new(tag)))?;
        w.write_event(Event::Text(BytesText::new(text)))?;
        w.write_event(Event::End(BytesEnd::new(tag)))?;
    }
    Ok(())
}
