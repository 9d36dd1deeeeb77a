//! # PDF Export
//!
//! Renders grouped index entries into a Letter-size PDF held entirely in memory.
//!
//! The work is split in two passes:
//! - [`layout`]: flows headings and table rows onto pages, producing positioned
//!   [`layout::DrawOp`]s (pure, no PDF types involved)
//! - [`PdfWriter`]: turns each page's operations into a compressed content
//!   stream and assembles the `lopdf` object graph
//!
//! Text measurement and wrapping live in [`text`].

use crate::error::Result;
use crate::group::CategoryGroup;
use chrono::Utc;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::io::Write;

pub mod layout;
pub mod text;

use layout::{DrawOp, IndexLayout, LaidOutPage, PageGeometry, TableStyle};
use text::{to_win_ansi, Font};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Renders the grouped entries of one index to PDF bytes.
///
/// `title` only ends up in the document information dictionary.
pub fn render_index(groups: &[CategoryGroup], title: &str) -> Result<Vec<u8>> {
    let geometry = PageGeometry::LETTER;
    let pages = IndexLayout::new(geometry, TableStyle::default()).layout(groups);
    tracing::debug!(
        categories = groups.len(),
        pages = pages.len(),
        "laid out index document"
    );

    let mut writer = PdfWriter::new(geometry);
    for page in &pages {
        writer.add_page(page)?;
    }
    writer.finish(title)
}

/// Builds the document object graph page by page.
pub struct PdfWriter {
    document: Document,
    geometry: PageGeometry,
    pages_id: ObjectId,
    resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
}

impl PdfWriter {
    pub fn new(geometry: PageGeometry) -> Self {
        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();

        let mut fonts = Dictionary::new();
        for font in Font::ALL {
            let font_id = document.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(font.resource_name(), font_id);
        }
        // Every page shares one resources dictionary.
        let resources_id = document.add_object(dictionary! { "Font" => fonts });

        Self {
            document,
            geometry,
            pages_id,
            resources_id,
            page_ids: Vec::new(),
        }
    }

    pub fn add_page(&mut self, page: &LaidOutPage) -> Result<()> {
        let content = self.page_content(page);

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&content.encode()?)?;
        let compressed = encoder.finish()?;
        let content_id = self
            .document
            .add_object(Stream::new(dictionary! { "Filter" => "FlateDecode" }, compressed));

        let page_id = self.document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                self.geometry.width.into(),
                self.geometry.height.into(),
            ],
            "Contents" => content_id,
            "Resources" => self.resources_id,
        });
        self.page_ids.push(page_id);
        Ok(())
    }

    pub fn finish(mut self, title: &str) -> Result<Vec<u8>> {
        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::from(*id)).collect();
        self.document.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => self.page_ids.len() as i64,
            }),
        );

        let catalog_id = self.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.document.trailer.set("Root", catalog_id);

        let info_id = self.document.add_object(dictionary! {
            "Title" => Object::String(to_win_ansi(title), StringFormat::Literal),
            "Producer" => Object::string_literal(concat!("refdex ", env!("CARGO_PKG_VERSION"))),
            "CreationDate" => Object::string_literal(Utc::now().format("D:%Y%m%d%H%M%SZ").to_string()),
        });
        self.document.trailer.set("Info", info_id);

        let mut buf = Vec::new();
        self.document.save_to(&mut buf)?;
        tracing::info!(pages = self.page_ids.len(), bytes = buf.len(), "rendered pdf");
        Ok(buf)
    }

    fn page_content(&self, page: &LaidOutPage) -> Content {
        let height = self.geometry.height;
        let mut ops = Vec::new();

        for op in &page.ops {
            match op {
                DrawOp::FillRect {
                    x,
                    y,
                    width,
                    height: h,
                    gray,
                } => {
                    ops.push(Operation::new("g", vec![(*gray).into()]));
                    ops.push(Operation::new(
                        "re",
                        vec![(*x).into(), (height - y - h).into(), (*width).into(), (*h).into()],
                    ));
                    ops.push(Operation::new("f", vec![]));
                }
                DrawOp::StrokeRect {
                    x,
                    y,
                    width,
                    height: h,
                    gray,
                    line_width,
                } => {
                    ops.push(Operation::new("w", vec![(*line_width).into()]));
                    ops.push(Operation::new("G", vec![(*gray).into()]));
                    ops.push(Operation::new(
                        "re",
                        vec![(*x).into(), (height - y - h).into(), (*width).into(), (*h).into()],
                    ));
                    ops.push(Operation::new("S", vec![]));
                }
                DrawOp::Text { x, y, style, text } => {
                    ops.push(Operation::new("BT", vec![]));
                    ops.push(Operation::new("g", vec![0.into()]));
                    ops.push(Operation::new(
                        "Tf",
                        vec![
                            Object::Name(style.font.resource_name().as_bytes().to_vec()),
                            style.size.into(),
                        ],
                    ));
                    ops.push(Operation::new("Td", vec![(*x).into(), (height - y).into()]));
                    ops.push(Operation::new(
                        "Tj",
                        vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
                    ));
                    ops.push(Operation::new("ET", vec![]));
                }
            }
        }

        Content { operations: ops }
    }
}
