#![forbid(unsafe_code)]

use crate::error::ReportError;
use crate::text::{Font, POLISH_GLYPHS, encode_text, wrap};
use kf_core::taxonomy::{CostType, MISSING_LABEL};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};

pub const SUMMARY_TITLE: &str = "Podsumowanie kosztu";
pub const NOTES_HEADING: &str = "NOTATKI:";

// A4 portrait, in points.
const PAGE_WIDTH_PT: i64 = 595;
const PAGE_HEIGHT_PT: i64 = 842;
const PT_PER_MM: f32 = 72.0 / 25.4;

const MARGIN_LEFT_MM: f32 = 14.0;
const MARGIN_RIGHT_MM: f32 = 196.0;
const VALUE_COLUMN_MM: f32 = 80.0;
const PAGE_BOTTOM_MM: f32 = 282.0;
const CONTINUATION_TOP_MM: f32 = 20.0;

const TITLE_SIZE: i64 = 16;
const BODY_SIZE: i64 = 11;
const NOTES_LINE_MM: f32 = 4.5;
const NOTES_WIDTH_MM: f32 = 170.0;

const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

fn resource_name(font: Font) -> &'static str {
    match font {
        Font::Helvetica => REGULAR_FONT,
        Font::HelveticaBold => BOLD_FONT,
    }
}

/// Everything printed on the summary pages plus the optional invoice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryRequest {
    pub project_name: String,
    pub agreement_number: String,
    pub cost_type: CostType,
    pub group_label: String,
    pub category_label: String,
    pub notes: Option<String>,
    pub attachment: Option<Vec<u8>>,
}

impl SummaryRequest {
    /// Key/value rows in print order; blank values print as `-`.
    pub fn rows(&self) -> [(&'static str, &str); 4] {
        [
            ("NUMER UMOWY PROJEKTU", or_placeholder(&self.agreement_number)),
            ("NAZWA PROJEKTU", or_placeholder(&self.project_name)),
            ("GRUPA KOSZTU", or_placeholder(&self.group_label)),
            ("KATEGORIA KOSZTU", or_placeholder(&self.category_label)),
        ]
    }
}

fn or_placeholder(text: &str) -> &str {
    if text.trim().is_empty() {
        MISSING_LABEL
    } else {
        text
    }
}

/// Accumulates drawing operations page by page, positioned in millimetres from the top-left.
struct Canvas {
    pages: Vec<Vec<Operation>>,
}

impl Canvas {
    fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
        }
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn new_page(&mut self) {
        self.pages.push(Vec::new());
    }

    fn ops(&mut self) -> &mut Vec<Operation> {
        // `pages` starts with one entry and only grows.
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn text(&mut self, font: Font, size: i64, x_mm: f32, y_mm: f32, text: &str) {
        let (x, y) = (x_pt(x_mm), y_pt(y_mm));
        let ops = self.ops();
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![resource_name(font).into(), size.into()],
        ));
        ops.push(Operation::new("Td", vec![x.into(), y.into()]));
        ops.push(Operation::new(
            "Tj",
            vec![Object::string_literal(encode_text(text))],
        ));
        ops.push(Operation::new("ET", vec![]));
    }

    fn rule(&mut self, y_mm: f32) {
        let y = y_pt(y_mm);
        let ops = self.ops();
        ops.push(Operation::new("G", vec![Object::Real(0.6)]));
        ops.push(Operation::new("w", vec![Object::Real(0.5)]));
        ops.push(Operation::new(
            "m",
            vec![x_pt(MARGIN_LEFT_MM).into(), y.into()],
        ));
        ops.push(Operation::new(
            "l",
            vec![x_pt(MARGIN_RIGHT_MM).into(), y.into()],
        ));
        ops.push(Operation::new("S", vec![]));
        ops.push(Operation::new("G", vec![0.into()]));
    }
}

fn x_pt(mm: f32) -> i64 {
    (mm * PT_PER_MM).round() as i64
}

fn y_pt(mm_from_top: f32) -> i64 {
    PAGE_HEIGHT_PT - (mm_from_top * PT_PER_MM).round() as i64
}

/// Lays out the summary and returns the page operations.
fn layout(request: &SummaryRequest) -> Canvas {
    let mut canvas = Canvas::new();
    canvas.text(Font::HelveticaBold, TITLE_SIZE, MARGIN_LEFT_MM, 18.0, SUMMARY_TITLE);

    let mut y = 30.0;
    for (key, value) in request.rows() {
        canvas.text(Font::HelveticaBold, BODY_SIZE, MARGIN_LEFT_MM, y, &format!("{key}:"));
        canvas.text(Font::Helvetica, BODY_SIZE, VALUE_COLUMN_MM, y, value);
        y += 10.0;
        canvas.rule(y - 6.0);
    }

    let notes = request
        .notes
        .as_deref()
        .filter(|notes| !notes.trim().is_empty());
    if let Some(notes) = notes {
        y += 6.0;
        canvas.text(Font::HelveticaBold, BODY_SIZE, MARGIN_LEFT_MM, y, NOTES_HEADING);
        y += 8.0;
        let box_width = NOTES_WIDTH_MM * PT_PER_MM;
        for line in wrap(notes, Font::Helvetica, BODY_SIZE as f32, box_width) {
            if y > PAGE_BOTTOM_MM {
                canvas.new_page();
                y = CONTINUATION_TOP_MM;
            }
            if !line.is_empty() {
                canvas.text(Font::Helvetica, BODY_SIZE, MARGIN_LEFT_MM, y, &line);
            }
            y += NOTES_LINE_MM;
        }
    }
    canvas
}

/// Renders the summary pages as a standalone PDF.
pub fn render_summary(request: &SummaryRequest) -> Result<Vec<u8>, ReportError> {
    let canvas = layout(request);
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let encoding_id = doc.add_object(polish_encoding());
    let regular_id = doc.add_object(standard_font(Font::Helvetica, encoding_id));
    let bold_id = doc.add_object(standard_font(Font::HelveticaBold, encoding_id));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            REGULAR_FONT => regular_id,
            BOLD_FONT => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(canvas.page_count());
    for operations in canvas.pages {
        let content = Content { operations }
            .encode()
            .map_err(ReportError::encode)?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH_PT.into(), PAGE_HEIGHT_PT.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(SUMMARY_TITLE),
        "Subject" => Object::string_literal(request.cost_type.as_str()),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut out = Vec::new();
    doc.save_to(&mut out).map_err(ReportError::encode)?;
    Ok(out)
}

fn standard_font(font: Font, encoding_id: ObjectId) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font.base_font(),
        "Encoding" => encoding_id,
    }
}

/// WinAnsiEncoding with the Polish glyphs placed on their re-mapped code points.
fn polish_encoding() -> lopdf::Dictionary {
    let mut differences = Vec::with_capacity(POLISH_GLYPHS.len() * 2);
    for (_, code, glyph) in POLISH_GLYPHS {
        differences.push(Object::Integer(i64::from(code)));
        differences.push(Object::Name(glyph.as_bytes().to_vec()));
    }
    dictionary! {
        "Type" => "Encoding",
        "BaseEncoding" => "WinAnsiEncoding",
        "Differences" => differences,
    }
}
