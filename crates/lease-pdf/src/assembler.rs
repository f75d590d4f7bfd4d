//! Paginated lease document assembly
//!
//! Lays a resolved template plus up to two signature exports into a PDF:
//! running vertical cursor, page break whenever remaining space drops below
//! the threshold, diagonal watermark on every page, generation-timestamp
//! footer on the last page. Assembly is a pure function of its inputs; the
//! assembler keeps no state across calls.

use crate::error::AssembleError;
use crate::layout::wrap;
use crate::svg_path::{parse_signature_svg, PathCommand, VectorImage};
use chrono::{DateTime, Utc};
use lease_templates::{PlaceholderValues, Template};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, StringFormat};
use serde::{Deserialize, Serialize};

const REGULAR: &str = "F1";
const BOLD: &str = "F2";

const TITLE_SIZE: f32 = 20.0;
const BODY_SIZE: f32 = 10.0;
const SECTION_TITLE_SIZE: f32 = 12.0;
const FOOTER_SIZE: f32 = 8.0;
const LINE_FACTOR: f32 = 1.4;

/// Minimum space that must remain below the cursor before starting a
/// section or the signature block.
const LOW_SPACE_THRESHOLD: f32 = 120.0;

/// Total vertical extent of one signatory block.
const SIGNATURE_BLOCK_HEIGHT: f32 = 118.0;
const SIGNATURE_AREA_WIDTH: f32 = 200.0;
const SIGNATURE_AREA_HEIGHT: f32 = 54.0;
const SIGNING_LINE_WIDTH: f32 = 220.0;

/// Signature SVG exports for the two signing parties.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignatureSlots {
    pub manager_svg: Option<String>,
    pub tenant_svg: Option<String>,
}

/// Printed names for the "signed by" lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignerNames {
    pub manager_name: Option<String>,
    pub tenant_name: Option<String>,
}

/// Page geometry and stamping configuration.
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    /// Stamped diagonally on every page; `None` disables the stamp.
    pub watermark: Option<String>,
    /// Injected so repeated assembly of the same inputs is byte-identical.
    pub generated_at: DateTime<Utc>,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            // US Letter
            page_width: 612.0,
            page_height: 792.0,
            margin: 54.0,
            watermark: Some("DRAFT".to_string()),
            generated_at: Utc::now(),
        }
    }
}

impl AssembleOptions {
    fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }
}

/// Resolve `template` against `values` and lay the result out as a PDF.
///
/// A malformed or blank signature export never aborts assembly; the
/// affected slot falls back to a blank signing line.
pub fn assemble(
    template: &Template,
    values: &PlaceholderValues,
    signatures: &SignatureSlots,
    signers: &SignerNames,
    options: &AssembleOptions,
) -> Result<Vec<u8>, AssembleError> {
    let resolved = template.resolve(values);
    let mut writer = PageWriter::new(options);

    writer.heading(&resolved.title, TITLE_SIZE);
    if let Some(description) = &resolved.description {
        writer.paragraph(description, REGULAR, BODY_SIZE);
    }

    for section in &resolved.sections {
        writer.ensure_space(LOW_SPACE_THRESHOLD);
        writer.heading(&section.title, SECTION_TITLE_SIZE);
        writer.paragraph(&section.content, REGULAR, BODY_SIZE);
    }

    writer.ensure_space(LOW_SPACE_THRESHOLD);
    writer.signature_block("Manager", signatures.manager_svg.as_deref(), signers.manager_name.as_deref());
    writer.signature_block("Tenant", signatures.tenant_svg.as_deref(), signers.tenant_name.as_deref());

    let pages = writer.finish();
    build_document(pages, options)
}

/// Accumulates content operations page by page, tracking the vertical
/// cursor.
struct PageWriter<'a> {
    options: &'a AssembleOptions,
    pages: Vec<Vec<Operation>>,
    ops: Vec<Operation>,
    cursor: f32,
}

impl<'a> PageWriter<'a> {
    fn new(options: &'a AssembleOptions) -> Self {
        let mut writer = Self {
            options,
            pages: Vec::new(),
            ops: Vec::new(),
            cursor: 0.0,
        };
        writer.start_page();
        writer
    }

    fn start_page(&mut self) {
        self.ops = Vec::new();
        self.cursor = self.options.page_height - self.options.margin;
        if let Some(text) = &self.options.watermark {
            self.ops.extend(watermark_ops(text, self.options));
        }
    }

    fn break_page(&mut self) {
        let ops = std::mem::take(&mut self.ops);
        self.pages.push(ops);
        self.start_page();
        tracing::debug!(page = self.pages.len() + 1, "starting new page");
    }

    /// Break to a fresh page when less than `needed` vertical space
    /// remains above the bottom margin.
    fn ensure_space(&mut self, needed: f32) {
        if self.cursor - needed < self.options.margin {
            self.break_page();
        }
    }

    fn heading(&mut self, text: &str, size: f32) {
        let leading = size * LINE_FACTOR;
        self.ensure_space(leading);
        self.cursor -= leading;
        self.ops
            .extend(text_ops(self.options.margin, self.cursor, BOLD, size, text));
        // Small gap under headings before body text.
        self.cursor -= size * 0.3;
    }

    fn paragraph(&mut self, text: &str, font: &'static str, size: f32) {
        let leading = size * LINE_FACTOR;
        for line in wrap(text, size, self.options.content_width()) {
            self.ensure_space(leading);
            self.cursor -= leading;
            self.ops
                .extend(text_ops(self.options.margin, self.cursor, font, size, &line));
        }
        self.cursor -= leading * 0.5;
    }

    /// One signatory: role label, signature image or blank signing line,
    /// printed name and generation date beneath.
    fn signature_block(&mut self, label: &str, svg: Option<&str>, name: Option<&str>) {
        self.ensure_space(SIGNATURE_BLOCK_HEIGHT);

        self.cursor -= BODY_SIZE * LINE_FACTOR;
        self.ops.extend(text_ops(
            self.options.margin,
            self.cursor,
            BOLD,
            BODY_SIZE,
            label,
        ));

        let area_top = self.cursor - 6.0;
        let line_y = area_top - SIGNATURE_AREA_HEIGHT + 10.0;

        let embedded = svg.and_then(|markup| match parse_signature_svg(markup) {
            Ok(image) if !image.is_blank() => Some(embed_ops(
                &image,
                self.options.margin,
                area_top,
                SIGNATURE_AREA_WIDTH,
                SIGNATURE_AREA_HEIGHT,
            )),
            Ok(_) => None,
            Err(error) => {
                tracing::warn!(%label, %error, "signature embed failed, using blank line");
                None
            }
        });

        match embedded {
            Some(ops) => self.ops.extend(ops),
            // Fallback signing line for absent, blank, or malformed exports.
            None => self.ops.extend(signing_line_ops(
                self.options.margin,
                line_y,
                SIGNING_LINE_WIDTH,
            )),
        }
        self.cursor = line_y - BODY_SIZE * LINE_FACTOR;

        if let Some(name) = name {
            self.ops.extend(text_ops(
                self.options.margin,
                self.cursor,
                REGULAR,
                BODY_SIZE,
                name,
            ));
        }
        self.cursor -= FOOTER_SIZE * LINE_FACTOR;
        let date = self.options.generated_at.format("%Y-%m-%d").to_string();
        self.ops.extend(text_ops(
            self.options.margin,
            self.cursor,
            REGULAR,
            FOOTER_SIZE,
            &date,
        ));
        self.cursor -= FOOTER_SIZE * LINE_FACTOR;
    }

    /// Stamp the last-page footer and hand back all pages.
    fn finish(mut self) -> Vec<Vec<Operation>> {
        let stamp = format!(
            "Generated on {}",
            self.options.generated_at.format("%Y-%m-%d %H:%M UTC")
        );
        self.ops.extend(gray_text_ops(
            self.options.margin,
            self.options.margin / 2.0,
            FOOTER_SIZE,
            &stamp,
        ));
        self.pages.push(self.ops);
        self.pages
    }
}

fn real(v: f32) -> Object {
    Object::Real(v)
}

fn pdf_string(text: &str) -> Object {
    Object::String(text.as_bytes().to_vec(), StringFormat::Literal)
}

fn text_ops(x: f32, y: f32, font: &str, size: f32, text: &str) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![Object::Name(font.as_bytes().to_vec()), real(size)]),
        Operation::new("Td", vec![real(x), real(y)]),
        Operation::new("Tj", vec![pdf_string(text)]),
        Operation::new("ET", vec![]),
    ]
}

fn gray_text_ops(x: f32, y: f32, size: f32, text: &str) -> Vec<Operation> {
    let mut ops = vec![
        Operation::new("q", vec![]),
        Operation::new("rg", vec![real(0.4), real(0.4), real(0.4)]),
    ];
    ops.extend(text_ops(x, y, REGULAR, size, text));
    ops.push(Operation::new("Q", vec![]));
    ops
}

/// Large light-gray text rotated 45 degrees across the page body.
fn watermark_ops(text: &str, options: &AssembleOptions) -> Vec<Operation> {
    let size = 72.0;
    // Center the baseline roughly across the page diagonal.
    let (cos, sin) = (0.707f32, 0.707f32);
    let tx = options.page_width * 0.2;
    let ty = options.page_height * 0.25;
    vec![
        Operation::new("q", vec![]),
        Operation::new("rg", vec![real(0.85), real(0.85), real(0.85)]),
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![Object::Name(BOLD.as_bytes().to_vec()), real(size)],
        ),
        Operation::new(
            "Tm",
            vec![
                real(cos),
                real(sin),
                real(-sin),
                real(cos),
                real(tx),
                real(ty),
            ],
        ),
        Operation::new("Tj", vec![pdf_string(text)]),
        Operation::new("ET", vec![]),
        Operation::new("Q", vec![]),
    ]
}

fn signing_line_ops(x: f32, y: f32, width: f32) -> Vec<Operation> {
    vec![
        Operation::new("q", vec![]),
        Operation::new("RG", vec![real(0.2), real(0.2), real(0.2)]),
        Operation::new("w", vec![real(0.75)]),
        Operation::new("m", vec![real(x), real(y)]),
        Operation::new("l", vec![real(x + width), real(y)]),
        Operation::new("S", vec![]),
        Operation::new("Q", vec![]),
    ]
}

/// Replay a parsed signature image as PDF path operators inside a
/// transform that fits the viewBox into the target rectangle (with a
/// vertical flip, since capture space is y-down).
fn embed_ops(image: &VectorImage, x: f32, top: f32, max_w: f32, max_h: f32) -> Vec<Operation> {
    let (vx, vy, vw, vh) = image.view_box;
    let scale = (max_w / vw).min(max_h / vh);

    let mut ops = vec![
        Operation::new("q", vec![]),
        Operation::new(
            "cm",
            vec![
                real(scale),
                real(0.0),
                real(0.0),
                real(-scale),
                real(x - vx * scale),
                real(top + vy * scale),
            ],
        ),
        Operation::new("j", vec![Object::Integer(1)]),
        Operation::new("J", vec![Object::Integer(1)]),
    ];

    for path in &image.paths {
        let (r, g, b) = path.color;
        ops.push(Operation::new("RG", vec![real(r), real(g), real(b)]));
        ops.push(Operation::new("w", vec![real(path.width)]));

        let mut current = (0.0f32, 0.0f32);
        for command in &path.commands {
            match *command {
                PathCommand::MoveTo(px, py) => {
                    ops.push(Operation::new("m", vec![real(px), real(py)]));
                    current = (px, py);
                }
                PathCommand::LineTo(px, py) => {
                    ops.push(Operation::new("l", vec![real(px), real(py)]));
                    current = (px, py);
                }
                PathCommand::QuadTo { cx, cy, x: px, y: py } => {
                    // Exact quadratic-to-cubic elevation.
                    let c1 = (
                        current.0 + 2.0 / 3.0 * (cx - current.0),
                        current.1 + 2.0 / 3.0 * (cy - current.1),
                    );
                    let c2 = (px + 2.0 / 3.0 * (cx - px), py + 2.0 / 3.0 * (cy - py));
                    ops.push(Operation::new(
                        "c",
                        vec![
                            real(c1.0),
                            real(c1.1),
                            real(c2.0),
                            real(c2.1),
                            real(px),
                            real(py),
                        ],
                    ));
                    current = (px, py);
                }
            }
        }
        ops.push(Operation::new("S", vec![]));
    }

    ops.push(Operation::new("Q", vec![]));
    ops
}

/// Build the final PDF from per-page content operations.
fn build_document(
    pages: Vec<Vec<Operation>>,
    options: &AssembleOptions,
) -> Result<Vec<u8>, AssembleError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_regular = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
    ]));
    let font_bold = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica-Bold".to_vec())),
    ]));
    let resources_id = doc.add_object(Dictionary::from_iter(vec![(
        "Font",
        Object::Dictionary(Dictionary::from_iter(vec![
            (REGULAR, Object::Reference(font_regular)),
            (BOLD, Object::Reference(font_bold)),
        ])),
    )]));

    let mut page_ids = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let encoded = content
            .encode()
            .map_err(|e| AssembleError::ContentEncode(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));

        let page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    real(0.0),
                    real(0.0),
                    real(options.page_width),
                    real(options.page_height),
                ]),
            ),
            ("Contents", Object::Reference(content_id)),
            ("Resources", Object::Reference(resources_id)),
        ]);
        page_ids.push(doc.add_object(page));
    }

    let kids = page_ids
        .iter()
        .map(|id| Object::Reference(*id))
        .collect::<Vec<_>>();
    let page_count = page_ids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Count", Object::Integer(page_count)),
            ("Kids", Object::Array(kids)),
        ])),
    );

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| AssembleError::Write(e.to_string()))?;
    Ok(buffer)
}
