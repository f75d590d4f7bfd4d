//! Minimal parser for signature SVG exports
//!
//! The signature pad serializes strokes as `<path>` elements with absolute
//! `M`/`Q` (and optionally `L`) commands inside a single viewBox. This
//! parser accepts exactly that shape; anything else is a
//! [`AssembleError::BadSignature`], which the assembler downgrades to the
//! blank-line fallback.

use crate::error::AssembleError;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref VIEW_BOX: Regex = Regex::new(r#"viewBox="([^"]+)""#).unwrap();
    static ref PATH_TAG: Regex = Regex::new(r"<path\b[^>]*>").unwrap();
    static ref D_ATTR: Regex = Regex::new(r#" d="([^"]*)""#).unwrap();
    static ref STROKE_ATTR: Regex = Regex::new(r#" stroke="([^"]*)""#).unwrap();
    static ref WIDTH_ATTR: Regex = Regex::new(r#" stroke-width="([^"]*)""#).unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum PathCommand {
    MoveTo(f32, f32),
    LineTo(f32, f32),
    QuadTo { cx: f32, cy: f32, x: f32, y: f32 },
}

/// One stroke path with its resolved style.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct VectorPath {
    pub commands: Vec<PathCommand>,
    /// RGB stroke color, each component in [0, 1].
    pub color: (f32, f32, f32),
    pub width: f32,
}

/// A parsed signature image: view window plus stroke paths.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct VectorImage {
    /// (min-x, min-y, width, height)
    pub view_box: (f32, f32, f32, f32),
    pub paths: Vec<VectorPath>,
}

impl VectorImage {
    pub fn is_blank(&self) -> bool {
        self.paths.is_empty()
    }
}

pub(crate) fn parse_signature_svg(svg: &str) -> Result<VectorImage, AssembleError> {
    let caps = VIEW_BOX
        .captures(svg)
        .ok_or_else(|| AssembleError::BadSignature("missing viewBox".to_string()))?;
    let nums: Vec<f32> = caps[1]
        .split_whitespace()
        .map(|t| t.parse::<f32>())
        .collect::<Result<_, _>>()
        .map_err(|e| AssembleError::BadSignature(format!("viewBox: {}", e)))?;
    if nums.len() != 4 {
        return Err(AssembleError::BadSignature(format!(
            "viewBox has {} values, expected 4",
            nums.len()
        )));
    }
    let (vx, vy, vw, vh) = (nums[0], nums[1], nums[2], nums[3]);
    if vw <= 0.0 || vh <= 0.0 {
        return Err(AssembleError::BadSignature(
            "viewBox has non-positive dimensions".to_string(),
        ));
    }

    let mut paths = Vec::new();
    for tag in PATH_TAG.find_iter(svg) {
        let tag = tag.as_str();
        let d = D_ATTR
            .captures(tag)
            .ok_or_else(|| AssembleError::BadSignature("path without d attribute".to_string()))?;
        let commands = parse_path_data(&d[1])?;
        if commands.is_empty() {
            continue;
        }

        let color = STROKE_ATTR
            .captures(tag)
            .map(|c| parse_color(&c[1]))
            .unwrap_or((0.0, 0.0, 0.0));
        let width = match WIDTH_ATTR.captures(tag) {
            Some(c) => c[1]
                .parse::<f32>()
                .map_err(|e| AssembleError::BadSignature(format!("stroke-width: {}", e)))?,
            None => 1.0,
        };

        paths.push(VectorPath {
            commands,
            color,
            width,
        });
    }

    Ok(VectorImage {
        view_box: (vx, vy, vw, vh),
        paths,
    })
}

fn parse_path_data(d: &str) -> Result<Vec<PathCommand>, AssembleError> {
    let mut commands = Vec::new();
    let mut tokens = d
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty());

    while let Some(op) = tokens.next() {
        match op {
            "M" => {
                let v = take_floats(&mut tokens, 2)?;
                commands.push(PathCommand::MoveTo(v[0], v[1]));
            }
            "L" => {
                let v = take_floats(&mut tokens, 2)?;
                commands.push(PathCommand::LineTo(v[0], v[1]));
            }
            "Q" => {
                let v = take_floats(&mut tokens, 4)?;
                commands.push(PathCommand::QuadTo {
                    cx: v[0],
                    cy: v[1],
                    x: v[2],
                    y: v[3],
                });
            }
            other => {
                return Err(AssembleError::BadSignature(format!(
                    "unsupported path command '{}'",
                    other
                )))
            }
        }
    }

    if let Some(first) = commands.first() {
        if !matches!(first, PathCommand::MoveTo(_, _)) {
            return Err(AssembleError::BadSignature(
                "path data must start with a move-to".to_string(),
            ));
        }
    }
    Ok(commands)
}

fn take_floats<'a, I>(tokens: &mut I, n: usize) -> Result<Vec<f32>, AssembleError>
where
    I: Iterator<Item = &'a str>,
{
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        let tok = tokens
            .next()
            .ok_or_else(|| AssembleError::BadSignature("truncated path data".to_string()))?;
        out.push(tok.parse::<f32>().map_err(|e| {
            AssembleError::BadSignature(format!("bad coordinate '{}': {}", tok, e))
        })?);
    }
    Ok(out)
}

/// Parse a `#rrggbb` color; anything else falls back to black ink.
fn parse_color(value: &str) -> (f32, f32, f32) {
    // ASCII check up front: the channel slicing below is by byte index
    // and must not land inside a multi-byte character.
    let hex = match value.strip_prefix('#') {
        Some(h) if h.len() == 6 && h.is_ascii() => h,
        _ => return (0.0, 0.0, 0.0),
    };
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16)
            .map(|v| v as f32 / 255.0)
            .unwrap_or(0.0)
    };
    (channel(0..2), channel(2..4), channel(4..6))
}
