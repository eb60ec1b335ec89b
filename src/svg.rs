//! Vector document export and import.
//!
//! Export writes one `<path>` per live stroke inside an `<svg>` root sized
//! to the drawing surface. Import reads back documents of that shape: it
//! scans start tags, takes the size from the root and collects every
//! `<path>` element in document order.

use kurbo::BezPath;
use thiserror::Error;

use crate::config::{color_to_hex, parse_color, SurfaceSize};
use crate::geometry;
use crate::stroke::{Stroke, StrokeStyle};

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Errors that can occur while reading a vector document
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SvgError {
    #[error("document has no <svg> root element")]
    MissingRoot,

    #[error("unterminated markup starting at byte {0}")]
    Unterminated(usize),

    #[error("path {index} has no `d` attribute")]
    MissingPathData { index: usize },

    #[error("path {index} has invalid path data: {message}")]
    InvalidPathData { index: usize, message: String },
}

/// A `<path>` element read from a document.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgPath {
    pub path: BezPath,
    pub style: StrokeStyle,
}

/// Parsed content of a vector document.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgDocument {
    /// Size from the root's `width`/`height`, falling back to its `viewBox`.
    pub size: Option<SurfaceSize>,
    pub paths: Vec<SvgPath>,
}

/// Serialize `strokes` into a standalone SVG document.
pub fn write_document<'a>(strokes: impl IntoIterator<Item = &'a Stroke>, surface: SurfaceSize) -> String {
    let SurfaceSize { width, height } = surface;
    let mut out = format!(
        r#"<svg xmlns="{SVG_NS}" width="{width}" height="{height}" viewBox="0 0 {width} {height}" preserveAspectRatio="xMinYMin meet">"#
    );
    out.push('\n');
    for stroke in strokes {
        let style = stroke.style();
        out.push_str(&format!(
            r#"<path d="{}" stroke="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round" fill="none"/>"#,
            stroke.path().to_svg(),
            color_to_hex(style.color),
            style.width,
        ));
        out.push('\n');
    }
    out.push_str("</svg>\n");
    out
}

/// Parse a document produced by [`write_document`] (or a compatible one).
///
/// Paths without a usable stroke color or width take `fallback`'s.
pub fn parse_document(source: &str, fallback: StrokeStyle) -> Result<SvgDocument, SvgError> {
    let tags = scan_tags(source)?;

    let root = tags.first().filter(|tag| local_name(&tag.name) == "svg").ok_or(SvgError::MissingRoot)?;
    let size = root_size(root);

    let mut paths = Vec::new();
    for tag in tags.iter().filter(|tag| local_name(&tag.name) == "path") {
        let index = paths.len();
        let data = tag.attr("d").ok_or(SvgError::MissingPathData { index })?;
        let path = BezPath::from_svg(data).map_err(|err| SvgError::InvalidPathData {
            index,
            message: err.to_string(),
        })?;

        let color = tag.attr("stroke").and_then(parse_color).unwrap_or(fallback.color);
        let width = tag
            .attr("stroke-width")
            .and_then(parse_length)
            .filter(|w| *w > 0.0)
            .unwrap_or(fallback.width);

        paths.push(SvgPath {
            path,
            style: StrokeStyle { width, color },
        });
    }

    Ok(SvgDocument { size, paths })
}

impl SvgPath {
    /// On-curve points of the path, which are the points the stroke was
    /// captured with when the path came from [`write_document`].
    pub fn points(&self) -> Vec<kurbo::Point> {
        geometry::on_curve_points(&self.path)
    }
}

#[derive(Debug)]
struct Tag {
    name: String,
    attrs: Vec<(String, String)>,
}

impl Tag {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }
}

fn local_name(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}

fn root_size(root: &Tag) -> Option<SurfaceSize> {
    let width = root.attr("width").and_then(parse_length);
    let height = root.attr("height").and_then(parse_length);
    if let (Some(width), Some(height)) = (width, height) {
        return Some(SurfaceSize { width, height });
    }

    let view_box: Vec<f64> = root
        .attr("viewBox")?
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect::<Result<_, _>>()
        .ok()?;
    match view_box[..] {
        [_, _, width, height] => Some(SurfaceSize { width, height }),
        _ => None,
    }
}

/// Plain numbers, optionally with a `px` suffix.
fn parse_length(value: &str) -> Option<f64> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value);
    number.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Collect every start (or self-closing) tag in document order. Comments,
/// declarations, processing instructions and end tags are skipped.
fn scan_tags(source: &str) -> Result<Vec<Tag>, SvgError> {
    let mut tags = Vec::new();
    let mut pos = 0;

    while let Some(offset) = source[pos..].find('<') {
        let start = pos + offset;
        let rest = &source[start..];

        let skip_to = |terminator: &str| {
            rest.find(terminator)
                .map(|end| start + end + terminator.len())
                .ok_or(SvgError::Unterminated(start))
        };

        if rest.starts_with("<!--") {
            pos = skip_to("-->")?;
        } else if rest.starts_with("<![CDATA[") {
            pos = skip_to("]]>")?;
        } else if rest.starts_with("<?") {
            pos = skip_to("?>")?;
        } else if rest.starts_with("<!") || rest.starts_with("</") {
            pos = skip_to(">")?;
        } else {
            let (tag, len) = parse_tag(rest).ok_or(SvgError::Unterminated(start))?;
            tags.push(tag);
            pos = start + len;
        }
    }

    Ok(tags)
}

/// Parse `<name attr="value" ...>` at the start of `input`, returning the
/// tag and the number of bytes consumed.
fn parse_tag(input: &str) -> Option<(Tag, usize)> {
    let bytes = input.as_bytes();
    let mut i = 1;

    let name_start = i;
    while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' && bytes[i] != b'/' {
        i += 1;
    }
    let name = input[name_start..i].to_owned();
    if name.is_empty() {
        return None;
    }

    let mut attrs = Vec::new();
    loop {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        match *bytes.get(i)? {
            b'>' => return Some((Tag { name, attrs }, i + 1)),
            b'/' => {
                i += 1;
                continue;
            }
            _ => {}
        }

        let key_start = i;
        while i < bytes.len() && !bytes[i].is_ascii_whitespace() && !matches!(bytes[i], b'=' | b'>' | b'/') {
            i += 1;
        }
        let key = input[key_start..i].to_owned();

        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if bytes.get(i) != Some(&b'=') {
            // Attribute without a value
            attrs.push((key, String::new()));
            continue;
        }
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        let quote = *bytes.get(i)?;
        if quote != b'"' && quote != b'\'' {
            return None;
        }
        i += 1;
        let value_start = i;
        while i < bytes.len() && bytes[i] != quote {
            i += 1;
        }
        if i >= bytes.len() {
            return None;
        }
        attrs.push((key, decode_entities(&input[value_start..i])));
        i += 1;
    }
}

fn decode_entities(value: &str) -> String {
    if !value.contains('&') {
        return value.to_owned();
    }
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
