//! Overlay payloads and their declared dimensions

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::layout::Footprint;
use crate::renderer::svg::escape_xml;

/// Anything that can be drawn in the center of the symbol
///
/// The payload is opaque markup. Its size comes either from
/// [`declared_size`](OverlayContent::declared_size) or, failing that, from a
/// host measurement after it has been laid out once.
pub trait OverlayContent {
    /// Size declared by the content itself, if any
    fn declared_size(&self) -> Option<Footprint>;

    /// SVG markup placed inside the overlay viewport
    fn markup(&self) -> &str;

    /// Identity used to key cached measurements
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.markup().hash(&mut hasher);
        hasher.finish()
    }
}

/// A width or height attribute as written by the caller
#[derive(Debug, Clone, PartialEq)]
pub enum Dimension {
    Number(f64),
    Text(String),
}

impl Dimension {
    /// Numeric value: numbers pass through, text keeps its leading number
    /// (`"32px"` is 32). Non-finite values count as missing.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Dimension::Number(n) if n.is_finite() => Some(*n),
            Dimension::Number(_) => None,
            Dimension::Text(s) => parse_number(s),
        }
    }

    fn hash_into(&self, hasher: &mut DefaultHasher) {
        match self {
            Dimension::Number(n) => n.to_bits().hash(hasher),
            Dimension::Text(s) => s.hash(hasher),
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dimension::Number(n) => write!(f, "{}", n),
            Dimension::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Dimension {
    fn from(value: f64) -> Self {
        Dimension::Number(value)
    }
}

impl From<u32> for Dimension {
    fn from(value: u32) -> Self {
        Dimension::Number(f64::from(value))
    }
}

impl From<i32> for Dimension {
    fn from(value: i32) -> Self {
        Dimension::Number(f64::from(value))
    }
}

impl From<&str> for Dimension {
    fn from(value: &str) -> Self {
        Dimension::Text(value.to_string())
    }
}

impl From<String> for Dimension {
    fn from(value: String) -> Self {
        Dimension::Text(value)
    }
}

/// Parse the longest leading decimal number of `text`, ignoring leading
/// whitespace and any trailing unit. Returns `None` when there is no number
/// or it is not finite.
pub fn parse_number(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        let frac_digits = frac_end - (end + 1);
        if digits > 0 || frac_digits > 0 {
            digits += frac_digits;
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Width and height of a `viewBox` value: exactly four finite numbers
/// separated by whitespace or commas
pub fn parse_view_box(text: &str) -> Option<Footprint> {
    let nums = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(parse_number)
        .collect::<Option<Vec<f64>>>()?;

    match nums.as_slice() {
        [_, _, w, h] => Some(Footprint::new(*w, *h)),
        _ => None,
    }
}

/// Overlay graphic: SVG markup plus optional declared dimensions
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Overlay {
    markup: String,
    width: Option<Dimension>,
    height: Option<Dimension>,
    view_box: Option<String>,
}

impl Overlay {
    /// Wrap SVG markup. `width`, `height` and `viewBox` on its root element
    /// become the declared dimensions.
    pub fn from_svg(markup: impl Into<String>) -> Self {
        let markup = markup.into();
        let mut overlay = Self {
            markup,
            ..Self::default()
        };

        let mut reader = Reader::from_str(&overlay.markup);
        let (mut width, mut height, mut view_box) = (None, None, None);
        loop {
            match reader.read_event() {
                Ok(Event::Start(root)) | Ok(Event::Empty(root)) => {
                    for attr in root.attributes().flatten() {
                        let value = String::from_utf8_lossy(&attr.value).into_owned();
                        match attr.key.as_ref() {
                            b"width" => width = Some(Dimension::Text(value)),
                            b"height" => height = Some(Dimension::Text(value)),
                            b"viewBox" => view_box = Some(value),
                            _ => {}
                        }
                    }
                    break;
                }
                Ok(Event::Eof) | Err(_) => break,
                Ok(_) => {}
            }
        }

        overlay.width = width;
        overlay.height = height;
        overlay.view_box = view_box;
        overlay
    }

    /// An `<image>` element referencing `href`, with its size declared
    pub fn image(
        href: &str,
        width: impl Into<Dimension>,
        height: impl Into<Dimension>,
    ) -> Self {
        let width = width.into();
        let height = height.into();
        Self {
            markup: format!(
                r#"<image href="{}" width="{}" height="{}"/>"#,
                escape_xml(href),
                escape_xml(&width.to_string()),
                escape_xml(&height.to_string())
            ),
            width: Some(width),
            height: Some(height),
            view_box: None,
        }
    }

    /// Raster bytes (PNG, JPEG, ...) inlined as a base64 `data:` URI
    pub fn embedded_image(
        mime: &str,
        bytes: &[u8],
        width: impl Into<Dimension>,
        height: impl Into<Dimension>,
    ) -> Self {
        let href = format!("data:{};base64,{}", mime, STANDARD.encode(bytes));
        Self::image(&href, width, height)
    }

    /// Declare the width
    pub fn with_width(mut self, width: impl Into<Dimension>) -> Self {
        self.width = Some(width.into());
        self
    }

    /// Declare the height
    pub fn with_height(mut self, height: impl Into<Dimension>) -> Self {
        self.height = Some(height.into());
        self
    }

    /// Declare a viewBox
    pub fn with_view_box(mut self, view_box: impl Into<String>) -> Self {
        self.view_box = Some(view_box.into());
        self
    }

    /// Drop every declared dimension, leaving measurement as the only way
    /// to size this overlay
    pub fn without_declared_size(mut self) -> Self {
        self.width = None;
        self.height = None;
        self.view_box = None;
        self
    }
}

impl OverlayContent for Overlay {
    fn declared_size(&self) -> Option<Footprint> {
        let width = self.width.as_ref().and_then(Dimension::to_number);
        let height = self.height.as_ref().and_then(Dimension::to_number);
        // Zero counts as undeclared so a viewBox can still supply the size
        if let (Some(w), Some(h)) = (width, height) {
            if w != 0.0 && h != 0.0 {
                return Some(Footprint::new(w, h));
            }
        }

        self.view_box.as_deref().and_then(parse_view_box)
    }

    fn markup(&self) -> &str {
        &self.markup
    }

    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.markup.hash(&mut hasher);
        for dim in [&self.width, &self.height] {
            match dim {
                Some(d) => d.hash_into(&mut hasher),
                None => 0u8.hash(&mut hasher),
            }
        }
        self.view_box.hash(&mut hasher);
        hasher.finish()
    }
}
