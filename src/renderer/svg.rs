//! SVG document generation from a computed layout

use crate::layout::{Footprint, LayoutResult, Point, RenderParams};
use crate::overlay::OverlayContent;

use super::path::background_path;
use super::SvgConfig;

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            elements: vec![],
            indent: 1,
        }
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add a filled path element
    pub fn add_path(&mut self, d: &str, fill: &str, extra_attrs: &str) {
        self.elements.push(format!(
            r#"{}<path d="{}" fill="{}"{}/>"#,
            self.indent_str(),
            d,
            escape_xml(fill),
            extra_attrs
        ));
    }

    /// Add the full-canvas background fill
    pub fn add_background(&mut self, size: f64, fill: &str) {
        let d = background_path(size).to_svg_d();
        self.add_path(&d, fill, "");
    }

    /// Add the dark-module path, drawn without anti-aliasing
    pub fn add_modules(&mut self, d: &str, fill: &str) {
        self.add_path(d, fill, r#" shape-rendering="crispEdges""#);
    }

    /// Add the overlay as a nested viewport at `origin`
    ///
    /// An empty footprint is drawn as a 1x1 viewport without a viewBox so
    /// the host can still lay it out and measure it.
    pub fn add_overlay(&mut self, origin: Point, footprint: Footprint, markup: &str) {
        let drawn = footprint.drawable();
        let view_box = if footprint.is_empty() {
            String::new()
        } else {
            format!(
                r#" viewBox="0 0 {} {}""#,
                footprint.width, footprint.height
            )
        };

        self.elements.push(format!(
            r#"{}<svg x="{}" y="{}" width="{}" height="{}"{} pointer-events="none">{}</svg>"#,
            self.indent_str(),
            origin.x,
            origin.y,
            drawn.width,
            drawn.height,
            view_box,
            markup
        ));
    }

    /// Build the final SVG string for a square canvas of side `size`
    pub fn build(self, size: f64) -> String {
        let nl = self.newline();

        let mut svg = String::new();

        // XML declaration for standalone
        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{0}" height="{0}" viewBox="0 0 {0} {0}" preserveAspectRatio="xMidYMid meet">"#,
            size
        ));
        svg.push_str(nl);

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Render a layout and its module path to an SVG document
///
/// Z-order is background, modules, then the overlay when one is given.
pub fn render_svg(
    layout: &LayoutResult,
    module_d: &str,
    params: &RenderParams,
    overlay: Option<&dyn OverlayContent>,
    config: &SvgConfig,
) -> String {
    let mut builder = SvgBuilder::new(config.clone());

    builder.add_background(layout.canvas, &params.background);
    builder.add_modules(module_d, &params.foreground);

    if let Some(content) = overlay {
        let footprint = layout.footprint.unwrap_or_else(Footprint::zero);
        builder.add_overlay(layout.mask.origin, footprint, content.markup());
    }

    builder.build(layout.canvas)
}

/// Escape special XML characters for text and attribute values
pub(crate) fn escape_xml(s: &str) -> String {
    quick_xml::escape::escape(s).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{ExclusionZone, Mask};
    use crate::overlay::Overlay;
    use insta::assert_snapshot;

    fn layout(footprint: Option<Footprint>, origin: Point) -> LayoutResult {
        LayoutResult {
            canvas: 20.0,
            margin: 2.0,
            grid_size: 2,
            cell_size: 8.0,
            footprint,
            mask: Mask {
                zone: ExclusionZone::empty(),
                origin,
            },
        }
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b"), "a &lt; b");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml(r#"say "hi""#), "say &quot;hi&quot;");
        assert_eq!(escape_xml("it's"), "it&apos;s");
        assert_eq!(escape_xml("plain"), "plain");
    }

    #[test]
    fn test_render_without_overlay() {
        let svg = render_svg(
            &layout(None, Point::new(2.0, 2.0)),
            "M2,2h8v8h-8z",
            &RenderParams::new().with_size(20.0).with_margin(2.0),
            None,
            &SvgConfig::default(),
        );
        assert_snapshot!(svg, @r###"
        <svg xmlns="http://www.w3.org/2000/svg" width="20" height="20" viewBox="0 0 20 20" preserveAspectRatio="xMidYMid meet">
          <path d="M0,0h20v20h-20z" fill="#fff"/>
          <path d="M2,2h8v8h-8z" fill="#000" shape-rendering="crispEdges"/>
        </svg>
        "###);
    }

    #[test]
    fn test_render_with_overlay() {
        let overlay = Overlay::image("logo.png", 6, 6);
        let svg = render_svg(
            &layout(Some(Footprint::new(6.0, 6.0)), Point::new(7.0, 7.0)),
            "",
            &RenderParams::new().with_size(20.0).with_margin(2.0),
            Some(&overlay),
            &SvgConfig::default().with_pretty_print(false),
        );
        assert_eq!(
            svg,
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="20" viewBox="0 0 20 20" preserveAspectRatio="xMidYMid meet">"#,
                r##"<path d="M0,0h20v20h-20z" fill="#fff"/>"##,
                r##"<path d="" fill="#000" shape-rendering="crispEdges"/>"##,
                r#"<svg x="7" y="7" width="6" height="6" viewBox="0 0 6 6" pointer-events="none">"#,
                r#"<image href="logo.png" width="6" height="6"/></svg>"#,
                "</svg>"
            )
        );
    }

    #[test]
    fn test_empty_footprint_draws_one_pixel_viewport() {
        let overlay = Overlay::from_svg("<g/>");
        let svg = render_svg(
            &layout(Some(Footprint::zero()), Point::new(2.0, 2.0)),
            "",
            &RenderParams::new().with_size(20.0).with_margin(2.0),
            Some(&overlay),
            &SvgConfig::default(),
        );
        assert!(svg.contains(r#"<svg x="2" y="2" width="1" height="1" pointer-events="none"><g/></svg>"#));
        assert!(!svg.contains("viewBox=\"0 0 0 0\""));
    }

    #[test]
    fn test_standalone_declaration() {
        let svg = render_svg(
            &layout(None, Point::new(2.0, 2.0)),
            "",
            &RenderParams::default(),
            None,
            &SvgConfig::default().with_standalone(true),
        );
        assert!(svg.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_colors_are_escaped() {
        let svg = render_svg(
            &layout(None, Point::new(2.0, 2.0)),
            "",
            &RenderParams::new().with_foreground("a\"b"),
            None,
            &SvgConfig::default(),
        );
        assert!(svg.contains(r#"fill="a&quot;b""#));
    }
}
