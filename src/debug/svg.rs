//! Records observer calls and renders them as an SVG overlay

use crate::geometry::{Bounds, Point, Segment};

use super::{DebugColor, RouteObserver};

/// Configuration options for the debug SVG overlay
#[derive(Debug, Clone)]
pub struct SvgDebugConfig {
    /// Padding around the viewBox
    pub viewbox_padding: f64,

    /// Whether to format output with indentation
    pub pretty_print: bool,

    /// Prefix for CSS class names (e.g., "er-" for "er-route")
    pub class_prefix: Option<String>,
}

impl Default for SvgDebugConfig {
    fn default() -> Self {
        Self {
            viewbox_padding: 20.0,
            pretty_print: true,
            class_prefix: Some("er-".to_string()),
        }
    }
}

impl SvgDebugConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the viewBox padding
    pub fn with_viewbox_padding(mut self, padding: f64) -> Self {
        self.viewbox_padding = padding;
        self
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Set the CSS class prefix
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    /// Remove the CSS class prefix
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }
}

/// One recorded drawing call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Point(Point, DebugColor),
    Segment(Segment, DebugColor),
    Bounds(Bounds, DebugColor),
}

impl Primitive {
    fn extent(&self) -> Bounds {
        match self {
            Primitive::Point(p, _) => Bounds::new(p.x, p.y, p.x, p.y),
            Primitive::Segment(s, _) => Bounds::new(s.start.x, s.start.y, s.start.x, s.start.y)
                .expand_to_include(s.end),
            Primitive::Bounds(b, _) => *b,
        }
    }
}

/// Observer that keeps every drawing call, grouped by kernel step
#[derive(Debug, Clone, Default)]
pub struct SvgRecorder {
    setup: Vec<Primitive>,
    frames: Vec<Vec<Primitive>>,
    route: Vec<Point>,
}

impl SvgRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls made before the first kernel step
    pub fn setup(&self) -> &[Primitive] {
        &self.setup
    }

    /// Calls made during each kernel step
    pub fn frames(&self) -> &[Vec<Primitive>] {
        &self.frames
    }

    /// Attach the finished route (world space) to draw on top
    pub fn set_route(&mut self, route: &[Point]) {
        self.route = route.to_vec();
    }

    fn record(&mut self, primitive: Primitive) {
        match self.frames.last_mut() {
            Some(frame) => frame.push(primitive),
            None => self.setup.push(primitive),
        }
    }

    fn extent(&self) -> Option<Bounds> {
        let primitives = self
            .setup
            .iter()
            .chain(self.frames.iter().flatten())
            .map(Primitive::extent);
        let route = self.route.iter().map(|p| Bounds::new(p.x, p.y, p.x, p.y));
        primitives.chain(route).reduce(|a, b| a.union(&b))
    }

    /// Render everything recorded so far
    pub fn to_svg(&self, config: &SvgDebugConfig) -> String {
        let mut w = SvgWriter::new(config);
        let extent = self
            .extent()
            .unwrap_or(Bounds::new(0.0, 0.0, 0.0, 0.0))
            .inflate(config.viewbox_padding);

        w.line(
            0,
            &format!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
                extent.min_x,
                extent.min_y,
                extent.width(),
                extent.height()
            ),
        );

        if !self.setup.is_empty() {
            w.line(1, &format!(r#"<g class="{}setup">"#, w.prefix));
            for primitive in &self.setup {
                w.primitive(2, primitive);
            }
            w.line(1, "</g>");
        }

        for (step, frame) in self.frames.iter().enumerate() {
            w.line(
                1,
                &format!(r#"<g class="{}frame" data-step="{}">"#, w.prefix, step),
            );
            for primitive in frame {
                w.primitive(2, primitive);
            }
            w.line(1, "</g>");
        }

        if !self.route.is_empty() {
            let points = self
                .route
                .iter()
                .map(|p| format!("{},{}", p.x, p.y))
                .collect::<Vec<_>>()
                .join(" ");
            w.line(
                1,
                &format!(
                    r##"<polyline class="{}route" points="{}" fill="none" stroke="#333333"/>"##,
                    w.prefix, points
                ),
            );
        }

        w.line(0, "</svg>");
        w.out
    }
}

impl RouteObserver for SvgRecorder {
    fn clear(&mut self) {
        self.setup.clear();
        self.frames.clear();
        self.route.clear();
    }

    fn new_frame(&mut self) {
        self.frames.push(Vec::new());
    }

    fn point(&mut self, point: Point, color: DebugColor) {
        self.record(Primitive::Point(point, color));
    }

    fn segment(&mut self, segment: Segment, color: DebugColor) {
        self.record(Primitive::Segment(segment, color));
    }

    fn bounds(&mut self, bounds: Bounds, color: DebugColor) {
        self.record(Primitive::Bounds(bounds, color));
    }
}

struct SvgWriter<'a> {
    config: &'a SvgDebugConfig,
    prefix: String,
    out: String,
}

impl<'a> SvgWriter<'a> {
    fn new(config: &'a SvgDebugConfig) -> Self {
        Self {
            config,
            prefix: config.class_prefix.clone().unwrap_or_default(),
            out: String::new(),
        }
    }

    fn line(&mut self, depth: usize, text: &str) {
        if self.config.pretty_print {
            self.out.push_str(&"  ".repeat(depth));
        }
        self.out.push_str(text);
        if self.config.pretty_print {
            self.out.push('\n');
        }
    }

    fn primitive(&mut self, depth: usize, primitive: &Primitive) {
        let prefix = &self.prefix;
        let element = match primitive {
            Primitive::Point(p, color) => format!(
                r#"<circle class="{}point" cx="{}" cy="{}" r="2" fill="{}"/>"#,
                prefix,
                p.x,
                p.y,
                color.as_css()
            ),
            Primitive::Segment(s, color) => format!(
                r#"<line class="{}segment" x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}"/>"#,
                prefix,
                s.start.x,
                s.start.y,
                s.end.x,
                s.end.y,
                color.as_css()
            ),
            Primitive::Bounds(b, color) => format!(
                r#"<rect class="{}bounds" x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{}"/>"#,
                prefix,
                b.min_x,
                b.min_y,
                b.width(),
                b.height(),
                color.as_css()
            ),
        };
        self.line(depth, &element);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SvgDebugConfig::default();
        assert_eq!(config.viewbox_padding, 20.0);
        assert!(config.pretty_print);
        assert_eq!(config.class_prefix, Some("er-".to_string()));
    }

    #[test]
    fn test_records_into_frames() {
        let mut recorder = SvgRecorder::new();
        recorder.bounds(Bounds::new(0.0, 0.0, 1.0, 1.0), DebugColor::Gray);
        recorder.new_frame();
        recorder.point(Point::new(1.0, 2.0), DebugColor::Red);
        recorder.new_frame();

        assert_eq!(recorder.setup().len(), 1);
        assert_eq!(recorder.frames().len(), 2);
        assert_eq!(
            recorder.frames()[0],
            vec![Primitive::Point(Point::new(1.0, 2.0), DebugColor::Red)]
        );

        recorder.clear();
        assert!(recorder.setup().is_empty());
        assert!(recorder.frames().is_empty());
    }

    #[test]
    fn test_compact_svg_output() {
        let mut recorder = SvgRecorder::new();
        recorder.bounds(Bounds::new(0.0, 0.0, 10.0, 10.0), DebugColor::Gray);
        recorder.new_frame();
        recorder.point(Point::new(5.0, 5.0), DebugColor::Red);
        recorder.set_route(&[Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);

        let config = SvgDebugConfig::new()
            .with_pretty_print(false)
            .with_viewbox_padding(5.0);
        let svg = recorder.to_svg(&config);

        assert_eq!(
            svg,
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="-5 -5 20 20">"#,
                r#"<g class="er-setup">"#,
                r##"<rect class="er-bounds" x="0" y="0" width="10" height="10" fill="none" stroke="#999999"/>"##,
                r#"</g>"#,
                r#"<g class="er-frame" data-step="0">"#,
                r##"<circle class="er-point" cx="5" cy="5" r="2" fill="#f44336"/>"##,
                r#"</g>"#,
                r##"<polyline class="er-route" points="0,0 10,0" fill="none" stroke="#333333"/>"##,
                r#"</svg>"#,
            )
        );
    }

    #[test]
    fn test_pretty_print_without_prefix() {
        let mut recorder = SvgRecorder::new();
        recorder.new_frame();
        recorder.segment(
            Segment::new(Point::new(0.0, 0.0), Point::new(0.0, 4.0)),
            DebugColor::Red,
        );

        let svg = recorder.to_svg(&SvgDebugConfig::new().without_class_prefix());
        assert!(svg.contains("\n  <g class=\"frame\" data-step=\"0\">\n"));
        assert!(svg.contains("    <line class=\"segment\" x1=\"0\" y1=\"0\" x2=\"0\" y2=\"4\""));
        assert!(svg.ends_with("</svg>\n"));
    }
}
