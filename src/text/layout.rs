use euclid::default::{Box2D, Point2D};

use crate::style::Style;
use crate::text::span::TextSpan;

/// Configuration knobs used by parsing and layout.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutOptions {
    /// Multiplier applied to every line's natural height.
    pub line_height_scale: f32,
    /// Indentation added to the inherited style for each `<li>` item.
    pub list_indent: f32,
    /// Prefix span inserted before each `<li>` item's content.
    pub bullet: String,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            line_height_scale: 1.0,
            list_indent: 18.0,
            bullet: "\u{2022} ".to_string(),
        }
    }
}

/// Vertical extents of a style's font, following the fontdue convention:
/// `ascent` is positive, `descent` is negative or zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerticalMetrics {
    pub ascent: f32,
    pub descent: f32,
    pub line_gap: f32,
}

impl VerticalMetrics {
    pub const ZERO: Self = Self {
        ascent: 0.0,
        descent: 0.0,
        line_gap: 0.0,
    };

    /// Natural line height before scaling.
    pub fn height(&self) -> f32 {
        self.ascent - self.descent + self.line_gap
    }
}

/// Measurement seam between layout and the font backend.
///
/// [`crate::FontLibrary`] implements this with fontdue metrics; tests use a
/// deterministic fixed-advance implementation.
pub trait StyleMetrics {
    /// Width of `text` rendered in `style`, including trailing advance.
    fn text_width(&mut self, text: &str, style: &Style) -> f32;

    /// Vertical extents of `style`'s font at `style.size`.
    fn vertical_metrics(&mut self, style: &Style) -> VerticalMetrics;
}

/// Final layout output produced by [`wrap`].
#[derive(Clone, Debug, PartialEq)]
pub struct ParagraphLayout {
    /// The width the layout was computed against.
    pub width: f32,
    /// Widest line actually produced; exceeds `width` only when a single
    /// word overflows it.
    pub max_line_width: f32,
    /// Sum of line heights.
    pub height: f32,
    pub lines: Vec<LayoutLine>,
    /// One rectangle per placed word whose span is a link, in storage
    /// order (line order, then word order). Fully rebuilt on every layout.
    pub links: Vec<LinkRect>,
}

impl ParagraphLayout {
    /// Index of the span behind the first link rectangle containing `point`.
    pub fn link_at(&self, point: Point2D<f32>) -> Option<usize> {
        self.links
            .iter()
            .find(|link| link.rect.contains(point))
            .map(|link| link.span)
    }
}

/// A single row of placed words.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutLine {
    pub top: f32,
    pub height: f32,
    /// Absolute y of the text baseline within the layout.
    pub baseline: f32,
    /// End x of the last word, including indentation.
    pub width: f32,
    pub words: Vec<PlacedWord>,
}

/// A word fragment placed on a line. Words that cross span boundaries are
/// placed as one fragment per span so each keeps its own style.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedWord {
    pub x: f32,
    pub width: f32,
    /// Index into the paragraph's span collection.
    pub span: usize,
    pub text: String,
}

/// Clickable region of a link word, in layout-local coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkRect {
    pub rect: Box2D<f32>,
    /// Index into the paragraph's span collection.
    pub span: usize,
}

/// Single-style piece of a word under construction.
struct Fragment {
    span: usize,
    text: String,
}

/// A whitespace-delimited word, possibly spanning multiple styles.
struct Word {
    fragments: Vec<Fragment>,
    /// Span that contributed the space before this word, if any.
    space_before: Option<usize>,
}

/// Line accumulator used during placement.
struct LineBuild {
    words: Vec<PlacedWord>,
    cursor: f32,
    max_ascent: f32,
    min_descent: f32,
    max_line_gap: f32,
}

impl LineBuild {
    fn new(indent: f32) -> Self {
        Self {
            words: Vec::new(),
            cursor: indent,
            max_ascent: 0.0,
            min_descent: 0.0,
            max_line_gap: 0.0,
        }
    }

    fn merge_metrics(&mut self, vm: VerticalMetrics) {
        self.max_ascent = self.max_ascent.max(vm.ascent);
        self.min_descent = self.min_descent.min(vm.descent);
        self.max_line_gap = self.max_line_gap.max(vm.line_gap);
    }

    fn metrics(&self) -> VerticalMetrics {
        VerticalMetrics {
            ascent: self.max_ascent,
            descent: self.min_descent,
            line_gap: self.max_line_gap,
        }
    }
}

/// Lays out `spans` as one stream of whitespace-separated words against
/// `max_width`.
///
/// Words are placed greedily onto the current line; a word that would
/// overflow starts a new line, and a word wider than `max_width` still
/// occupies its own (overflowing) line. Each line starts at the indentation
/// carried by the style of the span that supplies its first word, so list
/// continuation lines stay aligned under the item text.
pub fn wrap(
    spans: &[TextSpan],
    metrics: &mut dyn StyleMetrics,
    options: &LayoutOptions,
    max_width: f32,
) -> ParagraphLayout {
    let words = tokenize(spans);

    let mut finished: Vec<(LineBuild, VerticalMetrics)> = Vec::new();
    let mut line: Option<LineBuild> = None;

    for word in &words {
        let fragment_widths: Vec<f32> = word
            .fragments
            .iter()
            .map(|fragment| metrics.text_width(&fragment.text, &spans[fragment.span].style))
            .collect();
        let word_width: f32 = fragment_widths.iter().sum();
        let indent = spans[word.fragments[0].span].style.indent;

        let mut current = match line.take() {
            Some(current) if !current.words.is_empty() => {
                let space_width = word
                    .space_before
                    .map(|span| metrics.text_width(" ", &spans[span].style))
                    .unwrap_or(0.0);
                if current.cursor + space_width + word_width > max_width {
                    // Break before the word; the separating space is dropped.
                    finished.push(finish(current));
                    LineBuild::new(indent)
                } else {
                    let mut current = current;
                    current.cursor += space_width;
                    current
                }
            }
            Some(current) => current,
            None => LineBuild::new(indent),
        };

        for (fragment, width) in word.fragments.iter().zip(&fragment_widths) {
            let style = &spans[fragment.span].style;
            current.merge_metrics(metrics.vertical_metrics(style));
            current.words.push(PlacedWord {
                x: current.cursor,
                width: *width,
                span: fragment.span,
                text: fragment.text.clone(),
            });
            current.cursor += width;
        }

        line = Some(current);
    }

    if let Some(last) = line.take()
        && !last.words.is_empty()
    {
        finished.push(finish(last));
    }

    let mut lines = Vec::with_capacity(finished.len());
    let mut links = Vec::new();
    let mut top = 0.0;
    let mut max_line_width: f32 = 0.0;

    for (build, vm) in finished {
        let height = (vm.height() * options.line_height_scale).max(0.0);
        let baseline = top + vm.ascent;
        let width = build.cursor;
        max_line_width = max_line_width.max(width);

        for word in &build.words {
            if spans[word.span].style.is_link() {
                links.push(LinkRect {
                    rect: Box2D::new(
                        Point2D::new(word.x, top),
                        Point2D::new(word.x + word.width, top + height),
                    ),
                    span: word.span,
                });
            }
        }

        lines.push(LayoutLine {
            top,
            height,
            baseline,
            width,
            words: build.words,
        });
        top += height;
    }

    ParagraphLayout {
        width: max_width,
        max_line_width,
        height: top,
        lines,
        links,
    }
}

fn finish(line: LineBuild) -> (LineBuild, VerticalMetrics) {
    let vm = line.metrics();
    (line, vm)
}

/// Splits the span stream into words. Spans concatenate without an implicit
/// space, so a word continues across a span boundary unless one side
/// already carries a space.
fn tokenize(spans: &[TextSpan]) -> Vec<Word> {
    let mut words = Vec::new();
    let mut current: Option<Word> = None;
    let mut pending_space: Option<usize> = None;

    for (index, span) in spans.iter().enumerate() {
        for ch in span.text().chars() {
            if ch == ' ' {
                if let Some(word) = current.take() {
                    words.push(word);
                }
                pending_space = Some(index);
                continue;
            }

            match &mut current {
                Some(word) => {
                    match word.fragments.last_mut() {
                        Some(fragment) if fragment.span == index => fragment.text.push(ch),
                        _ => word.fragments.push(Fragment {
                            span: index,
                            text: ch.to_string(),
                        }),
                    };
                }
                None => {
                    current = Some(Word {
                        fragments: vec![Fragment {
                            span: index,
                            text: ch.to_string(),
                        }],
                        space_before: pending_space.take(),
                    });
                }
            }
        }
    }

    if let Some(word) = current.take() {
        words.push(word);
    }

    words
}


#[cfg(test)]
mod tests {
    use super::testing::FixedMeasure;
    use super::*;
    use crate::style::Style;

    fn style(size: f32) -> Style {
        Style {
            size,
            ..Style::default()
        }
    }

    fn link_style(size: f32) -> Style {
        Style {
            size,
            href: Some("target".to_string()),
            ..Style::default()
        }
    }

    fn hello_world() -> Vec<TextSpan> {
        vec![
            TextSpan::new("Hello ", style(10.0)),
            TextSpan::new("world!", link_style(10.0)),
        ]
    }

    fn words_of(layout: &ParagraphLayout) -> Vec<String> {
        layout
            .lines
            .iter()
            .flat_map(|line| line.words.iter().map(|word| word.text.clone()))
            .collect()
    }

    #[test]
    fn test_empty_spans_produce_empty_layout() {
        let mut measure = FixedMeasure::default();
        let layout = wrap(&[], &mut measure, &LayoutOptions::default(), 100.0);
        assert!(layout.lines.is_empty());
        assert!(layout.links.is_empty());
        assert_eq!(layout.height, 0.0);
    }

    #[test]
    fn test_blank_span_produces_no_lines() {
        let mut measure = FixedMeasure::default();
        let spans = [TextSpan::new("   ", style(10.0))];
        let layout = wrap(&spans, &mut measure, &LayoutOptions::default(), 100.0);
        assert!(layout.lines.is_empty());
        assert_eq!(layout.height, 0.0);
    }

    #[test]
    fn test_single_line_when_width_suffices() {
        let mut measure = FixedMeasure::default();
        let spans = hello_world();
        let layout = wrap(&spans, &mut measure, &LayoutOptions::default(), 200.0);

        assert_eq!(layout.lines.len(), 1);
        assert_eq!(words_of(&layout), ["Hello", "world!"]);
        // "Hello" [0, 50), space [50, 60), "world!" [60, 120)
        let line = &layout.lines[0];
        assert_eq!(line.words[1].x, 60.0);
        assert_eq!(line.width, 120.0);
        assert_eq!(line.height, 10.0);
        assert_eq!(layout.height, 10.0);

        assert_eq!(layout.links.len(), 1);
        let link = &layout.links[0];
        assert_eq!(link.span, 1);
        assert_eq!(link.rect.min, Point2D::new(60.0, 0.0));
        assert_eq!(link.rect.max, Point2D::new(120.0, 10.0));
    }

    #[test]
    fn test_wraps_when_word_would_overflow() {
        let mut measure = FixedMeasure::default();
        let spans = hello_world();
        let layout = wrap(&spans, &mut measure, &LayoutOptions::default(), 80.0);

        assert_eq!(layout.lines.len(), 2);
        assert_eq!(words_of(&layout), ["Hello", "world!"]);
        assert_eq!(layout.height, 20.0);

        // The dropped separator space does not shift the wrapped word.
        assert_eq!(layout.lines[1].words[0].x, 0.0);
        let link = &layout.links[0];
        assert_eq!(link.rect.min, Point2D::new(0.0, 10.0));
        assert_eq!(link.rect.max, Point2D::new(60.0, 20.0));
    }

    #[test]
    fn test_overlong_word_occupies_its_own_line() {
        let mut measure = FixedMeasure::default();
        let spans = [
            TextSpan::new("a ", style(10.0)),
            TextSpan::new("incomprehensibilities b", style(10.0)),
        ];
        let layout = wrap(&spans, &mut measure, &LayoutOptions::default(), 50.0);

        assert_eq!(words_of(&layout), ["a", "incomprehensibilities", "b"]);
        assert_eq!(layout.lines.len(), 3);
        // The overlong word overflows its line, and nothing shares it.
        assert_eq!(layout.lines[1].words.len(), 1);
        assert!(layout.lines[1].width > 50.0);
        assert!(layout.max_line_width > 50.0);
    }

    #[test]
    fn test_word_continues_across_span_boundary() {
        let mut measure = FixedMeasure::default();
        let spans = [
            TextSpan::new("Hel", style(10.0)),
            TextSpan::new("lo world", style(10.0)),
        ];
        let layout = wrap(&spans, &mut measure, &LayoutOptions::default(), 500.0);

        assert_eq!(words_of(&layout), ["Hel", "lo", "world"]);
        let line = &layout.lines[0];
        // "Hel" and "lo" are fragments of one word: no space between them.
        assert_eq!(line.words[0].x, 0.0);
        assert_eq!(line.words[1].x, 30.0);
        assert_eq!(line.words[2].x, 60.0);
    }

    #[test]
    fn test_line_height_follows_tallest_style() {
        let mut measure = FixedMeasure::default();
        let spans = [
            TextSpan::new("small ", style(10.0)),
            TextSpan::new("LARGE", style(20.0)),
        ];
        let layout = wrap(&spans, &mut measure, &LayoutOptions::default(), 500.0);

        assert_eq!(layout.lines.len(), 1);
        assert_eq!(layout.lines[0].height, 20.0);
        assert_eq!(layout.lines[0].baseline, 15.0);
    }

    #[test]
    fn test_line_height_scale() {
        let mut measure = FixedMeasure::default();
        let options = LayoutOptions {
            line_height_scale: 1.5,
            ..LayoutOptions::default()
        };
        let spans = [TextSpan::new("text", style(10.0))];
        let layout = wrap(&spans, &mut measure, &options, 500.0);
        assert_eq!(layout.lines[0].height, 15.0);
    }

    #[test]
    fn test_indent_applies_to_every_line_of_indented_spans() {
        let mut measure = FixedMeasure::default();
        let indented = Style {
            indent: 18.0,
            ..style(10.0)
        };
        let spans = [TextSpan::new("alpha beta gamma", indented)];
        let layout = wrap(&spans, &mut measure, &LayoutOptions::default(), 90.0);

        assert!(layout.lines.len() > 1);
        for line in &layout.lines {
            assert_eq!(line.words[0].x, 18.0);
        }
    }

    #[test]
    fn test_word_sequence_preserved_across_widths() {
        let mut measure = FixedMeasure::default();
        let spans = [
            TextSpan::new("one two three ", style(10.0)),
            TextSpan::new("four five six seven", link_style(10.0)),
        ];
        let options = LayoutOptions::default();

        let reference = words_of(&wrap(&spans, &mut measure, &options, 10_000.0));
        let mut previous_line_count = 0;
        for width in [400.0, 250.0, 120.0, 60.0, 10.0] {
            let layout = wrap(&spans, &mut measure, &options, width);
            assert_eq!(words_of(&layout), reference, "width {width}");
            assert!(
                layout.lines.len() >= previous_line_count,
                "narrower width lost lines at {width}"
            );
            previous_line_count = layout.lines.len();
        }
    }

    #[test]
    fn test_lines_respect_width_unless_single_word_overflows() {
        let mut measure = FixedMeasure::default();
        let spans = [TextSpan::new(
            "alpha beta gamma delta epsilon zeta",
            style(10.0),
        )];
        for width in [70.0, 100.0, 130.0] {
            let layout = wrap(&spans, &mut measure, &LayoutOptions::default(), width);
            for line in &layout.lines {
                assert!(line.width <= width || line.words.len() == 1);
            }
        }
    }

    #[test]
    fn test_link_at_uses_first_match() {
        let mut measure = FixedMeasure::default();
        let spans = hello_world();
        let layout = wrap(&spans, &mut measure, &LayoutOptions::default(), 200.0);

        assert_eq!(layout.link_at(Point2D::new(70.0, 5.0)), Some(1));
        assert_eq!(layout.link_at(Point2D::new(10.0, 5.0)), None);
        assert_eq!(layout.link_at(Point2D::new(70.0, 50.0)), None);
    }
}
