//! Markdown → ratatui `Text` renderer.
//!
//! Thin wrapper around `pulldown_cmark` that converts markdown events into
//! styled `Line`/`Span` values. Headings, bold, italic, inline code, fenced
//! code blocks (with syntect highlighting), lists, blockquotes, and links.
//!
//! Output is wrapped to the requested width. Gutters (`│ ` for blockquotes
//! and code blocks) are repeated on every wrapped continuation line.

use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;
use textwrap::core::Fragment;
use textwrap::wrap_algorithms::wrap_first_fit;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::render::{ContentRenderer, RenderError};

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const CODE_THEME: &str = "base16-ocean.dark";
const RULE_WIDTH: usize = 40;

/// The reader pane's renderer.
pub struct MarkdownRenderer {
    base_fg: Color,
}

impl MarkdownRenderer {
    pub fn new(base_fg: Color) -> Self {
        Self { base_fg }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(Color::Reset)
    }
}

impl ContentRenderer for MarkdownRenderer {
    fn name(&self) -> &str {
        "markdown"
    }

    fn render(&self, source: &str, width: u16) -> Result<Text<'static>, RenderError> {
        Ok(render(source, self.base_fg, width))
    }
}

/// Parse markdown content into styled `Text`, wrapped to `width` columns.
/// A width of 0 disables wrapping.
///
/// Returns owned text (`'static`) so callers aren't constrained by input lifetime.
pub fn render(content: &str, base_fg: Color, width: u16) -> Text<'static> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TASKLISTS);

    let mut w = Writer::new(base_fg, width as usize);
    for event in Parser::new_ext(content, opts) {
        w.handle(event);
    }
    w.finish()
}

// ── Writer ──────────────────────────────────────────────────────────────────

struct Writer {
    lines: Vec<Line<'static>>,
    /// Number of leading gutter spans on each line in `lines`.
    prefix_lens: Vec<usize>,
    base_fg: Color,
    width: usize,
    /// Inline style stack (bold, italic, heading text, etc.). Styles compose
    /// via `patch` so nested bold+italic works.
    styles: Vec<Style>,
    /// Per-line prefix spans (blockquote `│`).
    line_prefixes: Vec<Span<'static>>,
    /// List nesting: None = unordered, Some(n) = ordered at index n.
    list_indices: Vec<Option<u64>>,
    /// Active syntax highlighter for fenced code blocks.
    highlighter: Option<HighlightLines<'static>>,
    /// True when inside a fenced code block without syntax highlighting.
    in_plain_code: bool,
    /// Stored link URL, appended after the link text closes.
    link_url: Option<String>,
    /// Whether the next block element should be preceded by a blank line.
    needs_newline: bool,
}

impl Writer {
    fn new(base_fg: Color, width: usize) -> Self {
        Self {
            lines: vec![],
            prefix_lens: vec![],
            base_fg,
            width,
            styles: vec![],
            line_prefixes: vec![],
            list_indices: vec![],
            highlighter: None,
            in_plain_code: false,
            link_url: None,
            needs_newline: false,
        }
    }

    fn finish(self) -> Text<'static> {
        if self.width == 0 {
            return Text::from(self.lines);
        }
        let mut wrapped = Vec::with_capacity(self.lines.len());
        for (line, prefix_len) in self.lines.into_iter().zip(self.prefix_lens) {
            wrapped.extend(wrap_line(line, prefix_len, self.width));
        }
        Text::from(wrapped)
    }

    // ── Style helpers ───────────────────────────────────────────────────

    /// Current effective style: top of stack, or base foreground color.
    fn style(&self) -> Style {
        self.styles
            .last()
            .copied()
            .unwrap_or_else(|| Style::default().fg(self.base_fg))
    }

    /// Push a style that composes with the current one (inherits parent modifiers).
    fn push_style(&mut self, overlay: Style) {
        self.styles.push(self.style().patch(overlay));
    }

    fn pop_style(&mut self) {
        self.styles.pop();
    }

    // ── Line/span helpers ───────────────────────────────────────────────

    fn push_line(&mut self, line: Line<'static>) {
        let mut out = line;
        for pfx in self.line_prefixes.iter().rev().cloned() {
            out.spans.insert(0, pfx);
        }
        self.lines.push(out);
        self.prefix_lens.push(self.line_prefixes.len());
    }

    fn push_span(&mut self, span: Span<'static>) {
        if let Some(line) = self.lines.last_mut() {
            line.push_span(span);
        } else {
            self.push_line(Line::from(vec![span]));
        }
    }

    fn blank_line_if_needed(&mut self) {
        if self.needs_newline {
            self.push_line(Line::default());
            self.needs_newline = false;
        }
    }

    fn rule_width(&self) -> usize {
        if self.width == 0 {
            RULE_WIDTH
        } else {
            RULE_WIDTH.min(self.width)
        }
    }

    // ── Event dispatch ──────────────────────────────────────────────────

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(tag) => self.close(tag),
            Event::Text(t) => self.text(t),
            Event::Code(c) => self.inline_code(c),
            Event::SoftBreak => self.push_span(Span::raw(" ")),
            Event::HardBreak => self.push_line(Line::default()),
            Event::Rule => {
                self.blank_line_if_needed();
                self.push_line(Line::from(Span::styled(
                    "─".repeat(self.rule_width()),
                    Style::default().fg(Color::DarkGray),
                )));
                self.needs_newline = true;
            }
            Event::TaskListMarker(checked) => {
                let marker = if checked { "[x] " } else { "[ ] " };
                self.push_span(Span::raw(marker));
            }
            _ => {} // HTML, footnotes, math: skipped
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        match tag {
            // ── Block elements ──────────────────────────────────────────
            Tag::Paragraph => {
                self.blank_line_if_needed();
                self.push_line(Line::default());
            }
            Tag::Heading { level, .. } => {
                self.blank_line_if_needed();
                let hs = heading_style(self.base_fg, level);
                let depth = heading_depth(level) as usize;
                self.push_line(Line::from(Span::styled(
                    format!("{} ", "#".repeat(depth)),
                    hs,
                )));
                // Heading text inherits the heading style, not just the `##`.
                self.push_style(hs);
            }
            Tag::BlockQuote(_) => {
                self.blank_line_if_needed();
                self.line_prefixes.push(Span::styled(
                    "│ ",
                    Style::default().fg(Color::DarkGray),
                ));
                self.push_style(
                    Style::default()
                        .fg(self.base_fg)
                        .add_modifier(Modifier::DIM | Modifier::ITALIC),
                );
            }
            Tag::CodeBlock(kind) => {
                if !self.lines.is_empty() {
                    self.push_line(Line::default());
                }
                let lang = match &kind {
                    CodeBlockKind::Fenced(l) => l.as_ref(),
                    CodeBlockKind::Indented => "",
                };

                // Top border: ╭── lang  or just ╭──
                let bs = Style::default().fg(Color::DarkGray);
                let top = if lang.is_empty() {
                    Line::from(Span::styled("╭──", bs))
                } else {
                    Line::from(vec![
                        Span::styled("╭── ", bs),
                        Span::styled(lang.to_owned(), bs.add_modifier(Modifier::BOLD)),
                        Span::styled(" ──", bs),
                    ])
                };
                self.push_line(top);

                // Left border prefix for code content
                self.line_prefixes.push(Span::styled("│ ", bs));

                if !lang.is_empty()
                    && let Some(syn) = SYNTAX_SET.find_syntax_by_token(lang)
                    && let Some(theme) = THEME_SET.themes.get(CODE_THEME)
                {
                    self.highlighter = Some(HighlightLines::new(syn, theme));
                }
                if self.highlighter.is_none() {
                    self.in_plain_code = true;
                }
            }
            Tag::List(start) => {
                if self.list_indices.is_empty() {
                    self.blank_line_if_needed();
                }
                self.list_indices.push(start);
            }
            Tag::Item => {
                self.push_line(Line::default());
                let depth = self.list_indices.len().saturating_sub(1);
                let indent = "  ".repeat(depth);
                if let Some(idx) = self.list_indices.last_mut() {
                    let marker = match idx {
                        None => format!("{indent}- "),
                        Some(n) => {
                            let s = format!("{indent}{}. ", n);
                            *n += 1;
                            s
                        }
                    };
                    self.push_span(Span::styled(marker, Style::default().fg(Color::DarkGray)));
                }
            }

            // ── Inline elements ─────────────────────────────────────────
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.link_url = Some(dest_url.to_string());
                self.push_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::UNDERLINED),
                );
            }
            _ => {} // Tables, images, definitions: skipped
        }
    }

    fn close(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.needs_newline = true,
            TagEnd::Heading(_) => {
                self.pop_style();
                self.needs_newline = true;
            }
            TagEnd::BlockQuote(_) => {
                self.line_prefixes.pop();
                self.pop_style();
                self.needs_newline = true;
            }
            TagEnd::CodeBlock => {
                self.highlighter = None;
                self.in_plain_code = false;
                self.line_prefixes.pop(); // remove │ prefix before bottom border
                let bs = Style::default().fg(Color::DarkGray);
                self.push_line(Line::from(Span::styled("╰──", bs)));
                self.needs_newline = true;
            }
            TagEnd::List(_) => {
                self.list_indices.pop();
                self.needs_newline = true;
            }
            TagEnd::Item => {}
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => self.pop_style(),
            TagEnd::Link => {
                self.pop_style();
                if let Some(url) = self.link_url.take() {
                    self.push_span(Span::raw(" ("));
                    self.push_span(Span::styled(
                        url,
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::UNDERLINED),
                    ));
                    self.push_span(Span::raw(")"));
                }
            }
            _ => {}
        }
    }

    // ── Content handlers ────────────────────────────────────────────────

    fn text(&mut self, cow: CowStr<'_>) {
        // Expand tabs → 4 spaces (ratatui renders \t as zero-width)
        let raw = cow.to_string();
        let text = if raw.contains('\t') {
            raw.replace('\t', "    ")
        } else {
            raw
        };

        // Highlighter is taken out while highlighting: highlight_line borrows
        // it mutably and push_line borrows self.
        if let Some(mut hl) = self.highlighter.take() {
            for line in LinesWithEndings::from(text.as_str()) {
                if let Ok(ranges) = hl.highlight_line(line, &SYNTAX_SET) {
                    let spans: Vec<Span<'static>> = ranges
                        .into_iter()
                        .filter_map(|(hl_style, frag)| {
                            let content = frag.trim_end_matches('\n').replace('\t', "    ");
                            if content.is_empty() {
                                return None;
                            }
                            let fg = Color::Rgb(
                                hl_style.foreground.r,
                                hl_style.foreground.g,
                                hl_style.foreground.b,
                            );
                            Some(Span::styled(content, Style::default().fg(fg)))
                        })
                        .collect();
                    if !spans.is_empty() {
                        self.push_line(Line::from(spans));
                    }
                }
            }
            self.highlighter = Some(hl);
            return;
        }

        // Plain code block (no highlighting available)
        if self.in_plain_code {
            let code_style = Style::default().fg(Color::White);
            for line in text.lines() {
                self.push_line(Line::from(Span::styled(line.to_owned(), code_style)));
            }
            return;
        }

        // Normal text inherits the current style
        let style = self.style();
        self.push_span(Span::styled(text, style));
    }

    fn inline_code(&mut self, cow: CowStr<'_>) {
        let style = Style::default().fg(Color::White).bg(Color::DarkGray);
        self.push_span(Span::styled(cow.to_string(), style));
    }
}

// ── Wrapping ────────────────────────────────────────────────────────────────

/// First-fit word wrap of one styled line. The first `prefix_len` spans are a
/// gutter: they are repeated on continuation lines and never split.
fn wrap_line(line: Line<'static>, prefix_len: usize, width: usize) -> Vec<Line<'static>> {
    if line.width() <= width {
        return vec![line];
    }

    let style = line.style;
    let mut prefix = line.spans;
    let body = prefix.split_off(prefix_len.min(prefix.len()));
    let prefix_width: usize = prefix.iter().map(Span::width).sum();
    let avail = width.saturating_sub(prefix_width).max(1);

    let words: Vec<StyledWord> = styled_words(body)
        .into_iter()
        .flat_map(|word| split_overlong(word, avail))
        .collect();

    wrap_first_fit(&words, &[avail as f64])
        .into_iter()
        .map(|row| {
            let mut spans = prefix.clone();
            let mut body = Vec::new();
            for (i, word) in row.iter().enumerate() {
                for piece in &word.word {
                    push_piece(&mut body, &piece.content, piece.style);
                }
                // Whitespace at a break is dropped.
                if i + 1 < row.len() {
                    for piece in &word.whitespace {
                        push_piece(&mut body, &piece.content, piece.style);
                    }
                }
            }
            spans.extend(body);
            Line::from(spans).style(style)
        })
        .collect()
}

/// A word and the whitespace after it. Either part may mix styles, e.g.
/// `**bold**,` is one word in two styles.
#[derive(Debug, Default)]
struct StyledWord {
    word: Vec<Span<'static>>,
    word_width: usize,
    whitespace: Vec<Span<'static>>,
    whitespace_width: usize,
}

impl Fragment for StyledWord {
    fn width(&self) -> f64 {
        self.word_width as f64
    }

    fn whitespace_width(&self) -> f64 {
        self.whitespace_width as f64
    }

    fn penalty_width(&self) -> f64 {
        0.0
    }
}

/// Append text to a span list, extending the last span when the style matches.
fn push_piece(spans: &mut Vec<Span<'static>>, text: &str, style: Style) {
    match spans.last_mut() {
        Some(last) if last.style == style => last.content.to_mut().push_str(text),
        _ => spans.push(Span::styled(text.to_owned(), style)),
    }
}

/// Leading whitespace (code indentation) stays glued to the first word.
fn styled_words(body: Vec<Span<'static>>) -> Vec<StyledWord> {
    let mut words = Vec::new();
    let mut current = StyledWord::default();
    for span in &body {
        for token in split_words(&span.content) {
            let token_width = token.width();
            if token.starts_with(char::is_whitespace) && !current.word.is_empty() {
                push_piece(&mut current.whitespace, token, span.style);
                current.whitespace_width += token_width;
            } else {
                if !current.whitespace.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
                push_piece(&mut current.word, token, span.style);
                current.word_width += token_width;
            }
        }
    }
    if !current.word.is_empty() {
        words.push(current);
    }
    words
}

/// Hard-break a word wider than `max` columns between characters.
fn split_overlong(word: StyledWord, max: usize) -> Vec<StyledWord> {
    if word.word_width <= max {
        return vec![word];
    }
    let mut chunks = Vec::new();
    let mut chunk = StyledWord::default();
    let mut buf = [0u8; 4];
    for span in &word.word {
        for ch in span.content.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if chunk.word_width + ch_width > max && chunk.word_width > 0 {
                chunks.push(std::mem::take(&mut chunk));
            }
            push_piece(&mut chunk.word, ch.encode_utf8(&mut buf), span.style);
            chunk.word_width += ch_width;
        }
    }
    chunk.whitespace = word.whitespace;
    chunk.whitespace_width = word.whitespace_width;
    chunks.push(chunk);
    chunks
}

/// Split into alternating runs of whitespace and non-whitespace.
fn split_words(s: &str) -> impl Iterator<Item = &str> {
    let mut rest = s;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let space = first.is_whitespace();
        let end = rest
            .find(|c: char| c.is_whitespace() != space)
            .unwrap_or(rest.len());
        let (token, tail) = rest.split_at(end);
        rest = tail;
        Some(token)
    })
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn heading_style(base_fg: Color, level: HeadingLevel) -> Style {
    match level {
        HeadingLevel::H1 => Style::default()
            .fg(base_fg)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        HeadingLevel::H2 => Style::default().fg(base_fg).add_modifier(Modifier::BOLD),
        _ => Style::default()
            .fg(base_fg)
            .add_modifier(Modifier::BOLD | Modifier::ITALIC),
    }
}

fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn plain_lines(text: &Text<'_>) -> Vec<String> {
        text.lines.iter().map(plain).collect()
    }

    #[test]
    fn heading_text_inherits_heading_style() {
        let text = render("## Hello", Color::Blue, 80);
        let line = &text.lines[0];
        assert!(line.spans.len() >= 2, "expected >= 2 spans, got {:?}", line);
        let prefix_style = line.spans[0].style;
        let text_style = line.spans[1].style;
        assert!(prefix_style.add_modifier.contains(Modifier::BOLD));
        assert!(text_style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(text_style.fg, Some(Color::Blue));
    }

    #[test]
    fn bold_text_is_bold() {
        let text = render("Some **bold** text", Color::Blue, 80);
        let line = &text.lines[0];
        let bold_span = line.spans.iter().find(|s| s.content == "bold").unwrap();
        assert!(bold_span.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn inline_code_styled() {
        let text = render("Use `foo()` here", Color::Blue, 80);
        let line = &text.lines[0];
        let code_span = line.spans.iter().find(|s| s.content == "foo()").unwrap();
        assert_eq!(code_span.style.fg, Some(Color::White));
        assert_eq!(code_span.style.bg, Some(Color::DarkGray));
    }

    #[test]
    fn code_block_has_border_structure() {
        let text = render("```\nline1\nline2\n```", Color::Blue, 80);
        let all_content = plain_lines(&text);
        assert!(all_content[0].starts_with('╭'), "expected top border, got {:?}", all_content[0]);
        assert!(all_content[1].starts_with("│ "), "expected │ prefix, got {:?}", all_content[1]);
        assert!(all_content[1].contains("line1"));
        assert!(all_content[2].starts_with("│ "), "expected │ prefix, got {:?}", all_content[2]);
        assert!(all_content[2].contains("line2"));
        let last = all_content.last().unwrap();
        assert!(last.starts_with('╰'), "expected bottom border, got {:?}", last);
    }

    #[test]
    fn plain_text_uses_base_color() {
        let text = render("hello", Color::Green, 80);
        let span = &text.lines[0].spans[0];
        assert_eq!(span.style.fg, Some(Color::Green));
    }

    #[test]
    fn tabs_expanded_to_spaces() {
        let text = render("```\n\tindented\n```", Color::Blue, 80);
        let has_spaces = text
            .lines
            .iter()
            .any(|l| l.spans.iter().any(|s| s.content.starts_with("    ")));
        assert!(has_spaces, "tabs should be expanded to 4 spaces");
        let has_tabs = text
            .lines
            .iter()
            .any(|l| l.spans.iter().any(|s| s.content.contains('\t')));
        assert!(!has_tabs, "no raw tabs should remain");
    }

    #[test]
    fn long_paragraph_wraps_at_word_boundaries() {
        let text = render("the quick brown fox jumps over the lazy dog", Color::Reset, 16);
        assert_eq!(
            plain_lines(&text),
            vec!["the quick brown", "fox jumps over", "the lazy dog"]
        );
    }

    #[test]
    fn wrapped_lines_never_exceed_width() {
        let source = "# A heading that is rather long\n\n\
            Some **bold words** and `inline code` mixed with plain prose that \
            keeps going for a while.\n\n\
            - a list item long enough to need wrapping as well\n\n\
            > quoted text that also runs past the edge of the pane";
        for width in [12u16, 20, 33] {
            let text = render(source, Color::Reset, width);
            for line in &text.lines {
                assert!(
                    line.width() <= width as usize,
                    "line {:?} wider than {}",
                    plain(line),
                    width
                );
            }
        }
    }

    #[test]
    fn wrapped_quote_repeats_gutter() {
        let text = render("> one two three four five six", Color::Reset, 12);
        let lines = plain_lines(&text);
        assert!(lines.len() > 1, "expected wrapping, got {:?}", lines);
        for line in lines.iter().filter(|l| !l.is_empty()) {
            assert!(line.starts_with("│ "), "missing gutter on {:?}", line);
        }
    }

    #[test]
    fn overlong_word_is_hard_broken() {
        let text = render("abcdefghijklmnop", Color::Reset, 5);
        assert_eq!(plain_lines(&text), vec!["abcde", "fghij", "klmno", "p"]);
    }

    #[test]
    fn wrapping_keeps_span_styles() {
        let text = render("plain words then **bold words here**", Color::Reset, 18);
        let bold: Vec<&str> = text
            .lines
            .iter()
            .flat_map(|l| l.spans.iter())
            .filter(|s| s.style.add_modifier.contains(Modifier::BOLD))
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(
            bold.join(" ").split_whitespace().collect::<Vec<_>>(),
            vec!["bold", "words", "here"]
        );
    }

    #[test]
    fn zero_width_disables_wrapping() {
        let source = "word ".repeat(50);
        let text = render(&source, Color::Reset, 0);
        assert_eq!(text.lines.len(), 1);
    }

    #[test]
    fn rule_fits_narrow_width() {
        let text = render("---", Color::Reset, 10);
        assert_eq!(plain_lines(&text), vec!["─".repeat(10)]);
    }

    #[test]
    fn renderer_is_pure() {
        let renderer = MarkdownRenderer::default();
        let a = renderer.render("# Title\n\nbody", 30).unwrap();
        let b = renderer.render("# Title\n\nbody", 30).unwrap();
        assert_eq!(a, b);
        assert_eq!(renderer.name(), "markdown");
    }
}
