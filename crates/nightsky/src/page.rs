//! Page content layout and rendering.

use chrono::{Datelike, Local};
use nightsky_config::{Profile, Section};
use nightsky_core::Theme;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph},
};

use crate::clipboard::CopyButton;
use crate::nav::NavMenu;
use crate::reveal::{Extent, RevealObserver};

/// Greedy word wrap. Explicit newlines start a new line.
pub fn wrap_text(text: &str, width: u16) -> Vec<String> {
    let width = width.max(1) as usize;
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if needed > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(current);
    }
    lines
}

/// Sections laid out as rows of text for a given width.
#[derive(Debug, Clone)]
pub struct SectionLayout {
    /// Per section: title, body rows, trailing blank.
    pub rows: Vec<Vec<String>>,
    pub extents: Vec<Extent>,
}

impl SectionLayout {
    pub fn new(sections: &[Section], width: u16) -> Self {
        let mut rows = Vec::with_capacity(sections.len());
        let mut extents = Vec::with_capacity(sections.len());
        let mut top: u16 = 0;
        for section in sections {
            let mut block = vec![section.title.clone()];
            block.extend(wrap_text(&section.body, width));
            block.push(String::new());
            let height = u16::try_from(block.len()).unwrap_or(u16::MAX);
            extents.push(Extent { top, height });
            top = top.saturating_add(height);
            rows.push(block);
        }
        Self { rows, extents }
    }

    /// Total content height in rows.
    pub fn height(&self) -> u16 {
        self.extents
            .last()
            .map(|e| e.top.saturating_add(e.height))
            .unwrap_or(0)
    }

    /// Top row of a section.
    pub fn top_of(&self, index: usize) -> Option<u16> {
        self.extents.get(index).map(|e| e.top)
    }
}

/// Split the screen into header, body and footer.
pub fn split(area: Rect) -> [Rect; 3] {
    Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(area)
}

/// Body width for wrapping, with side padding.
pub fn body_width(area: Rect) -> u16 {
    area.width.saturating_sub(4).max(1)
}

pub fn render_header(
    frame: &mut Frame,
    area: Rect,
    theme: Theme,
    profile: &Profile,
    nav: NavMenu,
    copy: &CopyButton,
) {
    let accent = theme.accent();
    let muted = theme.muted();
    let title = Line::from(vec![
        Span::styled(profile.name.clone(), Style::new().fg(accent).bold()),
        Span::styled(format!("  {}", profile.tagline), Style::new().fg(muted)),
    ]);
    let controls = Line::from(vec![
        "t".bold().fg(accent),
        Span::styled(format!(" theme: {}  ", theme.as_str()), Style::new().fg(muted)),
        "m".bold().fg(accent),
        Span::styled(
            format!(" menu (expanded={})  ", nav.expanded_attr()),
            Style::new().fg(muted),
        ),
        "y".bold().fg(accent),
        Span::styled(format!(" {}", copy.label()), Style::new().fg(muted)),
    ]);
    let [_, title_area, controls_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);
    frame.render_widget(Paragraph::new(title).centered(), title_area);
    frame.render_widget(Paragraph::new(controls).centered(), controls_area);
}

/// Draw the visible slice of the sections. Unrevealed sections stay blank.
pub fn render_body(
    frame: &mut Frame,
    area: Rect,
    theme: Theme,
    layout: &SectionLayout,
    reveal: &RevealObserver,
    scroll: u16,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(layout.height() as usize);
    for (index, block) in layout.rows.iter().enumerate() {
        let shown = reveal.is_revealed(index);
        for (row, text) in block.iter().enumerate() {
            if !shown {
                lines.push(Line::raw(""));
            } else if row == 0 {
                lines.push(Line::styled(
                    text.clone(),
                    Style::new().fg(theme.accent()).bold(),
                ));
            } else {
                lines.push(Line::styled(text.clone(), Style::new().fg(theme.foreground())));
            }
        }
    }
    let visible: Vec<Line> = lines
        .into_iter()
        .skip(scroll as usize)
        .take(area.height as usize)
        .collect();
    let [_, inner, _] = Layout::horizontal([
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .areas(area);
    frame.render_widget(Paragraph::new(visible), inner);
}

/// Footer with the current year and either a status message or key help.
pub fn render_footer(
    frame: &mut Frame,
    area: Rect,
    theme: Theme,
    profile: &Profile,
    status: Option<&str>,
) {
    let year = Local::now().year();
    let accent = theme.accent();
    let mut spans = vec![Span::styled(
        format!("© {year} {}   ", profile.name),
        Style::new().fg(theme.muted()),
    )];
    match status {
        Some(message) => spans.push(Span::styled(message.to_string(), Style::new().fg(accent))),
        None => spans.extend([
            "↑↓".bold().fg(accent),
            " scroll  ".fg(theme.muted()),
            "q".bold().fg(accent),
            " quit".fg(theme.muted()),
        ]),
    }
    let footer = Line::from(spans).centered();
    frame.render_widget(footer, area);
}

/// Menu popup listing the sections, anchored under the header.
pub fn render_menu(frame: &mut Frame, area: Rect, theme: Theme, sections: &[Section]) {
    let width = sections
        .iter()
        .map(|s| s.title.chars().count() as u16 + 6)
        .max()
        .unwrap_or(10)
        .clamp(12, area.width.max(12));
    let height = (sections.len() as u16 + 2).min(area.height);
    let popup = Rect {
        x: area.x + area.width.saturating_sub(width + 1),
        y: area.y,
        width: width.min(area.width),
        height,
    };
    let items: Vec<Line> = sections
        .iter()
        .enumerate()
        .map(|(i, s)| {
            Line::from(vec![
                Span::styled(format!("{} ", i + 1), Style::new().fg(theme.accent()).bold()),
                Span::styled(s.title.clone(), Style::new().fg(theme.foreground())),
            ])
        })
        .collect();
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .title(" menu ")
        .style(Style::new().bg(theme.background()).fg(theme.muted()));
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(items).block(block), popup);
}

/// Manual-copy prompt shown when the clipboard is unavailable.
pub fn render_prompt(frame: &mut Frame, area: Rect, theme: Theme, email: &str) {
    let width = (email.chars().count() as u16 + 6)
        .max(CopyButton::PROMPT_TITLE.len() as u16 + 6)
        .min(area.width);
    let height = 5.min(area.height);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };
    let text = vec![
        Line::styled(email.to_string(), Style::new().fg(theme.foreground()).bold()),
        Line::styled("Esc / Enter to close", Style::new().fg(theme.muted())),
    ];
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .title(format!(" {} ", CopyButton::PROMPT_TITLE))
        .style(Style::new().bg(theme.background()).fg(theme.accent()));
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(text).centered().block(block), popup);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text() {
        assert_eq!(
            wrap_text("the quick brown fox", 10),
            vec!["the quick", "brown fox"]
        );
        assert_eq!(wrap_text("a\nb", 10), vec!["a", "b"]);
        assert_eq!(wrap_text("supercalifragilistic", 5), vec!["supercalifragilistic"]);
    }

    #[test]
    fn test_section_layout_extents() {
        let sections = vec![
            Section::new("One", "short"),
            Section::new("Two", "a b c d e f"),
        ];
        let layout = SectionLayout::new(&sections, 3);
        // title + 1 body + blank
        assert_eq!(layout.extents[0], Extent { top: 0, height: 3 });
        // title + "a b", "c d", "e f" + blank
        assert_eq!(layout.extents[1], Extent { top: 3, height: 5 });
        assert_eq!(layout.height(), 8);
        assert_eq!(layout.top_of(1), Some(3));
        assert_eq!(layout.top_of(2), None);
    }
}
