//! Page documents
//!
//! Builds the scrollable body of each page as a list of lines. Staggered
//! children that are not yet revealed render as blank rows of the same
//! height, so revealing a child never moves anything below it. About's skill
//! bars follow its last section and grow in place.

use folio_app::Page;
use folio_core::{
    contact::{ContactForm, Field},
    env::Timestamp,
    hover::HoverCard,
    router::ViewId,
    skills::SkillMeters,
    viewport::Region,
};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::content::{self, BADGE, PORTRAIT, SKILLS, Section};

/// Width of the hero portrait card, borders included.
pub const CARD_WIDTH: u16 = 28;

/// Left margin of the hero portrait card.
pub const CARD_INDENT: u16 = 2;

/// Cells inside a skill bar's brackets.
const SKILL_BAR_WIDTH: usize = 20;

/// Card scale at or above which it is drawn lifted.
const LIFTED_SCALE: f32 = 1.1;

const CONFIRMATION: &str = "Thank you! Your message has been sent.";

/// Rendered page body.
#[derive(Debug, Default)]
pub struct Document {
    /// Every line of the page, top to bottom.
    pub lines: Vec<Line<'static>>,
    /// Block whose visibility drives the reveal, in document rows.
    pub tracked: Option<Region>,
    /// Rows covered by the hero card while it is shown.
    pub card: Option<Region>,
}

impl Document {
    /// Total height in rows.
    pub fn height(&self) -> u32 {
        u32::try_from(self.lines.len()).unwrap_or(u32::MAX)
    }

    fn push(&mut self, line: Line<'static>) {
        self.lines.push(line);
    }

    fn blank(&mut self, rows: usize) {
        self.lines.extend(std::iter::repeat_n(Line::default(), rows));
    }

    fn section(&mut self, section: &Section, visible: bool) {
        if !visible {
            self.blank(section.height());
            return;
        }

        if !section.heading.is_empty() {
            self.push(Line::from(Span::styled(
                section.heading,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )));
        }
        self.lines.extend(section.body.iter().map(|line| Line::raw(*line)));
        self.blank(1);
    }
}

/// Build the document for a mounted page.
pub fn page<I: Timestamp>(page: &Page<I>, focus: Option<Field>) -> Document {
    let view = page.view();
    let reveal = page.reveal();
    let sections = content::sections(view);
    let mut doc = Document::default();

    for (index, section) in sections.iter().enumerate() {
        doc.section(section, reveal.child_variant(index).is_visible());
    }

    let widget_visible = reveal.child_variant(sections.len()).is_visible();
    match view {
        ViewId::Home => {
            let card = page.hover().cloned().unwrap_or_default();
            hero_card(&mut doc, &card, widget_visible);
            doc.tracked = Some(Region::new(0, doc.height()));
        },
        ViewId::Contact => {
            if let Some(form) = page.form() {
                contact_form(&mut doc, form, focus, widget_visible);
            }
        },
        ViewId::About => {
            if let Some(skills) = page.skills() {
                let last = sections.len().saturating_sub(1);
                skill_bars(&mut doc, skills, reveal.child_variant(last).is_visible());
            }
        },
        ViewId::Location => {},
    }

    for section in content::trailing_sections(view) {
        doc.section(section, true);
    }
    doc
}

/// Build the fallback document for a path with no route.
pub fn not_found(path: &str) -> Document {
    let mut doc = Document::default();
    doc.blank(1);
    doc.push(Line::from(Span::styled(
        "404 | Page not found",
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    )));
    doc.blank(1);
    doc.push(Line::raw(format!("Nothing lives at {path}")));
    doc.blank(1);
    doc.push(Line::from(Span::styled("[1] Back home", Style::default().fg(Color::Cyan))));
    doc
}

fn card_height() -> usize {
    PORTRAIT.len() + 2
}

fn hero_card(doc: &mut Document, card: &HoverCard, visible: bool) {
    let rows = card_height() + BADGE.len() + 1;
    if !visible {
        doc.blank(rows);
        return;
    }

    let lifted = card.card_pose().scale >= LIFTED_SCALE;
    let border = if lifted {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let indent = " ".repeat(usize::from(CARD_INDENT));
    let inner = usize::from(CARD_WIDTH) - 2;
    let top = doc.height();

    doc.push(Line::styled(format!("{indent}\u{250c}{}\u{2510}", "\u{2500}".repeat(inner)), border));
    for row in PORTRAIT {
        doc.push(Line::from(vec![
            Span::styled(format!("{indent}\u{2502}"), border),
            Span::raw(format!("{row:<inner$}")),
            Span::styled("\u{2502}", border),
        ]));
    }
    doc.push(Line::styled(format!("{indent}\u{2514}{}\u{2518}", "\u{2500}".repeat(inner)), border));
    doc.card = Some(Region::new(top, doc.height() - top));

    if card.badge_pose().is_visible() {
        for line in BADGE {
            doc.push(Line::from(Span::styled(*line, Style::default().fg(Color::Green))));
        }
    } else {
        doc.blank(BADGE.len());
    }
    doc.blank(1);
}

fn skill_bars<I: Timestamp>(doc: &mut Document, skills: &SkillMeters<I>, visible: bool) {
    if !visible {
        doc.blank(SKILLS.len() + 1);
        return;
    }

    for (index, (label, level)) in SKILLS.iter().enumerate() {
        let reach = f64::from((*level).min(100)) / 100.0 * skills.progress(index);
        let filled = ((reach * SKILL_BAR_WIDTH as f64).round() as usize).min(SKILL_BAR_WIDTH);
        let level = if *level > 100 { "Over 9000!".to_string() } else { format!("{level:>3}%") };

        doc.push(Line::from(vec![
            Span::raw(format!("  {label:<11} [")),
            Span::styled("#".repeat(filled), Style::default().fg(Color::Green)),
            Span::raw(format!("{}] {level}", "-".repeat(SKILL_BAR_WIDTH - filled))),
        ]));
    }
    doc.blank(1);
}

fn contact_form<I: Timestamp>(doc: &mut Document, form: &ContactForm<I>, focus: Option<Field>, visible: bool) {
    let rows = 1 + Field::ALL.len() * 2 + 2;
    if !visible {
        doc.blank(rows);
        return;
    }

    doc.push(Line::from(Span::styled(
        "Send a message",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )));

    for field in Field::ALL {
        let focused = focus == Some(field);
        let (marker, style) = if focused {
            ("> ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        } else {
            ("  ", Style::default())
        };
        doc.push(Line::styled(format!("{marker}{}", field.label()), style));

        let value = form.field(field);
        let shown = match (value.is_empty(), focused) {
            (true, false) => Span::styled("    ...", Style::default().fg(Color::DarkGray)),
            (_, true) => Span::raw(format!("    {value}_")),
            (false, false) => Span::raw(format!("    {value}")),
        };
        doc.push(Line::from(shown));
    }

    if form.is_submitted() {
        doc.push(Line::from(Span::styled(CONFIRMATION, Style::default().fg(Color::Green))));
    } else {
        doc.push(Line::from(Span::styled("  [Tab] fill in  [Enter] send", Style::default().fg(Color::DarkGray))));
    }
    doc.blank(1);
}
