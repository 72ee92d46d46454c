//! Presentation-neutral layout of an insight record.
//!
//! The CLI prints these panels as text and the TUI styles them; both go
//! through [`panels`] so they agree on ordering and on empty sections.

use crate::analysis::{ActionItem, InsightRecord};
use crate::session::DemoInfo;

/// A titled group of entries, e.g. "Pain Points".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub title: &'static str,
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Heading(String),
    Bullet { marker: &'static str, text: String },
    Field { label: String, value: String },
    Empty,
}

const BULLET: &str = "•";

/// Lay out every insight panel in display order.
pub fn panels(record: &InsightRecord) -> Vec<Panel> {
    vec![
        pain_points_panel(record),
        categorized_panel("Buying Signals", &record.buying_signals.categories()),
        bullets_panel("Technical Requirements", &record.technical_requirements),
        categorized_panel("Stakeholders", &record.stakeholders.categories()),
        timeline_panel(record),
        pricing_panel(record),
    ]
}

fn pain_points_panel(record: &InsightRecord) -> Panel {
    let pain = &record.pain_points;
    let mut entries = Vec::new();
    for (category, points) in pain.categories() {
        if points.is_empty() {
            continue;
        }
        entries.push(Entry::Heading(category.to_string()));
        entries.extend(points.iter().map(|point| Entry::Bullet {
            marker: pain.priority_of(point).marker(),
            text: point.clone(),
        }));
    }
    finish("Pain Points", entries)
}

fn categorized_panel(title: &'static str, categories: &[(&'static str, &[String])]) -> Panel {
    let mut entries = Vec::new();
    for (category, items) in categories {
        if items.is_empty() {
            continue;
        }
        entries.push(Entry::Heading(category.to_string()));
        entries.extend(bullets(items));
    }
    finish(title, entries)
}

fn bullets_panel(title: &'static str, items: &[String]) -> Panel {
    finish(title, bullets(items).collect())
}

fn timeline_panel(record: &InsightRecord) -> Panel {
    let timeline = &record.timeline_info;
    let mut entries = Vec::new();
    if !timeline.start_date.trim().is_empty() {
        entries.push(Entry::Field {
            label: "Start Date".to_string(),
            value: timeline.start_date.clone(),
        });
    }
    for (heading, items) in [
        ("Implementation Phases", &timeline.implementation_phases),
        ("Dependencies", &timeline.dependencies),
        ("Key Milestones", &timeline.key_milestones),
    ] {
        if !items.is_empty() {
            entries.push(Entry::Heading(heading.to_string()));
            entries.extend(bullets(items));
        }
    }
    finish("Timeline", entries)
}

fn pricing_panel(record: &InsightRecord) -> Panel {
    let entries = record
        .pricing_discussion
        .entries()
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(label, value)| Entry::Field {
            label: label.to_string(),
            value: value.to_string(),
        })
        .collect();
    finish("Pricing Discussion", entries)
}

fn bullets(items: &[String]) -> impl Iterator<Item = Entry> + '_ {
    items.iter().map(|item| Entry::Bullet {
        marker: BULLET,
        text: item.clone(),
    })
}

fn finish(title: &'static str, mut entries: Vec<Entry>) -> Panel {
    if entries.is_empty() {
        entries.push(Entry::Empty);
    }
    Panel { title, entries }
}

/// One checklist line for an action item.
pub fn action_line(item: &ActionItem) -> String {
    format!(
        "{} {} (Owner: {}, Due: {})",
        item.priority().marker(),
        or_placeholder(&item.action),
        or_placeholder(&item.owner),
        or_placeholder(&item.deadline)
    )
}

fn or_placeholder(value: &str) -> &str {
    if value.trim().is_empty() {
        "n/a"
    } else {
        value
    }
}

/// Render the demo header, panels and action items as plain text.
pub fn render_text(record: &InsightRecord, demo: &DemoInfo) -> String {
    let mut out = String::new();

    if let Some(header) = demo_header(demo) {
        out.push_str(&header);
        out.push_str("\n\n");
    }

    for panel in panels(record) {
        out.push_str(&format!("== {} ==\n", panel.title));
        for entry in &panel.entries {
            match entry {
                Entry::Heading(text) => out.push_str(&format!("{}\n", text)),
                Entry::Bullet { marker, text } => out.push_str(&format!("  {} {}\n", marker, text)),
                Entry::Field { label, value } => out.push_str(&format!("{}: {}\n", label, value)),
                Entry::Empty => out.push_str("  (nothing captured)\n"),
            }
        }
        out.push('\n');
    }

    out.push_str("== Action Items ==\n");
    if record.next_steps.is_empty() {
        out.push_str("  (nothing captured)\n");
    }
    for item in &record.next_steps {
        out.push_str(&format!("[ ] {}\n", action_line(item)));
    }

    out
}

/// "Contact: Name (Role) | Demo date: ..." or `None` when nothing was given.
pub fn demo_header(demo: &DemoInfo) -> Option<String> {
    let mut parts = Vec::new();
    let name = demo.contact_name.trim();
    let role = demo.contact_role.trim();
    match (name.is_empty(), role.is_empty()) {
        (false, false) => parts.push(format!("Contact: {} ({})", name, role)),
        (false, true) => parts.push(format!("Contact: {}", name)),
        (true, false) => parts.push(format!("Contact role: {}", role)),
        (true, true) => {}
    }
    if !demo.demo_date.trim().is_empty() {
        parts.push(format!("Demo date: {}", demo.demo_date.trim()));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" | "))
    }
}
