use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::models::BeerRecord;

/// Build the textual payload for the detail card. The collapsed view shows
/// only the name line; expanding reveals brand and style, mirroring the
/// "additional fields" toggle of the saved-record display.
pub(crate) fn build_record_lines(record: &BeerRecord, expanded: bool) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        record.display_title(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    if expanded {
        lines.push(detail_line("Brand", &record.brand));
        lines.push(detail_line("Name", &record.name));
        lines.push(detail_line("Style", &record.style));
    }

    lines
}

fn detail_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
        Span::raw(value.to_string()),
    ])
}
