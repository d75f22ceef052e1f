//! Breadcrumb of the locations the visitor came through.

use ratatui::prelude::*;
use ratatui::widgets::Tabs;

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let trail = app.tour.state().trail();
    let titles: Vec<String> = trail.iter().map(|name| format!(" {} ", name)).collect();

    let tabs = Tabs::new(titles)
        .select(trail.len().saturating_sub(1))
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Cyan).bold())
        .divider("›");

    frame.render_widget(tabs, area);
}
