// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Render the music player interface.
//!
//! This module renders the visual representation of the current track, the
//! transport controls, the playback policy indicators, the volume and the
//! progress bar.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph},
};

use crate::{
    App,
    presenter::ViewModel,
    render::icons::{
        DISC_FRAMES, DISC_STILL, FAVOURITE, ICON_MUTED, ICON_NEXT, ICON_PAUSE, ICON_PLAY,
        ICON_PREV, ICON_REPEAT, ICON_SHUFFLE, ICON_VOLUME_HIGH, ICON_VOLUME_LOW,
    },
    theme::Theme,
    util::format::format_time,
};

/// Renders the main player widget including track info and controls.
pub(crate) fn draw_player(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let view = app.controller.presenter();

    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(theme.border_colour))
        .padding(Padding::horizontal(1));

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner_area);

    draw_now_playing(f, chunks[0], view, theme, app.disc_frame);
    draw_detail(f, chunks[1], view, theme);
    draw_controls(f, chunks[2], view, theme);

    let position_gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(theme.accent_colour)
                .bg(theme.gauge_track_colour),
        )
        .ratio(view.progress_ratio())
        .label("")
        .use_unicode(true);

    f.render_widget(position_gauge, chunks[4]);
}

fn draw_now_playing(f: &mut Frame, area: Rect, view: &ViewModel, theme: &Theme, disc_frame: usize) {
    let info_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(16)])
        .split(area);

    let bold = Style::default().add_modifier(Modifier::BOLD);

    let Some(track) = &view.now_playing else {
        f.render_widget(
            Paragraph::new("No track loaded").fg(theme.table_index_fg),
            info_chunks[0],
        );
        return;
    };

    let disc = if view.is_playing {
        DISC_FRAMES[disc_frame % DISC_FRAMES.len()]
    } else {
        DISC_STILL
    };

    let mut spans = vec![
        Span::styled(format!("{} ", disc), bold.fg(theme.foreground_colour)),
        Span::styled(track.name(), bold.fg(theme.accent_colour)),
    ];
    if track.is_favorite() {
        spans.push(Span::styled(format!(" {}", FAVOURITE), bold.fg(theme.table_favourite_fg)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), info_chunks[0]);

    let time_line = Line::from(vec![
        Span::styled(format_time(view.current_seconds), bold.fg(theme.accent_colour)),
        Span::styled(" / ", bold.fg(theme.foreground_colour)),
        Span::styled(format_time(view.total_seconds), bold.fg(theme.accent_colour)),
    ]);

    f.render_widget(
        Paragraph::new(time_line).alignment(Alignment::Right),
        info_chunks[1],
    );
}

fn draw_detail(f: &mut Frame, area: Rect, view: &ViewModel, theme: &Theme) {
    let line = match (&view.error, &view.now_playing) {
        (Some(error), _) => Line::from(Span::styled(error.as_str(), Style::default().fg(theme.error_colour))),
        (None, Some(track)) => Line::from(vec![
            Span::styled("   cover ", Style::default().fg(theme.table_index_fg)),
            Span::styled(track.cover_image(), Style::default().fg(theme.foreground_colour)),
        ]),
        (None, None) => Line::from(""),
    };

    f.render_widget(Paragraph::new(line), area);
}

fn draw_controls(f: &mut Frame, area: Rect, view: &ViewModel, theme: &Theme) {
    let control_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(26)])
        .split(area);

    let indicator = |on: bool| -> Color {
        if on {
            theme.indicator_on_colour
        } else {
            theme.indicator_off_colour
        }
    };

    // The transport glyph shows the action the key will perform.
    let transport = if view.is_playing { ICON_PAUSE } else { ICON_PLAY };

    let controls = Line::from(vec![
        Span::styled(format!("   {}  ", ICON_PREV), Style::default().fg(theme.foreground_colour)),
        Span::styled(format!("{}  ", transport), Style::default().bold().fg(theme.accent_colour)),
        Span::styled(format!("{}    ", ICON_NEXT), Style::default().fg(theme.foreground_colour)),
        Span::styled(format!("{} ", ICON_SHUFFLE), Style::default().fg(indicator(view.shuffle))),
        Span::styled(format!("{} ", ICON_REPEAT), Style::default().fg(indicator(view.repeat))),
    ]);
    f.render_widget(Paragraph::new(controls), control_chunks[0]);

    let volume_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(5),
        ])
        .split(control_chunks[1]);

    let volume_icon = match view.volume {
        v if v <= 0.0 => ICON_MUTED,
        v if v < 0.5 => ICON_VOLUME_LOW,
        _ => ICON_VOLUME_HIGH,
    };
    f.render_widget(
        Paragraph::new(volume_icon).fg(theme.foreground_colour),
        volume_layout[0],
    );

    let volume_gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(theme.accent_colour)
                .bg(theme.gauge_track_colour),
        )
        .ratio(view.volume.clamp(0.0, 1.0))
        .label("")
        .use_unicode(true);
    f.render_widget(volume_gauge, volume_layout[1]);

    let volume_label = Paragraph::new(format!(" {}%", (view.volume * 100.0).round() as u16))
        .alignment(Alignment::Right)
        .fg(theme.foreground_colour);
    f.render_widget(volume_label, volume_layout[2]);
}
