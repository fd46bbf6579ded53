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

//! UI rendering logic for the playlist table.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Padding, Paragraph, Row, Table},
};

use crate::{
    components::TrackList,
    presenter::ViewModel,
    render::icons::{FAVOURITE, ICON_NOW_PLAYING},
    theme::Theme,
};

impl TrackList {
    pub(crate) fn draw(&mut self, f: &mut Frame, area: Rect, view: &ViewModel, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(area);

        let rows = self.visible_rows(&view.tracks);
        self.sync_selection(rows.len());

        self.draw_header(f, chunks[0], view, rows.len(), theme);
        self.draw_table(f, chunks[1], view, &rows, theme);
    }

    fn draw_header(&self, f: &mut Frame, area: Rect, view: &ViewModel, shown: usize, theme: &Theme) {
        let header_block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme.border_colour))
            .padding(Padding::horizontal(1));

        let show_filter = self.is_filtering() || !self.filter.value().is_empty();

        let mut spans = Vec::new();
        if show_filter {
            spans.push(Span::styled(
                format!("/{} ", self.filter.value()),
                Style::default().fg(theme.accent_colour),
            ));
            spans.push(Span::styled(
                format!("({} shown) | ", shown),
                Style::default().fg(theme.table_index_fg),
            ));
        }

        spans.push(Span::styled(
            format!("Playlist | {} tracks", view.tracks.len()),
            Style::default().fg(theme.foreground_colour),
        ));

        let favourites = view.tracks.iter().filter(|t| t.is_favorite()).count();
        if favourites > 0 {
            spans.push(Span::styled(
                format!(" | {} {}", favourites, FAVOURITE),
                Style::default().fg(theme.table_favourite_fg),
            ));
        }

        let inner = header_block.inner(area);
        f.render_widget(Paragraph::new(Line::from(spans)).block(header_block), area);

        if self.is_filtering() {
            let cursor_x = inner.x + 1 + self.filter.cursor() as u16;
            f.set_cursor_position((cursor_x, inner.y));
        }
    }

    fn draw_table(&mut self, f: &mut Frame, area: Rect, view: &ViewModel, rows: &[usize], theme: &Theme) {
        let table_rows = rows.iter().filter_map(|&index| {
            let track = view.tracks.get(index)?;
            let is_current = view.current_index == Some(index);

            let marker = if is_current {
                Line::from(ICON_NOW_PLAYING).style(Style::default().fg(theme.table_current_fg))
            } else {
                Line::from("")
            };

            let title_style = if is_current {
                Style::default()
                    .fg(theme.table_current_fg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.table_track_fg)
            };

            let favourite = if track.is_favorite() {
                Line::from(FAVOURITE).style(Style::default().fg(theme.table_favourite_fg))
            } else {
                Line::from("")
            };

            Some(Row::new(vec![
                Cell::from(marker),
                Cell::from(
                    Line::from(format!("{}", index + 1))
                        .style(Style::default().fg(theme.table_index_fg))
                        .alignment(Alignment::Right),
                ),
                Cell::from(""),
                Cell::from(Line::from(track.name()).style(title_style)),
                Cell::from(favourite),
            ]))
        });

        let table = Table::new(
            table_rows,
            [
                Constraint::Length(2),
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(2),
            ],
        )
        .header(
            Row::new(vec![
                Cell::from(""),
                Cell::from(Line::from("#").alignment(Alignment::Right)),
                Cell::from(""),
                Cell::from("Title"),
                Cell::from(""),
            ])
            .style(Style::default().bold().fg(theme.accent_colour))
            .bottom_margin(1),
        )
        .row_highlight_style(Style::default().bg(theme.table_highlight_bg))
        .block(Block::default().padding(Padding::horizontal(1)));

        f.render_stateful_widget(table, area, &mut self.table_state);
    }
}
