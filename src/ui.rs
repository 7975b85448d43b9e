use chrono::{Local, NaiveDate};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, ComposerField, LinkStyle, NoticeKind, ProfileField, View, WallCard};
use crate::calendar::{self, Cell};
use crate::config::{ThemeConfig, APP_VERSION};
use crate::model::{Note, NoteColor};

const CARD_WIDTH: u16 = 30;
const CARD_HEIGHT: u16 = 10;
const EMPTY_STATE_HEIGHT: u16 = 5;
const CALENDAR_ROW_HEIGHT: u16 = 2;

pub fn draw(f: &mut Frame, app: &mut App) {
    draw_at(f, app, Local::now().date_naive());
}

/// Draws the whole screen with `today` used for the calendar highlight.
pub fn draw_at(f: &mut Frame, app: &mut App, today: NaiveDate) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);
    match app.views.active() {
        View::Wall => draw_wall(f, app, chunks[1]),
        View::Calendar => draw_calendar(f, app, chunks[1], today),
        View::Profile => draw_profile(f, app, chunks[1]),
    }
    draw_footer(f, app, chunks[2]);

    if app.composer.open {
        draw_composer(f, app);
    }
    if app.notice.is_some() {
        draw_notice(f, app);
    }
}

pub fn note_color(theme: &ThemeConfig, color: NoteColor) -> Color {
    match color {
        NoteColor::Yellow => theme.note_yellow,
        NoteColor::Pink => theme.note_pink,
        NoteColor::Orange => theme.note_orange,
        NoteColor::Blue => theme.note_blue,
    }
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.config.theme;
    let strings = app.strings();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" stickywall {} ", APP_VERSION))
        .title_style(Style::default().fg(theme.header).add_modifier(Modifier::BOLD))
        .border_style(Style::default().fg(theme.border_inactive));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let nickname_width = u16::try_from(app.header_nickname.chars().count())
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .min(inner.width / 2);
    let parts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(nickname_width)])
        .split(inner);

    let mut links = Vec::new();
    for (i, view) in View::ALL.into_iter().enumerate() {
        let style = match app.views.link_style(view) {
            LinkStyle::Active => Style::default()
                .fg(theme.link_active)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            LinkStyle::Inactive => Style::default().fg(theme.link_inactive),
        };
        links.push(Span::styled(format!(" {} {} ", i + 1, view.label(strings)), style));
        links.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(Line::from(links)), parts[0]);

    f.render_widget(
        Paragraph::new(app.header_nickname.as_str())
            .alignment(Alignment::Right)
            .style(Style::default().fg(theme.header).add_modifier(Modifier::BOLD)),
        parts[1],
    );
}

fn draw_wall(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.config.theme;
    let strings = app.strings();
    let cards = app.wall.cards();
    let selected = app.wall.selected();

    let columns = (area.width / CARD_WIDTH).max(1) as usize;
    let mut y = area.y;

    let mut selectable: Vec<(usize, WallCard)> = Vec::new();
    for card in cards {
        match card {
            WallCard::EmptyState => {
                let height = EMPTY_STATE_HEIGHT.min(area.height);
                let rect = Rect::new(area.x, y, area.width, height);
                let text = vec![
                    Line::from(Span::styled(
                        strings.empty_title,
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(strings.empty_hint),
                ];
                f.render_widget(
                    Paragraph::new(text)
                        .alignment(Alignment::Center)
                        .style(Style::default().fg(theme.link_inactive))
                        .block(
                            Block::default()
                                .borders(Borders::ALL)
                                .border_style(Style::default().fg(theme.border_inactive)),
                        ),
                    rect,
                );
                y += height;
            }
            other => {
                let index = selectable.len();
                selectable.push((index, other));
            }
        }
    }

    let body_height = area.bottom().saturating_sub(y);
    let visible_rows = (body_height / CARD_HEIGHT).max(1) as usize;
    let selected_row = selected / columns;
    let first_row = selected_row.saturating_sub(visible_rows - 1);

    for (index, card) in selectable {
        let row = index / columns;
        if row < first_row || row >= first_row + visible_rows {
            continue;
        }
        let x = area.x + (index % columns) as u16 * CARD_WIDTH;
        let top = y + ((row - first_row) as u16) * CARD_HEIGHT;
        let rect = Rect::new(x, top, CARD_WIDTH, CARD_HEIGHT).intersection(area);
        if rect.height == 0 || rect.width == 0 {
            continue;
        }
        let is_selected = index == selected;
        match card {
            WallCard::Note(note) => draw_note_card(f, app, note, rect, is_selected),
            WallCard::AddNote => {
                let border = if is_selected {
                    theme.border_active
                } else {
                    theme.border_inactive
                };
                let padding = "\n".repeat((rect.height.saturating_sub(3) / 2) as usize);
                f.render_widget(
                    Paragraph::new(format!("{}+", padding))
                        .alignment(Alignment::Center)
                        .style(Style::default().fg(theme.add_card).add_modifier(Modifier::BOLD))
                        .block(
                            Block::default()
                                .borders(Borders::ALL)
                                .border_style(Style::default().fg(border)),
                        ),
                    rect,
                );
            }
            WallCard::EmptyState => {}
        }
    }
}

fn draw_note_card(f: &mut Frame, app: &App, note: &Note, rect: Rect, is_selected: bool) {
    let theme = &app.config.theme;
    let bg = note_color(theme, note.color);
    let border_style = if is_selected {
        Style::default()
            .fg(theme.border_active)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.note_text)
    };

    let mut lines = vec![Line::from(Span::styled(
        note.title.as_str(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for (i, task) in note.tasks.iter().enumerate() {
        let mut style = Style::default();
        if task.is_completed {
            style = style.add_modifier(Modifier::CROSSED_OUT | Modifier::DIM);
        }
        if is_selected && app.wall.task_cursor() == Some(i) {
            style = style.add_modifier(Modifier::REVERSED);
        }
        let bullet = if app.wall.toggle_in_flight(&task.id) {
            "… "
        } else {
            "• "
        };
        lines.push(Line::from(vec![
            Span::raw(bullet),
            Span::styled(task.content.as_str(), style),
        ]));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(if is_selected { " × d " } else { "" });
    f.render_widget(
        Paragraph::new(lines)
            .style(Style::default().bg(bg).fg(theme.note_text))
            .wrap(Wrap { trim: true })
            .block(block),
        rect,
    );
}

fn draw_calendar(f: &mut Frame, app: &App, area: Rect, today: NaiveDate) {
    let theme = &app.config.theme;
    let grid = calendar::month_grid(app.calendar.reference(), today, app.config.general.locale);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(format!(" ‹  {}  › ", grid.title)).alignment(Alignment::Center))
        .border_style(Style::default().fg(theme.border_active));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows: Vec<&[Cell]> = grid.rows().collect();
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            rows.iter()
                .map(|_| Constraint::Length(CALENDAR_ROW_HEIGHT))
                .collect::<Vec<_>>(),
        )
        .split(inner);

    for (row, row_area) in rows.iter().zip(row_areas.iter()) {
        let col_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 7); 7])
            .split(*row_area);
        for (cell, cell_area) in row.iter().zip(col_areas.iter()) {
            let paragraph = match cell {
                Cell::Header(label) => Paragraph::new(*label).style(
                    Style::default()
                        .fg(theme.link_inactive)
                        .add_modifier(Modifier::BOLD),
                ),
                Cell::Blank => continue,
                Cell::Day { day, today } => {
                    let style = if *today {
                        Style::default()
                            .bg(theme.today_bg)
                            .fg(theme.today_fg)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(theme.foreground)
                    };
                    Paragraph::new(day.to_string()).style(style)
                }
            };
            f.render_widget(paragraph.alignment(Alignment::Center), *cell_area);
        }
    }
}

fn draw_profile(f: &mut Frame, app: &mut App, area: Rect) {
    let theme = app.config.theme.clone();
    let strings = app.strings();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", strings.nav_profile))
        .border_style(Style::default().fg(theme.border_inactive));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let form_width = inner.width.min(60);
    let form = Rect::new(inner.x + 1, inner.y, form_width.saturating_sub(1), inner.height);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(form);

    let focus = app.profile.focus;
    for (field, rect) in ProfileField::ALL.into_iter().zip(rows.iter()) {
        let focused = field == focus && app.notice.is_none();
        let textarea = &mut app.profile.fields[field as usize];
        style_field(textarea, &theme, field.label(strings).to_string(), focused);
        f.render_widget(&*textarea, *rect);
    }
}

fn style_field(textarea: &mut tui_textarea::TextArea, theme: &ThemeConfig, title: String, focused: bool) {
    let border = if focused {
        theme.border_active
    } else {
        theme.border_inactive
    };
    textarea.set_block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(border)),
    );
    textarea.set_cursor_line_style(Style::default());
    if focused {
        textarea.set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
    } else {
        textarea.set_cursor_style(Style::default());
    }
}

fn draw_composer(f: &mut Frame, app: &mut App) {
    let theme = app.config.theme.clone();
    let strings = app.strings();

    let area = centered_rect(60, 70, f.area());
    f.render_widget(Clear, area);

    let title = if app.composer.pending {
        format!("{}… ", strings.composer_title)
    } else {
        strings.composer_title.to_string()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(theme.border_active));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(inner);

    let focus = app.composer.focus;
    style_field(
        &mut app.composer.title,
        &theme,
        strings.composer_note_title.to_string(),
        focus == ComposerField::Title,
    );
    f.render_widget(&app.composer.title, rows[0]);
    style_field(
        &mut app.composer.tasks,
        &theme,
        strings.composer_tasks.to_string(),
        focus == ComposerField::Tasks,
    );
    f.render_widget(&app.composer.tasks, rows[1]);

    let mut swatches = Vec::new();
    for color in NoteColor::ALL {
        let swatch = Style::default()
            .bg(note_color(&theme, color))
            .fg(theme.note_text);
        if app.composer.is_ringed(color) {
            let ring = Style::default()
                .fg(theme.color_ring)
                .add_modifier(Modifier::BOLD);
            swatches.push(Span::styled("[", ring));
            swatches.push(Span::styled(
                format!(" {} ", color.as_str()),
                swatch.add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
            swatches.push(Span::styled("]", ring));
        } else {
            swatches.push(Span::raw(" "));
            swatches.push(Span::styled(format!(" {} ", color.as_str()), swatch));
            swatches.push(Span::raw(" "));
        }
        swatches.push(Span::raw(" "));
    }
    let border = if focus == ComposerField::Color {
        theme.border_active
    } else {
        theme.border_inactive
    };
    f.render_widget(
        Paragraph::new(Line::from(swatches)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(strings.composer_color)
                .border_style(Style::default().fg(border)),
        ),
        rows[2],
    );
}

fn draw_notice(f: &mut Frame, app: &App) {
    let Some(notice) = &app.notice else {
        return;
    };
    let theme = &app.config.theme;
    let color = match notice.kind {
        NoticeKind::Success => theme.notice_success,
        NoticeKind::Failure => theme.notice_failure,
    };

    let area = centered_rect(40, 25, f.area());
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(format!("\n{}\n\n[Enter] OK", notice.text))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
            ),
        area,
    );
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let help = if app.notice.is_some() {
        " Enter/Esc: Dismiss "
    } else if app.composer.open {
        match app.composer.focus {
            ComposerField::Color => {
                " ←/→ or y/p/o/b: Color  •  Tab: Field  •  Enter/Ctrl+S: Save  •  Esc: Cancel "
            }
            _ => " Tab: Field  •  Ctrl+S: Save  •  Esc: Cancel ",
        }
    } else {
        match app.views.active() {
            View::Wall => {
                " ←/→: Card  •  ↑/↓: Task  •  Enter: Toggle/Add  •  n: New  •  d: Delete  •  r: Reload  •  F1-F3: Views  •  q: Quit "
            }
            View::Calendar => {
                " ←/→: Month  •  t: Today  •  F1-F3: Views  •  q: Quit "
            }
            View::Profile => " Tab/↑/↓: Field  •  Enter: Save  •  F1-F3: Views  •  Ctrl+Q: Quit ",
        }
    };
    let mut spans = Vec::new();
    if app.creating > 0 {
        spans.push(Span::styled(
            app.strings().note_saving,
            Style::default()
                .fg(app.config.theme.header)
                .add_modifier(Modifier::BOLD),
        ));
    }
    spans.push(Span::raw(help));
    f.render_widget(
        Paragraph::new(Line::from(spans))
            .style(Style::default().fg(app.config.theme.border_inactive)),
        area,
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
