use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AppState, LoginFocus, RegisterFocus, Route};

use super::styles;

/// Interior width of a form text field in characters
const FIELD_WIDTH: usize = 24;

/// Width of the centered form card
const CARD_WIDTH: u16 = 46;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_main_content(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame);
    }
}

fn render_title_bar(frame: &mut Frame, _app: &App, area: Rect) {
    let title = "  Authgate";
    let help_hint = "[Esc] Quit";

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            area.width
                .saturating_sub(title.len() as u16 + help_hint.len() as u16 + 4)
                as usize,
        )),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.route {
        Route::Login => render_login(frame, app, area),
        Route::Register => render_register(frame, app, area),
        Route::Profile => render_profile(frame, app, area),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let left_text = format!(" {} ", app.config.api_base_url());
    let right_text = " [Tab] Next field | [Enter] Select ";

    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left_text.len())
        .saturating_sub(right_text.len());

    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

/// Show the tail of a value in a fixed-width field, padded to width
fn field_display(value: &str, width: usize) -> String {
    let chars: Vec<char> = value.chars().collect();
    let shown: String = if chars.len() > width {
        chars[chars.len() - width..].iter().collect()
    } else {
        chars.iter().collect()
    };
    format!("{:<width$}", shown, width = width)
}

/// One labeled input field line: `Label: [value▌]`
fn field_line(label: &str, value: &str, masked: bool, focused: bool) -> Line<'static> {
    let display = if masked {
        field_display(&"*".repeat(value.chars().count()), FIELD_WIDTH)
    } else {
        field_display(value, FIELD_WIDTH)
    };
    let style = if focused {
        styles::selected_style()
    } else {
        styles::field_style()
    };
    let cursor = if focused { "▌" } else { "" };

    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{:<10}", label), styles::muted_style()),
        Span::styled("[", styles::muted_style()),
        Span::styled(format!("{}{}", display, cursor), style),
        Span::styled("]", styles::muted_style()),
    ])
}

/// A centered button line: `[ ▶ Label ◀ ]` when focused
fn button_line(label: &str, focused: bool) -> Line<'static> {
    let style = if focused {
        styles::selected_style()
    } else {
        styles::field_style()
    };
    if focused {
        Line::from(vec![
            Span::raw("            ["),
            Span::styled(format!(" ▶ {} ◀ ", label), style),
            Span::raw("]"),
        ])
    } else {
        Line::from(vec![
            Span::raw("            ["),
            Span::styled(format!("   {}   ", label), style),
            Span::raw("]"),
        ])
    }
}

fn centered_line(text: String, style: Style) -> Line<'static> {
    let width = CARD_WIDTH.saturating_sub(2) as usize;
    let pad = width.saturating_sub(text.chars().count()) / 2;
    Line::from(vec![
        Span::raw(" ".repeat(pad)),
        Span::styled(text, style),
    ])
}

fn render_login(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![
        centered_line(Route::Login.title().to_string(), styles::title_style()),
        Line::from(""),
    ];

    if let Some(ref error) = app.login.error {
        lines.push(Line::from(Span::styled(
            format!(" {}", error),
            styles::error_style(),
        )));
        lines.push(Line::from(""));
    }

    lines.push(field_line(
        "Email:",
        &app.login.email,
        false,
        app.login.focus == LoginFocus::Email,
    ));
    lines.push(field_line(
        "Password:",
        &app.login.password,
        true,
        app.login.focus == LoginFocus::Password,
    ));
    lines.push(Line::from(""));

    let label = if app.login.submitting {
        "Logging In..."
    } else {
        "Log In"
    };
    lines.push(button_line(label, app.login.focus == LoginFocus::Button));

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled("Don't have an account? ", styles::muted_style()),
        Span::styled(
            "Sign Up",
            styles::link_style(app.login.focus == LoginFocus::RegisterLink),
        ),
    ]));

    render_card(frame, area, lines);
}

fn render_register(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![
        centered_line(Route::Register.title().to_string(), styles::title_style()),
        Line::from(""),
    ];

    // Validation and server errors display on separate lines
    if let Some(ref error) = app.register.validation_error {
        lines.push(Line::from(Span::styled(
            format!(" {}", error),
            styles::error_style(),
        )));
        lines.push(Line::from(""));
    }
    if let Some(ref error) = app.register.error {
        lines.push(Line::from(Span::styled(
            format!(" {}", error),
            styles::error_style(),
        )));
        lines.push(Line::from(""));
    }

    lines.push(field_line(
        "Username:",
        &app.register.username,
        false,
        app.register.focus == RegisterFocus::Username,
    ));
    lines.push(field_line(
        "Email:",
        &app.register.email,
        false,
        app.register.focus == RegisterFocus::Email,
    ));
    lines.push(field_line(
        "Password:",
        &app.register.password,
        true,
        app.register.focus == RegisterFocus::Password,
    ));
    lines.push(Line::from(""));

    let label = if app.register.submitting {
        "Registering..."
    } else {
        "Register"
    };
    lines.push(button_line(
        label,
        app.register.focus == RegisterFocus::Button,
    ));

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled("Already have an account? ", styles::muted_style()),
        Span::styled(
            "Log In",
            styles::link_style(app.register.focus == RegisterFocus::LoginLink),
        ),
    ]));

    render_card(frame, area, lines);
}

fn render_profile(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![
        centered_line(Route::Profile.title().to_string(), styles::title_style()),
        Line::from(""),
    ];

    if app.profile.loading {
        lines.push(centered_line(
            "Loading profile...".to_string(),
            styles::muted_style(),
        ));
    } else if let Some(ref error) = app.profile.error {
        lines.push(Line::from(Span::styled(
            format!(" {}", error),
            styles::error_style(),
        )));
    } else if let Some(ref user) = app.profile.user {
        lines.push(centered_line(
            format!("Welcome, {}", user.username),
            styles::highlight_style(),
        ));
        lines.push(centered_line(user.email.clone(), styles::muted_style()));
        lines.push(Line::from(""));
        lines.push(button_line("Logout", true));
    } else {
        lines.push(centered_line(
            "No user data available.".to_string(),
            styles::muted_style(),
        ));
    }

    render_card(frame, area, lines);
}

/// Draw a bordered card centered in the given area
fn render_card(frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    let height = lines.len() as u16 + 3;
    let card = centered_rect_fixed(CARD_WIDTH, height, area);

    frame.render_widget(Clear, card);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, card);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(CARD_WIDTH, 7, frame.area());

    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to quit, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
