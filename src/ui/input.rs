//! Keyboard input handling for the TUI.
//!
//! This module translates keyboard events into application state
//! changes. Submissions themselves run in the background; input
//! handling never blocks.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{
    can_add_email_char, can_add_password_char, can_add_username_char, App, AppState, LoginFocus,
    RegisterFocus, Route,
};

/// Handle a keyboard event. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Running;
            }
            _ => {}
        }
        return Ok(false);
    }

    if key.code == KeyCode::Esc {
        app.state = AppState::ConfirmingQuit;
        return Ok(false);
    }

    match app.route {
        Route::Login => handle_login_input(app, key),
        Route::Register => handle_register_input(app, key),
        Route::Profile => handle_profile_input(app, key),
    }

    Ok(false)
}

fn handle_login_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Down | KeyCode::Tab => {
            app.login.focus = match app.login.focus {
                LoginFocus::Email => LoginFocus::Password,
                LoginFocus::Password => LoginFocus::Button,
                LoginFocus::Button => LoginFocus::RegisterLink,
                LoginFocus::RegisterLink => LoginFocus::Email,
            };
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.login.focus = match app.login.focus {
                LoginFocus::Email => LoginFocus::RegisterLink,
                LoginFocus::Password => LoginFocus::Email,
                LoginFocus::Button => LoginFocus::Password,
                LoginFocus::RegisterLink => LoginFocus::Button,
            };
        }
        KeyCode::Enter => match app.login.focus {
            LoginFocus::Email => {
                app.login.focus = LoginFocus::Password;
            }
            LoginFocus::Password => {
                app.login.focus = LoginFocus::Button;
            }
            LoginFocus::Button => {
                // Validation and submission; errors land in login.error
                app.submit_login();
            }
            LoginFocus::RegisterLink => {
                app.navigate(Route::Register);
            }
        },
        KeyCode::Backspace => match app.login.focus {
            LoginFocus::Email => {
                app.login.email.pop();
            }
            LoginFocus::Password => {
                app.login.password.pop();
            }
            _ => {}
        },
        KeyCode::Char(c) => match app.login.focus {
            LoginFocus::Email => {
                if can_add_email_char(app.login.email.len(), c) {
                    app.login.email.push(c);
                }
            }
            LoginFocus::Password => {
                if can_add_password_char(app.login.password.len(), c) {
                    app.login.password.push(c);
                }
            }
            _ => {}
        },
        _ => {}
    }
}

fn handle_register_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Down | KeyCode::Tab => {
            app.register.focus = match app.register.focus {
                RegisterFocus::Username => RegisterFocus::Email,
                RegisterFocus::Email => RegisterFocus::Password,
                RegisterFocus::Password => RegisterFocus::Button,
                RegisterFocus::Button => RegisterFocus::LoginLink,
                RegisterFocus::LoginLink => RegisterFocus::Username,
            };
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.register.focus = match app.register.focus {
                RegisterFocus::Username => RegisterFocus::LoginLink,
                RegisterFocus::Email => RegisterFocus::Username,
                RegisterFocus::Password => RegisterFocus::Email,
                RegisterFocus::Button => RegisterFocus::Password,
                RegisterFocus::LoginLink => RegisterFocus::Button,
            };
        }
        KeyCode::Enter => match app.register.focus {
            RegisterFocus::Username => {
                app.register.focus = RegisterFocus::Email;
            }
            RegisterFocus::Email => {
                app.register.focus = RegisterFocus::Password;
            }
            RegisterFocus::Password => {
                app.register.focus = RegisterFocus::Button;
            }
            RegisterFocus::Button => {
                app.submit_register();
            }
            RegisterFocus::LoginLink => {
                app.navigate(Route::Login);
            }
        },
        KeyCode::Backspace => match app.register.focus {
            RegisterFocus::Username => {
                app.register.username.pop();
            }
            RegisterFocus::Email => {
                app.register.email.pop();
            }
            RegisterFocus::Password => {
                app.register.password.pop();
            }
            _ => {}
        },
        KeyCode::Char(c) => match app.register.focus {
            RegisterFocus::Username => {
                if can_add_username_char(app.register.username.len(), c) {
                    app.register.username.push(c);
                }
            }
            RegisterFocus::Email => {
                if can_add_email_char(app.register.email.len(), c) {
                    app.register.email.push(c);
                }
            }
            RegisterFocus::Password => {
                if can_add_password_char(app.register.password.len(), c) {
                    app.register.password.push(c);
                }
            }
            _ => {}
        },
        _ => {}
    }
}

fn handle_profile_input(app: &mut App, key: KeyEvent) {
    // The logout button is the only control on this screen
    if key.code == KeyCode::Enter {
        app.logout();
    }
}
