//! Core of the greeter: input sanitization, submission handling and the
//! server-rendered pages.
//!
//! The HTTP layer calls [`handler::handle_submission`] with the decoded form
//! field and turns the resulting [`handler::Outcome`] into either the greeting
//! page or a redirect back to the form.

use leptos::prelude::*;

mod components;
pub mod error;
pub mod flash;
mod greet;
pub mod handler;
mod home;
pub mod sanitize;

pub use components::error_template::AppError;

use flash::FlashMessage;
use sanitize::EscapedText;

/// Wraps page content in the HTML document shell.
pub fn shell(title: &'static str, content: impl IntoView) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <title>{title}</title>
            </head>
            <body>
                <main class="container">{content}</main>
            </body>
        </html>
    }
}

/// Renders the input form page with any pending flash messages.
pub fn index_page(flashes: Vec<FlashMessage>) -> String {
    shell("Greeter", home::component(flashes)).to_html()
}

/// Renders the greeting page. `notices` are shown above the greeting.
pub fn greet_page(name: EscapedText, notices: Vec<FlashMessage>) -> String {
    shell("Greeter", greet::component(name, notices)).to_html()
}

/// Renders the error page for `error`.
pub fn error_page(error: AppError) -> String {
    shell("Error", components::error_template::component(error)).to_html()
}
