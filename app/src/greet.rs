use leptos::prelude::*;

use crate::components::flash_list;
use crate::flash::FlashMessage;
use crate::sanitize::EscapedText;

/// Renders the greeting. `name` is already escaped and is inserted verbatim.
pub fn component(name: EscapedText, notices: Vec<FlashMessage>) -> impl IntoView {
    view! {
        {flash_list::component(notices)}
        <h1>"Hello, " <span class="username" inner_html=name.into_inner()></span> "!"</h1>
        <a href="/">"Greet someone else"</a>
    }
}
