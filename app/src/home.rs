//! The input page: a single form asking for the user's name.

use leptos::prelude::*;

use crate::components::flash_list;
use crate::flash::FlashMessage;

/// Renders the name form, preceded by any messages left by a rejected
/// submission.
pub fn component(flashes: Vec<FlashMessage>) -> impl IntoView {
    view! {
        <h1>"What's your name?"</h1>
        {flash_list::component(flashes)}
        <form method="post" action="/greet">
            <label>
                "Name"
                <input id="username" name="username" type="text" autocomplete="name"/>
            </label>
            <button type="submit">"Greet me"</button>
        </form>
    }
}
