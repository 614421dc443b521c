//! Renders pending flash messages as a list, tagged with their category.

use leptos::{
    html::{li, ul},
    prelude::*,
};

use crate::flash::FlashMessage;

/// Renders nothing when there are no messages.
pub fn component(flashes: Vec<FlashMessage>) -> impl IntoView {
    (!flashes.is_empty()).then(move || {
        ul().class("flashes").child(
            flashes
                .into_iter()
                .map(|flash| {
                    li().class(format!("flash {}", flash.category.as_str()))
                        .child(flash.message)
                })
                .collect::<Vec<_>>(),
        )
    })
}
