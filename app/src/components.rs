//! Reusable page fragments shared by the views.

pub mod error_template;
pub mod flash_list;
