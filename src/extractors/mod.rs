mod json_ld;
mod locator;

pub use json_ld::{extract_linked_data, linked_data_scripts, parse_block};
pub use locator::locate_recipe;
