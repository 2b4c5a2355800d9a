pub mod diff_view;
pub mod selectors;
pub mod text_panel;
pub mod toolbar;
pub mod viewport;
