//! UIコンポーネント

pub mod header;
pub mod progress_bar;
pub mod result_card;
pub mod results_panel;
pub mod toast;
pub mod upload_area;
