//! Page module - dashboard assembly and export

mod export;
mod html;

pub use export::{write_json, DashboardData};
pub use html::{render_page, ChartSet};
