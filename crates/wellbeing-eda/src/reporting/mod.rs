//! Reporter stage: console output, chart images, and file exports.

pub mod charts;
pub mod console;
pub mod export;

pub use charts::{ChartOptions, render_chart, render_charts, text_font_available};
pub use export::{RunReport, export_cleaned_csv, write_report};
