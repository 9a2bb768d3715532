pub mod draw;
pub mod diagram;
pub mod plot;
pub mod chart;

pub use chart::render_metrics_chart;
pub use diagram::render_topology;
pub use plot::render_data_plot;
