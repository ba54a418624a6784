#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod document;
pub mod graph;
pub mod layout;
pub mod metrics;
pub mod page;
pub mod render;
pub mod scene;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, load_config};
pub use document::{Document, DocumentError, parse_document};
pub use graph::{Graph, build_graph};
pub use layout::{Layout, compute_layout};
pub use page::{DataSource, render_page};
pub use render::render_svg;
pub use scene::Scene;
pub use theme::Theme;
