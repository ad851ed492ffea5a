//! Built-in engine adapters.

mod handlebars_engine;
mod minijinja_engine;
mod tera_engine;

pub use handlebars_engine::HandlebarsEngine;
pub use minijinja_engine::MiniJinjaEngine;
pub use tera_engine::TeraEngine;
