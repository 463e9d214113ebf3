pub mod config;
pub mod css;
pub mod index;
pub mod linkify;
pub mod markup;
pub mod pipeline;
pub mod record;
pub mod router;
pub mod search;
pub mod templates;
pub mod types;
pub mod utils;
pub mod view;
