//! HTTP protocol layer module
//!
//! Query parsing and response builders, independent of the handlers.

pub mod query;
pub mod response;

pub use query::QueryParams;
pub use response::{
    build_404_response, build_405_response, build_moved_response, build_options_response,
    build_text_response,
};
