//! Routing module
//!
//! Maps request paths to handlers:
//! - Exact registrations take precedence
//! - Registrations ending in `/` match their whole subtree, longest first
//! - Non-canonical paths are redirected to their cleaned form

mod matcher;
mod table;

pub use matcher::clean_path;
pub use table::{RouteMatch, RouteTable};
