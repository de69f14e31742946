//! Adapters - Connections between the domain and the outside world.
//!
//! - `request_file` - Loads ranking requests from JSON or YAML files

pub mod request_file;

pub use request_file::{load_request, RequestFileError, RequestFormat};
