pub mod app;

pub use app::{json_request, make_test_app, read_json, seed, send};
