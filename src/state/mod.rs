mod io;
mod session;

pub use io::{export_result, load_items, write_result_csv, write_result_json, FileFormat};
pub use session::{Action, Session};
