mod reader;
mod writer;

pub use reader::load_yaml_all;
pub use writer::to_yaml;
