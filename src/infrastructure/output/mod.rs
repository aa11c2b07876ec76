pub mod json_generator;
pub mod csv_generator;
pub mod html_generator;
pub mod markdown_generator;

pub use json_generator::JsonGenerator;
pub use csv_generator::CsvGenerator;
pub use html_generator::HtmlGenerator;
pub use markdown_generator::MarkdownGenerator;
