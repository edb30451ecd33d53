// tabstash services
// Stateless logic: scanning and parsing session text, the two text dialects, settings.

pub mod session_format;
pub mod settings_engine;
pub mod text_parser;
pub mod url_scanner;
