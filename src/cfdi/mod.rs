//! CFDI document parsing.

mod parser;

pub use parser::CfdiParser;
