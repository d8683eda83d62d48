//! Document trees and their YAML text form.

pub mod node;
pub mod parser;
