pub mod budget;
pub mod errors;
pub mod name_formatter;
pub mod segment;
pub mod signature;

pub use budget::MatchBudget;
pub use errors::*;
pub use name_formatter::SymbolName;
pub use segment::{PathSegment, SegmentShape, remove_function_braces};
pub use signature::{FunctionSignature, function_parameters_match};
