pub mod openai;
pub mod parse;
pub mod request;
pub mod runtime;

pub use openai::*;
pub use parse::*;
pub use request::*;
pub use runtime::*;
