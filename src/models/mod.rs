pub mod quote;
pub mod market;
pub mod response;

pub use quote::*;
pub use market::*;
pub use response::*;
