pub mod apply;
pub mod planner;
pub mod request;
pub mod worker;

pub use apply::*;
pub use planner::*;
pub use request::*;
pub use worker::*;
