pub mod obj;
pub mod pipeline;
