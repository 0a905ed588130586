pub mod aggregate;
pub mod engagement_record;
pub mod similar_post;

pub use aggregate::*;
pub use engagement_record::*;
pub use similar_post::*;
