// HTTP routes
pub mod analyze;
pub mod health;
pub mod index;
pub mod post_types;
pub mod similar;

pub use analyze::*;
pub use health::*;
pub use index::*;
pub use post_types::*;
pub use similar::*;
