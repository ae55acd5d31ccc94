pub mod buffer;
pub mod color;
pub mod coords;
pub mod error;
pub mod input;
pub mod input_adapter;
pub mod registry;
pub mod session;

pub use buffer::*;
pub use color::*;
pub use coords::*;
pub use error::*;
pub use input::*;
pub use input_adapter::*;
pub use registry::*;
pub use session::*;
