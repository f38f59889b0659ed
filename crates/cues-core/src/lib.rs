pub mod config;
pub mod constants;
pub mod draw;
pub mod field;
pub mod math;
pub mod motion;
pub mod projector;
pub mod session;
pub mod startup;

pub use config::*;
pub use draw::*;
pub use field::*;
pub use motion::*;
pub use projector::*;
pub use session::*;
pub use startup::StartupTransition;
