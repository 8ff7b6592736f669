pub mod cat;
pub mod session;

pub use cat::Cat;
pub use session::Session;
