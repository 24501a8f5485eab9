pub mod repository;
pub mod presence;
pub mod weather;
pub mod contact;

pub use repository::*;
pub use presence::*;
pub use weather::*;
pub use contact::*;
