pub mod card;

pub mod modal;

mod model;
pub use model::*;

mod route;
pub use route::Route;

mod spinner;
pub use spinner::Spinner;
