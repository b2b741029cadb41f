pub mod controller;
pub mod pipeline;

pub use controller::AppController;
pub use pipeline::Pipeline;
