pub use fetch::fetch;
pub use window::Window;

mod fetch;
mod window;
