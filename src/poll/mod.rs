pub use poll::{Config, Poll};
pub use watermark::Watermark;

mod poll;
mod watermark;

#[cfg(test)]
mod test;
