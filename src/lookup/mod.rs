pub use dns::Dns;
pub use ec2::Ec2;
pub use lookup::{Instance, Inventory, Reservation, Resolver, Tag};

mod dns;
mod ec2;
mod lookup;
