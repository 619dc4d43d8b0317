pub mod customer;
pub mod order;
pub mod robot;

pub use customer::Customer;
pub use order::{Order, OrderWithCustomer};
pub use robot::{Robot, VALID_MODELS};
