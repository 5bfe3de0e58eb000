//! Order domain entities.

pub mod item;
pub mod model;
pub mod status;

pub use item::OrderItem;
pub use model::{CreateOrder, Order, UpdateOrderDetails};
pub use status::OrderStatus;
