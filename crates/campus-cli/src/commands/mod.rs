pub mod dispatch;
pub mod entity;
pub mod schema;
pub mod shared;
pub mod wizard;
