mod entity;
mod schema;

pub use entity::EntityCommands;
pub use schema::SchemaCommands;
