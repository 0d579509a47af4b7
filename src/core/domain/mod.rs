pub mod decode;
pub mod error;
pub mod model;
pub mod schema;
pub mod value_object;
