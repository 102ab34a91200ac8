pub mod initdb;
pub mod populate;
pub mod serve;

pub use initdb::init_database;
pub use populate::populate_database;
pub use serve::serve;
