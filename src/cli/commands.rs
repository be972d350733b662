pub mod clear_db;
pub mod initdb;
pub mod serve;

pub use clear_db::clear_database;
pub use initdb::init_database;
pub use serve::serve;
