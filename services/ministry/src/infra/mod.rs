pub mod db;
pub mod memory;
pub mod password;
pub mod seed;
