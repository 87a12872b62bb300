pub mod nodb;
pub mod storage;
pub mod tenant;
