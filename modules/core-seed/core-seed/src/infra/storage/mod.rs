//! Relational storage backed by `SeaORM`.

pub mod db;
pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod sea_orm_store;


pub use sea_orm_store::SeaOrmCoreStore;
