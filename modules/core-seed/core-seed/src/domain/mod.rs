pub mod error;
pub mod initial_data;
pub mod password;
pub mod reference;
pub mod seeder;

#[cfg(test)]
mod seeder_test;
