mod connection_tests;
mod user_repository_tests;
