mod path_tests;
mod query_tests;
