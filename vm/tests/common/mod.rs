pub mod test_runner;
