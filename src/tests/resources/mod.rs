mod machine_tests;
mod network_tests;
mod storage_tests;
