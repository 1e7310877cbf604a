pub mod cli;
pub mod run;
pub mod run_crawler;
pub mod run_server;
pub mod show_stats;
