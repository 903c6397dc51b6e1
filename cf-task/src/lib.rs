pub mod collation_migrator;
pub mod collation_planner;
pub mod ddl_executor;
pub mod reporter;
pub mod task_runner;
pub mod task_util;
