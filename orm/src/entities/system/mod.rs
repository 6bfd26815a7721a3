pub mod sys_opt_log;

pub use sys_opt_log::SysOptLog;
