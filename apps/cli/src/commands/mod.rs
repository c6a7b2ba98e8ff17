//! CLI 命令实现

pub mod config;
pub mod run;
pub mod step;

pub use config::ConfigCommand;
pub use run::RunCommand;
pub use step::StepCommand;
