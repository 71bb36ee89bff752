pub mod task;

pub use task::{format_age, NewTask, StatusUpdate, Task, TaskStatus};
