pub mod event;
pub mod record;
mod util;

pub use event::{COMPILER_TASK_NAME, Invocation, TaskCommandLineEvent};
pub use record::CompileCommandRecord;
pub use util::*;
