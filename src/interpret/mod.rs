mod callable;
mod environment;
mod error;
mod interpreter;
mod prelude;
mod value;

pub use callable::{BuiltinFn, Callable, Function, NativeFunction};
pub use environment::{Environment, ScopeId, GLOBAL_SCOPE};
pub use error::RuntimeError;
pub use interpreter::Interpreter;
pub use value::Value;
