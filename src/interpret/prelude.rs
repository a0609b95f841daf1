use std::time::{SystemTime, UNIX_EPOCH};

use super::{callable::NativeFunction, error::RuntimeError, interpreter::Interpreter, value::Value};

/// Host functions bound into the global scope before anything runs.
pub fn create() -> Vec<NativeFunction> {
    vec![NativeFunction {
        name: "Clock",
        arity: 0,
        func: clock_fn,
    }]
}

fn clock_fn(_itp: &mut Interpreter, _args: Vec<Value>) -> Result<Value, RuntimeError> {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or_default();
    Ok(Value::Number(millis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    #[test]
    fn clock_is_milliseconds_since_epoch() {
        let natives = create();
        let clock = natives.iter().find(|n| n.name == "Clock").unwrap();
        assert_eq!(clock.arity, 0);

        let mut itp = Interpreter::new(Rc::new(RefCell::new(std::io::sink())));
        let Value::Number(first) = (clock.func)(&mut itp, vec![]).unwrap() else {
            panic!("clock must return a number");
        };
        let Value::Number(second) = (clock.func)(&mut itp, vec![]).unwrap() else {
            panic!("clock must return a number");
        };
        // 2020-01-01 in milliseconds
        assert!(first > 1_577_836_800_000.0);
        assert!(second >= first);
        assert_eq!(first.fract(), 0.0);
    }
}
