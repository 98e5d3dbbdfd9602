use std::io::Write;

use super::error::EvalError;

/// Execution context handed to native functions.
///
/// The only capability exposed is an output sink; the engine performs no
/// other I/O.
pub struct System<'a> {
    out: &'a mut dyn Write,
}

impl<'a> System<'a> {
    pub fn new(out: &'a mut dyn Write) -> Self {
        System { out }
    }

    pub fn write(&mut self, text: &str) -> Result<(), EvalError> {
        self.out
            .write_all(text.as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(|err| EvalError::output(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_reaches_sink() {
        let mut sink = Vec::new();
        {
            let mut system = System::new(&mut sink);
            system.write("hello").unwrap();
            system.write(", world").unwrap();
        }
        assert_eq!(String::from_utf8(sink).unwrap(), "hello, world");
    }
}
