//! Line sources and the stack that switches between them.

use std::{
    fmt,
    fs::File,
    io::{self, BufRead, BufReader, Cursor},
    mem,
    path::Path,
};

/// One line-oriented input: the terminal, a script file, or in-memory text.
pub struct LineSource {
    name: String,
    reader: Box<dyn BufRead>,
}

impl LineSource {
    pub fn new(name: impl Into<String>, reader: Box<dyn BufRead>) -> Self {
        Self {
            name: name.into(),
            reader,
        }
    }

    pub fn stdin() -> Self {
        Self::new("<stdin>", Box::new(BufReader::new(io::stdin())))
    }

    pub fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(
            path.display().to_string(),
            Box::new(BufReader::new(file)),
        ))
    }

    pub fn from_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name, Box::new(Cursor::new(text.into().into_bytes())))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Next line without its terminator, or `None` once the source is exhausted.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}

impl fmt::Debug for LineSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineSource").field("name", &self.name).finish()
    }
}

/// The active line source plus every source suspended beneath it.
///
/// Script mode is derived, not stored: it holds exactly while at least one source is
/// suspended, so an inner script finishing never clears it for a still-running outer script.
#[derive(Debug)]
pub struct InputStack {
    active: LineSource,
    suspended: Vec<LineSource>,
}

impl InputStack {
    pub fn new(base: LineSource) -> Self {
        Self {
            active: base,
            suspended: Vec::new(),
        }
    }

    /// Suspends the active source and makes `source` active.
    pub fn push(&mut self, source: LineSource) {
        let previous = mem::replace(&mut self.active, source);
        self.suspended.push(previous);
    }

    /// Opens `path` and makes it the active source. On failure the stack is unchanged.
    pub fn push_file(&mut self, path: &Path) -> io::Result<()> {
        let source = LineSource::open(path)?;
        self.push(source);
        Ok(())
    }

    /// Closes the active source and reactivates the one suspended most recently.
    ///
    /// Returns `false` (and does nothing) when no source is suspended.
    pub fn restore(&mut self) -> bool {
        match self.suspended.pop() {
            Some(previous) => {
                let finished = mem::replace(&mut self.active, previous);
                tracing::debug!(source = finished.name(), "input source closed");
                true
            }
            None => false,
        }
    }

    pub fn script_mode(&self) -> bool {
        !self.suspended.is_empty()
    }

    /// Number of suspended sources.
    pub fn depth(&self) -> usize {
        self.suspended.len()
    }

    pub fn active_name(&self) -> &str {
        self.active.name()
    }

    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        self.active.read_line()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(text: &str) -> InputStack {
        InputStack::new(LineSource::from_text("<base>", text))
    }

    #[test]
    fn strips_line_terminators() {
        let mut input = stack("first\r\nsecond\nlast");
        assert_eq!(input.read_line().unwrap().as_deref(), Some("first"));
        assert_eq!(input.read_line().unwrap().as_deref(), Some("second"));
        assert_eq!(input.read_line().unwrap().as_deref(), Some("last"));
        assert_eq!(input.read_line().unwrap(), None);
    }

    #[test]
    fn nested_restore_keeps_script_mode_for_the_outer_script() {
        let mut input = stack("base line\n");
        assert!(!input.script_mode());

        input.push(LineSource::from_text("outer", "outer line\n"));
        input.push(LineSource::from_text("inner", "inner line\n"));
        assert_eq!(input.depth(), 2);
        assert_eq!(input.read_line().unwrap().as_deref(), Some("inner line"));

        assert!(input.restore());
        assert!(input.script_mode());
        assert_eq!(input.active_name(), "outer");
        assert_eq!(input.read_line().unwrap().as_deref(), Some("outer line"));

        assert!(input.restore());
        assert!(!input.script_mode());
        assert_eq!(input.read_line().unwrap().as_deref(), Some("base line"));
    }

    #[test]
    fn restore_on_base_is_a_no_op() {
        let mut input = stack("kept\n");
        assert!(!input.restore());
        assert_eq!(input.active_name(), "<base>");
        assert_eq!(input.read_line().unwrap().as_deref(), Some("kept"));
    }

    #[test]
    fn push_file_failure_leaves_stack_untouched() {
        let mut input = stack("");
        let missing = Path::new("definitely/not/here.txt");
        assert!(input.push_file(missing).is_err());
        assert_eq!(input.depth(), 0);
        assert_eq!(input.active_name(), "<base>");
    }
}
