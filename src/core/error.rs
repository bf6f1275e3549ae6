use std::error::Error as StdError;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Usage,
    FileOpen,
    EmptyInput,
    MalformedHeader,
    Allocation,
    MissingLines,
    Io,
}

impl ErrorKind {
    /// Header and body shape violations of the count-prefixed format.
    pub fn is_format(self) -> bool {
        matches!(
            self,
            ErrorKind::EmptyInput | ErrorKind::MalformedHeader | ErrorKind::MissingLines
        )
    }
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    hint: Option<String>,
    path: Option<PathBuf>,
    line: Option<u64>,
    declared: Option<u64>,
    read: Option<u64>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            hint: None,
            path: None,
            line: None,
            declared: None,
            read: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn line(&self) -> Option<u64> {
        self.line
    }

    /// Declared and actually-read record counts, set on `MissingLines`.
    pub fn counts(&self) -> Option<(u64, u64)> {
        self.declared.zip(self.read)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_line(mut self, line: u64) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_counts(mut self, declared: u64, read: u64) -> Self {
        self.declared = Some(declared);
        self.read = Some(read);
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        if let Some(line) = self.line {
            write!(f, " (line: {line})")?;
        }
        if let Some((declared, read)) = self.counts() {
            write!(f, " (declared: {declared}, read: {read})")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Usage => 1,
        ErrorKind::FileOpen => 1,
        ErrorKind::EmptyInput => 2,
        ErrorKind::MalformedHeader => 3,
        ErrorKind::Allocation => 4,
        ErrorKind::MissingLines => 5,
        ErrorKind::Io => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind, to_exit_code};
    use std::error::Error as _;
    use std::io;

    #[test]
    fn exit_code_mapping_is_stable() {
        let cases = [
            (ErrorKind::Usage, 1),
            (ErrorKind::FileOpen, 1),
            (ErrorKind::EmptyInput, 2),
            (ErrorKind::MalformedHeader, 3),
            (ErrorKind::Allocation, 4),
            (ErrorKind::MissingLines, 5),
            (ErrorKind::Io, 6),
        ];

        for (kind, code) in cases {
            assert_eq!(to_exit_code(kind), code);
        }
    }

    #[test]
    fn format_family_covers_header_and_body_errors() {
        assert!(ErrorKind::EmptyInput.is_format());
        assert!(ErrorKind::MalformedHeader.is_format());
        assert!(ErrorKind::MissingLines.is_format());
        assert!(!ErrorKind::FileOpen.is_format());
        assert!(!ErrorKind::Allocation.is_format());
        assert!(!ErrorKind::Io.is_format());
    }

    #[test]
    fn display_includes_context_fields() {
        let err = Error::new(ErrorKind::MissingLines)
            .with_message("input ended early")
            .with_path("/tmp/in.txt")
            .with_counts(5, 3);
        let text = err.to_string();
        assert!(text.starts_with("MissingLines: input ended early"));
        assert!(text.contains("(path: /tmp/in.txt)"));
        assert!(text.contains("(declared: 5, read: 3)"));
    }

    #[test]
    fn source_is_exposed() {
        let err = Error::new(ErrorKind::FileOpen)
            .with_source(io::Error::new(io::ErrorKind::NotFound, "missing"));
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("missing"));
    }
}
