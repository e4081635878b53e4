use std::borrow::Cow;
use std::fmt;

/// Source position an assertion was made from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    file: Cow<'static, str>,
    line: u32,
}

/// `Location` of the macro call site.
#[macro_export]
macro_rules! here {
    () => {
        $crate::Location::new(file!(), line!())
    };
}

impl Location {
    pub fn new(file: impl Into<Cow<'static, str>>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    #[track_caller]
    pub fn caller() -> Self {
        let loc = std::panic::Location::caller();
        Self::new(loc.file(), loc.line())
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// Everything after the last `/` or `\` in the file.
    pub fn basename(&self) -> &str {
        match self.file.rfind(['/', '\\']) {
            Some(i) => &self.file[i + 1..],
            None => &self.file,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
