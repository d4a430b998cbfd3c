use std::fmt;

#[derive(Debug)]
pub enum PanelError {
    UnknownKey { key: String },
    Parse(ParseError),
}

/// Failure to parse an imported state snapshot.
#[derive(Debug)]
pub enum ParseError {
    InvalidJson {
        message: String,
        line: usize,
        column: usize,
    },
    NotAnObject,
}

impl fmt::Display for PanelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelError::UnknownKey { key } => write!(f, "Unknown feature key '{key}'"),
            PanelError::Parse(e) => write!(f, "Import error: {e}"),
        }
    }
}

impl std::error::Error for PanelError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidJson {
                message,
                line,
                column,
            } => write!(f, "Invalid JSON at line {line}, column {column}: {message}"),
            ParseError::NotAnObject => write!(f, "Expected a JSON object of feature keys"),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<ParseError> for PanelError {
    fn from(e: ParseError) -> Self {
        PanelError::Parse(e)
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(e: serde_json::Error) -> Self {
        ParseError::InvalidJson {
            message: e.to_string(),
            line: e.line(),
            column: e.column(),
        }
    }
}
