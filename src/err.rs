use thiserror::Error;

#[derive(Error, Debug, Eq, PartialEq)]
pub enum PipeErr {
    #[error("[Invalid Argument] Value of kind `{kind}` is not iterable")]
    InvalidArgument { kind: &'static str },

    #[error("[Bad Entry] Item at index `{index}` is not a key/value pair")]
    NotAnEntry { index: usize },
}
