use crate::loc::Loc;
use crate::token::TT;
use core::fmt;
use core::fmt::Debug;
use core::fmt::Formatter;
use std::error::Error;
use std::fmt::Display;

/// A stable classification of syntax errors produced by the parser.
///
/// Codes (prefix `PS`) are assigned per variant:
/// - `PS0001`: [`SyntaxErrorType::ExpectedNotFound`]
/// - `PS0002`: [`SyntaxErrorType::ExpectedSyntax`]
/// - `PS0003`: [`SyntaxErrorType::InvalidAssigmentTarget`]
/// - `PS0004`: [`SyntaxErrorType::InvalidCharacterEscape`]
/// - `PS0005`: [`SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters`]
/// - `PS0006`: [`SyntaxErrorType::LineTerminatorAfterThrow`]
/// - `PS0007`: [`SyntaxErrorType::LineTerminatorInRegex`]
/// - `PS0008`: [`SyntaxErrorType::LineTerminatorInString`]
/// - `PS0009`: [`SyntaxErrorType::MalformedLiteralBigInt`]
/// - `PS0010`: [`SyntaxErrorType::MalformedLiteralNumber`]
/// - `PS0011`: [`SyntaxErrorType::RequiredTokenNotFound`]
/// - `PS0012`: [`SyntaxErrorType::TryStatementHasNoCatchOrFinally`]
/// - `PS0013`: [`SyntaxErrorType::UnexpectedEnd`]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SyntaxErrorType {
  ExpectedNotFound,
  ExpectedSyntax(&'static str),
  InvalidAssigmentTarget,
  InvalidCharacterEscape,
  LineTerminatorAfterArrowFunctionParameters,
  LineTerminatorAfterThrow,
  LineTerminatorInRegex,
  LineTerminatorInString,
  MalformedLiteralBigInt,
  MalformedLiteralNumber,
  RequiredTokenNotFound(TT),
  TryStatementHasNoCatchOrFinally,
  UnexpectedEnd,
}

impl SyntaxErrorType {
  pub fn code(&self) -> &'static str {
    match self {
      SyntaxErrorType::ExpectedNotFound => "PS0001",
      SyntaxErrorType::ExpectedSyntax(_) => "PS0002",
      SyntaxErrorType::InvalidAssigmentTarget => "PS0003",
      SyntaxErrorType::InvalidCharacterEscape => "PS0004",
      SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters => "PS0005",
      SyntaxErrorType::LineTerminatorAfterThrow => "PS0006",
      SyntaxErrorType::LineTerminatorInRegex => "PS0007",
      SyntaxErrorType::LineTerminatorInString => "PS0008",
      SyntaxErrorType::MalformedLiteralBigInt => "PS0009",
      SyntaxErrorType::MalformedLiteralNumber => "PS0010",
      SyntaxErrorType::RequiredTokenNotFound(_) => "PS0011",
      SyntaxErrorType::TryStatementHasNoCatchOrFinally => "PS0012",
      SyntaxErrorType::UnexpectedEnd => "PS0013",
    }
  }

  pub fn message(&self) -> String {
    match self {
      SyntaxErrorType::ExpectedNotFound => "expected token not found".into(),
      SyntaxErrorType::ExpectedSyntax(expected) => format!("expected {}", expected),
      SyntaxErrorType::InvalidAssigmentTarget => "invalid assignment target".into(),
      SyntaxErrorType::InvalidCharacterEscape => "invalid character escape".into(),
      SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters => {
        "line terminator not allowed after arrow function parameters".into()
      }
      SyntaxErrorType::LineTerminatorAfterThrow => {
        "line terminator not allowed after `throw`".into()
      }
      SyntaxErrorType::LineTerminatorInRegex => "line terminator not allowed in regex".into(),
      SyntaxErrorType::LineTerminatorInString => "line terminator not allowed in string".into(),
      SyntaxErrorType::MalformedLiteralBigInt => "malformed bigint literal".into(),
      SyntaxErrorType::MalformedLiteralNumber => "malformed number literal".into(),
      SyntaxErrorType::RequiredTokenNotFound(tt) => format!("expected token {:?}", tt),
      SyntaxErrorType::TryStatementHasNoCatchOrFinally => {
        "try statement has no catch or finally".into()
      }
      SyntaxErrorType::UnexpectedEnd => "unexpected end of input".into(),
    }
  }
}

#[derive(Clone)]
pub struct SyntaxError {
  pub typ: SyntaxErrorType,
  pub loc: Loc,
  pub actual_token: Option<TT>,
}

impl SyntaxError {
  pub fn new(typ: SyntaxErrorType, loc: Loc, actual_token: Option<TT>) -> SyntaxError {
    SyntaxError {
      typ,
      loc,
      actual_token,
    }
  }
}

impl Debug for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{} ({})", self, self.typ.code())
  }
}

impl Display for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.typ.message())?;
    if let Some(tt) = self.actual_token {
      write!(f, " [token={:?}]", tt)?;
    };
    write!(f, " around loc [{}:{}]", self.loc.0, self.loc.1)
  }
}

impl Error for SyntaxError {}

impl PartialEq for SyntaxError {
  fn eq(&self, other: &Self) -> bool {
    self.typ == other.typ
  }
}

impl Eq for SyntaxError {}

pub type SyntaxResult<T> = Result<T, SyntaxError>;

#[cfg(test)]
mod tests {
  use super::SyntaxError;
  use super::SyntaxErrorType;
  use crate::loc::Loc;
  use crate::token::TT;

  #[test]
  fn display_names_token_and_location() {
    let err = SyntaxError::new(
      SyntaxErrorType::RequiredTokenNotFound(TT::ParenthesisClose),
      Loc(4, 7),
      Some(TT::BraceOpen),
    );
    assert_eq!(
      err.to_string(),
      "expected token ParenthesisClose [token=BraceOpen] around loc [4:7]"
    );
    assert_eq!(err.typ.code(), "PS0011");
  }

  #[test]
  fn display_without_token() {
    let err = SyntaxError::new(SyntaxErrorType::UnexpectedEnd, Loc(9, 9), None);
    assert_eq!(err.to_string(), "unexpected end of input around loc [9:9]");
  }
}
