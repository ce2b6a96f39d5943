use crate::operator::Operator;
use crate::operator::OperatorName;
use crate::operator::OPERATORS;
use crate::token::TT;

/// The operator a token starts when it follows an operand: binary and assignment operators, the
/// conditional, and the call and member accesses that bind like operators.
pub fn infix_operator(tt: TT) -> Option<&'static Operator> {
  let name = match tt {
    TT::Plus => OperatorName::Addition,
    TT::Hyphen => OperatorName::Subtraction,
    TT::Asterisk => OperatorName::Multiplication,
    TT::Slash => OperatorName::Division,
    TT::Percent => OperatorName::Remainder,
    TT::AsteriskAsterisk => OperatorName::Exponentiation,

    TT::Ampersand => OperatorName::BitwiseAnd,
    TT::Bar => OperatorName::BitwiseOr,
    TT::Caret => OperatorName::BitwiseXor,
    TT::ChevronLeftChevronLeft => OperatorName::BitwiseLeftShift,
    TT::ChevronRightChevronRight => OperatorName::BitwiseRightShift,
    TT::ChevronRightChevronRightChevronRight => OperatorName::BitwiseUnsignedRightShift,

    TT::EqualsEquals => OperatorName::Equality,
    TT::ExclamationEquals => OperatorName::Inequality,
    TT::EqualsEqualsEquals => OperatorName::StrictEquality,
    TT::ExclamationEqualsEquals => OperatorName::StrictInequality,
    TT::ChevronLeft => OperatorName::LessThan,
    TT::ChevronLeftEquals => OperatorName::LessThanOrEqual,
    TT::ChevronRight => OperatorName::GreaterThan,
    TT::ChevronRightEquals => OperatorName::GreaterThanOrEqual,
    TT::KeywordIn => OperatorName::In,
    TT::KeywordInstanceof => OperatorName::Instanceof,

    TT::AmpersandAmpersand => OperatorName::LogicalAnd,
    TT::BarBar => OperatorName::LogicalOr,
    TT::QuestionQuestion => OperatorName::NullishCoalescing,
    TT::Question => OperatorName::Conditional,
    TT::Comma => OperatorName::Comma,

    TT::Equals => OperatorName::Assignment,
    TT::PlusEquals => OperatorName::AssignmentAddition,
    TT::HyphenEquals => OperatorName::AssignmentSubtraction,
    TT::AsteriskEquals => OperatorName::AssignmentMultiplication,
    TT::SlashEquals => OperatorName::AssignmentDivision,
    TT::PercentEquals => OperatorName::AssignmentRemainder,
    TT::AsteriskAsteriskEquals => OperatorName::AssignmentExponentiation,
    TT::AmpersandEquals => OperatorName::AssignmentBitwiseAnd,
    TT::BarEquals => OperatorName::AssignmentBitwiseOr,
    TT::CaretEquals => OperatorName::AssignmentBitwiseXor,
    TT::ChevronLeftChevronLeftEquals => OperatorName::AssignmentBitwiseLeftShift,
    TT::ChevronRightChevronRightEquals => OperatorName::AssignmentBitwiseRightShift,
    TT::ChevronRightChevronRightChevronRightEquals => {
      OperatorName::AssignmentBitwiseUnsignedRightShift
    }
    TT::AmpersandAmpersandEquals => OperatorName::AssignmentLogicalAnd,
    TT::BarBarEquals => OperatorName::AssignmentLogicalOr,
    TT::QuestionQuestionEquals => OperatorName::AssignmentNullishCoalescing,

    TT::ParenthesisOpen => OperatorName::Call,
    TT::BracketOpen => OperatorName::ComputedMemberAccess,
    TT::Dot => OperatorName::MemberAccess,
    TT::QuestionDot => OperatorName::OptionalChainingMemberAccess,
    TT::QuestionDotBracketOpen => OperatorName::OptionalChainingComputedMemberAccess,
    TT::QuestionDotParenthesisOpen => OperatorName::OptionalChainingCall,
    _ => return None,
  };
  Some(&OPERATORS[&name])
}

/// The operator a token starts when it begins an operand. `new`, `yield` and postfix operators
/// are parsed by dedicated code, as their operands are not plain unary operands.
pub fn prefix_operator(tt: TT) -> Option<&'static Operator> {
  let name = match tt {
    TT::KeywordAwait => OperatorName::Await,
    TT::KeywordDelete => OperatorName::Delete,
    TT::KeywordTypeof => OperatorName::Typeof,
    TT::KeywordVoid => OperatorName::Void,
    TT::Exclamation => OperatorName::LogicalNot,
    TT::Tilde => OperatorName::BitwiseNot,
    TT::Hyphen => OperatorName::UnaryNegation,
    TT::Plus => OperatorName::UnaryPlus,
    TT::HyphenHyphen => OperatorName::PrefixDecrement,
    TT::PlusPlus => OperatorName::PrefixIncrement,
    _ => return None,
  };
  Some(&OPERATORS[&name])
}

#[cfg(test)]
mod tests {
  use super::infix_operator;
  use super::prefix_operator;
  use crate::operator::OperatorName;
  use crate::token::TT;

  #[test]
  fn hyphen_is_subtraction_after_an_operand_and_negation_before_one() {
    assert_eq!(
      infix_operator(TT::Hyphen).map(|o| o.name),
      Some(OperatorName::Subtraction)
    );
    assert_eq!(
      prefix_operator(TT::Hyphen).map(|o| o.name),
      Some(OperatorName::UnaryNegation)
    );
  }

  #[test]
  fn closing_tokens_are_not_operators() {
    assert!(infix_operator(TT::ParenthesisClose).is_none());
    assert!(infix_operator(TT::Semicolon).is_none());
    assert!(prefix_operator(TT::Comma).is_none());
  }
}
