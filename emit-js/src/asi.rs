use parse_js::ast::node::Node;
use parse_js::ast::stmt::Stmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StmtStartToken {
  Paren,
  Bracket,
  Plus,
  Minus,
  Slash,
  Template,
  Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StmtLeafEnd {
  BlockLike,
  Other,
}

/// Classifies the first token of printed statement text.
pub fn stmt_start_token(text: &str) -> StmtStartToken {
  match text.trim_start().as_bytes().first() {
    Some(b'(') => StmtStartToken::Paren,
    Some(b'[') => StmtStartToken::Bracket,
    Some(b'+') => StmtStartToken::Plus,
    Some(b'-') => StmtStartToken::Minus,
    Some(b'/') => StmtStartToken::Slash,
    Some(b'`') => StmtStartToken::Template,
    _ => StmtStartToken::Other,
  }
}

/// Whether the statement's source form ends with the `}` of a block, after which no semicolon is
/// ever inserted.
pub fn stmt_leaf_end(stmt: &Node<Stmt>) -> StmtLeafEnd {
  match stmt.stx.as_ref() {
    Stmt::Block(_)
    | Stmt::Try(_)
    | Stmt::Switch(_)
    | Stmt::FunctionDecl(_)
    | Stmt::ClassDecl(_) => StmtLeafEnd::BlockLike,
    Stmt::Label(label) => stmt_leaf_end(&label.stx.statement),
    Stmt::While(while_stmt) => stmt_leaf_end(&while_stmt.stx.body),
    Stmt::ForIn(for_in) => stmt_leaf_end(&for_in.stx.body),
    Stmt::ForOf(for_of) => stmt_leaf_end(&for_of.stx.body),
    Stmt::ForTriple(for_triple) => stmt_leaf_end(&for_triple.stx.body),
    Stmt::With(with_stmt) => stmt_leaf_end(&with_stmt.stx.body),
    Stmt::If(if_stmt) => match &if_stmt.stx.alternate {
      Some(alt) => stmt_leaf_end(alt),
      None => stmt_leaf_end(&if_stmt.stx.consequent),
    },
    _ => StmtLeafEnd::Other,
  }
}

/// Whether `next` must be prefixed with `;` so it is not parsed as a continuation of the previous
/// statement. `last_char` is the last significant character already written.
pub fn needs_leading_semicolon(last_char: Option<char>, prev: &Node<Stmt>, next: &str) -> bool {
  if stmt_start_token(next) == StmtStartToken::Other {
    return false;
  };
  match last_char {
    None | Some(';') => false,
    Some('}') => stmt_leaf_end(prev) != StmtLeafEnd::BlockLike,
    Some(_) => true,
  }
}
