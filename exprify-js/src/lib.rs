use emit_js::emit_js;
use parse_js::parse;
use tracing::debug;
use tracing::debug_span;

mod err;
mod options;
mod rewrite;
mod stats;

pub use err::ExprifyError;
pub use err::Mismatch;
pub use options::ExprifyOptions;
pub use options::Rule;
pub use options::RuleSet;
pub use options::WhileForm;
pub use rewrite::rewrite_top_level;
pub use rewrite::RewriteCtx;
pub use stats::RewriteStats;
pub use stats::RuleCounts;

/// A program exercising most rules, used as the starting buffer of an empty editor.
pub const EXAMPLE_PROGRAM: &str = "function strlen(str) {
  let len = 0
  for (let i = 0; i < str.length; i++) {
    len++
  }
  return len
}

function binarySearch(arr, target) {
  let l = 0
  let r = arr.length - 1
  while (l <= r) {
    let mid = (l + r) >> 1
    if (arr[mid] == target) {
      return mid
    } else if (arr[mid] < target) {
      l = mid + 1
    } else {
      r = mid - 1
    }
  }
  return -1
}
";

/// Rewrites statements in UTF-8 JavaScript code into comma and conditional expressions, using
/// every rule and a single pass.
///
/// Code the rules do not touch, including its comments and formatting, is returned unchanged.
///
/// # Examples
///
/// ```
/// use exprify_js::exprify;
///
/// let code = "let x = 1;\nif (x) { y = 2 } else { z = 3 }\n";
/// assert_eq!(exprify(code).unwrap(), "x = 1;\nx ? (y = 2) : (z = 3);\n");
/// ```
pub fn exprify(source: &str) -> Result<String, ExprifyError> {
  exprify_with_options(source, &ExprifyOptions::default())
}

pub fn exprify_with_options(source: &str, opts: &ExprifyOptions) -> Result<String, ExprifyError> {
  exprify_with_stats(source, opts).map(|(output, _)| output)
}

/// Like [`exprify_with_options`], also returning how often each rule applied.
///
/// Each pass after the first re-parses the previous pass's output. Passes stop once one changes
/// nothing.
pub fn exprify_with_stats(
  source: &str,
  opts: &ExprifyOptions,
) -> Result<(String, RewriteStats), ExprifyError> {
  let mut code = source.to_string();
  let mut stats = RewriteStats::default();
  for pass in 1..=opts.passes.max(1) {
    let _span = debug_span!("exprify_pass", pass).entered();
    let mut top = parse(&code)?;
    let mut cx = RewriteCtx::new(opts);
    rewrite_top_level(&mut top, &mut cx);
    let (edits, pass_stats) = cx.into_parts();
    debug!(
      applied = pass_stats.total_applied(),
      edits = edits.len(),
      "finished pass"
    );
    stats.merge(pass_stats);
    code = emit_js(&code, &top, &edits, opts.emit.into())?;
    // A later pass would see the same tree.
    if edits.is_empty() {
      break;
    };
  }
  Ok((code, stats))
}
