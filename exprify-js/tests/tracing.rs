use exprify_js::exprify_with_options;
use exprify_js::ExprifyOptions;
use std::io;
use std::sync::Arc;
use std::sync::Mutex;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct SharedWriter {
  buffer: Arc<Mutex<Vec<u8>>>,
}

impl SharedWriter {
  fn into_inner(self) -> Vec<u8> {
    match Arc::try_unwrap(self.buffer) {
      Ok(buffer) => buffer.into_inner().unwrap(),
      Err(arc) => arc.lock().unwrap().clone(),
    }
  }
}

struct SharedWriterGuard<'a> {
  buffer: &'a Arc<Mutex<Vec<u8>>>,
}

impl<'a> io::Write for SharedWriterGuard<'a> {
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    self.buffer.lock().unwrap().extend_from_slice(buf);
    Ok(buf.len())
  }

  fn flush(&mut self) -> io::Result<()> {
    Ok(())
  }
}

impl<'a> MakeWriter<'a> for SharedWriter {
  type Writer = SharedWriterGuard<'a>;

  fn make_writer(&'a self) -> Self::Writer {
    SharedWriterGuard {
      buffer: &self.buffer,
    }
  }
}

fn capture(level: tracing::Level, f: impl FnOnce()) -> String {
  let writer = SharedWriter::default();
  let subscriber = tracing_subscriber::fmt()
    .with_span_events(FmtSpan::CLOSE)
    .with_max_level(level)
    .with_ansi(false)
    .with_writer(writer.clone())
    .finish();
  let guard = tracing::subscriber::set_default(subscriber);
  f();
  drop(guard);
  String::from_utf8(writer.into_inner()).unwrap()
}

#[test]
fn skipped_rules_are_logged_with_their_reason() {
  let output = capture(tracing::Level::DEBUG, || {
    let out = exprify_with_options(
      "if (a) { x = 1; y = 2; }\nwhile (b) { break; }",
      &ExprifyOptions::default(),
    )
    .unwrap();
    assert_eq!(out, "if (a) { x = 1; y = 2; }\nwhile (b) { break; }");
  });
  assert!(
    output.contains("cannot transform if assignment statement: consequent holds 2 statements instead of one"),
    "expected if-assign skip, got: {output}"
  );
  assert!(
    output.contains("rule=\"if-assign\""),
    "expected rule field, got: {output}"
  );
  assert!(
    output.contains("cannot transform while statement"),
    "expected while skip, got: {output}"
  );
  assert!(
    output.contains("exprify_pass"),
    "expected pass span, got: {output}"
  );
}

#[test]
fn applied_rules_are_traced() {
  let output = capture(tracing::Level::TRACE, || {
    exprify_with_options("do { f(); } while (g());", &ExprifyOptions::default()).unwrap();
  });
  assert!(
    output.contains("transformed do while statement"),
    "expected do-while trace, got: {output}"
  );
  assert!(!output.contains("cannot transform"), "unexpected skip in: {output}");
}
