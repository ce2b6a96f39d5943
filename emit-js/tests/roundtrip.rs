use emit_js::emit_js;
use emit_js::EditSet;
use emit_js::EmitOptions;
use util::parse;
use util::syntax_value;

mod util;

const PROGRAMS: &[(&str, &str)] = &[
  ("arithmetic", "x = (a + b) * c - d / (e - f) % g ** 2 ** h;"),
  ("conditional", "y = a ? b : c ? d : e; z = (a ? b : c) ? d : e; w = (a, b) ? c : (d, e);"),
  ("logical", "a ?? (b || c); (a && b) ?? c; x ||= y; x &&= y; x ??= y;"),
  ("unary", "-(-x); +(+y); - --z; a - -b; a + +b; !(a && b); typeof f === \"function\"; delete a[b]; void 0;"),
  ("exponent", "(-a) ** b; a ** -b; (a ** b) ** c;"),
  ("calls", "f((a, b), ...c); new (g())(); new X; (new Y).z; new a.b.C(1); new (a.b().c)();"),
  ("optional chaining", "a?.b?.[c]?.(d); (a?.b).c;"),
  ("number members", "(1).toString(); 1.5.toFixed(); x = 0x10 + 1e21 + .5 + 10n;"),
  ("functions", "(function () {})(); (function named(a, b = 1, ...c) { return a; })(); var gen = function* () { const v = yield a, w = 2; yield* g(); yield; };"),
  ("arrows", "a = b => ({ c }); d = async (e, ...f) => { await e; }; g = () => () => 1; h = (x = 1, { y }) => x + y;"),
  ("classes", "class A extends B { static x = 1; #y; get z() { return this.#y; } set z(v) {} static { init(); } *gen() {} async m() { await 1; } } (class {}); c = class extends f() {};"),
  ("objects", "o = { \"quoted key\": 1, 2: 3, [k]: 4, get g() { return 1; }, set s(v) {}, m() {}, async *n() {}, ...rest, short };"),
  ("patterns", "({ a, b: [c] = d, ...e } = f); [x, , [y] = z, ...w] = v; let { p = 1, q: { r } } = s; const [, t] = u;"),
  ("arrays", "y = [, a, , ...b, ]; z = [[]]; e = [,];"),
  ("templates", "x = `a${b + `c${d}`}e`; tag`t${1}`; re = /ab+c/gi.test(s); s = \"quote\\\" and \\n newline\";"),
  ("loops", "label: for (let i = 0, n = 2; i < n; i++) { if (i) continue label; else break; } while (i--) if (i % 2) continue; do x++; while (x < 10)"),
  ("for heads", "for (const k in o) {} for (x.y of [1, 2]) ; for (var i = (0 in o); ;) break; for (;;) {} for ((a in b); c; ) d();"),
  ("switch", "switch (v) { case 1: case 2: f(); break; default: g(); } switch (w) {}"),
  ("try", "try { a(); } catch ({ message }) { b(message); } finally { c(); } try {} catch { }"),
  ("if chains", "if (a) { if (b) c(); } else d(); if (a) b(); else if (c) d(); else { e(); }"),
  ("statements", "outer: { break outer; } with (obj) prop; debugger; throw new Error(\"x\"); ; \"use strict\";"),
  ("asi hazards", "a = b\n(c)\nx = y\n[0].z\nlet z = 1\n;-1"),
  ("statement starts", "({}).toString(); (function () {}).call(this); (class {}).name; (async function () {});"),
];

fn assert_roundtrip(name: &str, source: &str, opts: EmitOptions) {
  let top = parse(source);
  let expected = syntax_value(&top);
  let emitted = match emit_js(source, &top, &EditSet::new(), opts) {
    Ok(emitted) => emitted,
    Err(err) => panic!("{name}: failed to emit: {err}"),
  };
  let reparsed = match parse_js::parse(&emitted) {
    Ok(reparsed) => reparsed,
    Err(err) => panic!("{name}: emitted code does not parse: {err:?}\n{emitted}"),
  };
  assert_eq!(
    syntax_value(&reparsed),
    expected,
    "{name}: emitted code parses differently:\n{emitted}"
  );
}

#[test]
fn canonical_output_reparses_to_the_same_syntax() {
  for (name, source) in PROGRAMS {
    assert_roundtrip(name, source, EmitOptions::canonical());
  }
}

#[test]
fn minified_output_reparses_to_the_same_syntax() {
  for (name, source) in PROGRAMS {
    assert_roundtrip(name, source, EmitOptions::minified());
  }
}

#[test]
fn preserved_output_without_edits_is_the_source() {
  for (_, source) in PROGRAMS {
    let top = parse(source);
    let emitted = emit_js(source, &top, &EditSet::new(), EmitOptions::preserve()).unwrap();
    assert_eq!(&emitted, source);
  }
}

#[test]
fn canonical_output_is_stable() {
  for (name, source) in PROGRAMS {
    let top = parse(source);
    let once = emit_js(source, &top, &EditSet::new(), EmitOptions::canonical()).unwrap();
    let reparsed = parse(&once);
    let twice = emit_js(&once, &reparsed, &EditSet::new(), EmitOptions::canonical()).unwrap();
    assert_eq!(once, twice, "{name}: printing is not stable");
  }
}
