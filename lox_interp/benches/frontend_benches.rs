use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use lox_interp::{
  evaluator::Evaluator, parser::Parser, scanner::Scanner, source::Source, Config,
};
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

const MANIFEST_DIR: &str = env!("CARGO_MANIFEST_DIR");

fn fixture_path(bench_path: &str) -> PathBuf {
  Path::new(MANIFEST_DIR)
    .join("fixture")
    .join("criterion")
    .join(bench_path)
}

fn load_source(path: &str) -> String {
  let path = fixture_path(path);
  match read_to_string(&path) {
    Ok(content) => content,
    Err(err) => panic!("Unable to read {}: {}", path.display(), err),
  }
}

fn scan_source(source: &str) -> usize {
  let (tokens, _) = Scanner::new(source).scan();
  tokens.len()
}

// each run gets a fresh arena so node allocations are not retained
fn parse_source(content: &str) -> usize {
  let source = Source::new(content);
  let (tokens, _) = Scanner::new(&source).scan();
  let ast = Parser::new(&source, tokens, Config::default())
    .parse()
    .expect("fixture should parse");
  ast.len()
}

fn evaluate_source(content: &str) -> usize {
  let source = Source::new(content);
  let (tokens, _) = Scanner::new(&source).scan();
  let ast = Parser::new(&source, tokens, Config::default())
    .parse()
    .expect("fixture should parse");

  Evaluator::new(Config::default())
    .evaluate(&ast)
    .expect("fixture should evaluate")
    .len()
}

fn criterion_benchmark(c: &mut Criterion) {
  let fixtures = [
    ("arithmetic", load_source("arithmetic.lox")),
    ("nested", load_source("nested.lox")),
  ];

  for (name, source) in fixtures.iter() {
    c.bench_with_input(BenchmarkId::new("scan", name), source.as_str(), |b, s| {
      b.iter(|| scan_source(s));
    });
    c.bench_with_input(BenchmarkId::new("parse", name), source.as_str(), |b, s| {
      b.iter(|| parse_source(s));
    });
    c.bench_with_input(BenchmarkId::new("evaluate", name), source.as_str(), |b, s| {
      b.iter(|| evaluate_source(s));
    });
  }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
