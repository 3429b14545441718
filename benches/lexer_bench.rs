//! Lexer benchmarks.
//!
//! Run with: `cargo bench --package vela-lex`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use vela_lex::Lexer;

fn lexeme_count(source: &[u8]) -> usize {
    Lexer::new(source).count()
}

fn bench_lexer_identifiers(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_identifiers");

    let source = b"let x = 42; fn main() { let y = x + 1; return y; }";
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("simple_let", |b| {
        b.iter(|| lexeme_count(black_box(b"let x = 42;")))
    });

    group.bench_function("function_with_body", |b| {
        b.iter(|| lexeme_count(black_box(source.as_slice())))
    });

    group.finish();
}

fn bench_lexer_complex(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_complex");

    let source: &[u8] = br#"
        fn fibonacci(n: Int) -> Int {
            if n <= 1 {
                return n
            }
            return fibonacci(n - 1) + fibonacci(n - 2)
        }

        struct Point {
            x: Int
            y: Int
        }

        enum Color {
            red, green, blue
        }

        impl Drawable for Point {
            fn draw(self) {
                print("Point at (\(self.x), \(self.y))")
            }
        }
    "#;

    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("complex_source", |b| {
        b.iter(|| lexeme_count(black_box(source)))
    });

    group.finish();
}

fn bench_lexer_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_strings");

    group.bench_function("short_string", |b| {
        b.iter(|| lexeme_count(black_box(b"let s = \"hello\"")))
    });

    group.bench_function("long_string", |b| {
        let source: &[u8] =
            b"let s = \"This is a longer string for benchmarking purposes.\"";
        b.iter(|| lexeme_count(black_box(source)))
    });

    group.bench_function("interpolated_string", |b| {
        b.iter(|| {
            lexeme_count(black_box(
                b"let s = \"total: \\(a + b), average: \\(avg(a, b))\"",
            ))
        })
    });

    group.bench_function("multiline_string", |b| {
        let source: &[u8] = b"let s = \"\"\"\n        line one\n        line two\n        \"\"\"";
        b.iter(|| lexeme_count(black_box(source)))
    });

    group.finish();
}

fn bench_lexer_numbers(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_numbers");

    group.bench_function("integer", |b| {
        b.iter(|| lexeme_count(black_box(b"let x = 123_456")))
    });

    group.bench_function("float", |b| {
        b.iter(|| lexeme_count(black_box(b"let x = 3.14159e10")))
    });

    group.bench_function("hex", |b| {
        b.iter(|| lexeme_count(black_box(b"let x = 0xDEAD_BEEF")))
    });

    group.finish();
}

fn bench_lexer_trivia(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_trivia");

    group.bench_function("shebang_and_bom", |b| {
        let mut source = vec![0xEF, 0xBB, 0xBF];
        source.extend_from_slice(b"#!/usr/bin/env vela\nlet x = 1\n");
        b.iter(|| lexeme_count(black_box(source.as_slice())))
    });

    group.bench_function("dense_comments", |b| {
        let source: &[u8] =
            b"// one\n// two\nlet x = 1 /* inline */ + /* another */ 2 // trailing\n";
        b.iter(|| lexeme_count(black_box(source)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_lexer_identifiers,
    bench_lexer_complex,
    bench_lexer_strings,
    bench_lexer_numbers,
    bench_lexer_trivia
);
criterion_main!(benches);
