// src/dev/generator.rs
// Random programs accepted by the while grammar, for fuzzing and property tests.

use rand::{Rng, seq::IndexedRandom};

const HEAD: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_";
const TAIL: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_";
const CMP: &[&str] = &["<", ">", "=", "!", "<=", ">=", "==", "!="];
const OPS: &[&str] = &["+", "-", "//", "**"];

fn ws<R: Rng + ?Sized>(rng: &mut R, out: &mut String, min: usize, max: usize) {
    for _ in 0..rng.random_range(min..=max) {
        out.push(if rng.random_bool(0.8) { ' ' } else { '\t' });
    }
}

fn ident<R: Rng + ?Sized>(rng: &mut R, out: &mut String) {
    out.push(HEAD[rng.random_range(0..HEAD.len())] as char);
    for _ in 0..rng.random_range(0..6) {
        out.push(TAIL[rng.random_range(0..TAIL.len())] as char);
    }
}

fn int<R: Rng + ?Sized>(rng: &mut R, out: &mut String) {
    for _ in 0..rng.random_range(1..=4) {
        out.push(char::from(b'0' + rng.random_range(0..10u8)));
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, xs: &[&'static str]) -> &'static str {
    xs.choose(rng).copied().unwrap_or(xs[0])
}

/// A `while` header followed by `body_lines` assignment lines.
pub fn gen_valid_while<R: Rng + ?Sized>(rng: &mut R, body_lines: usize) -> String {
    let mut s = String::new();

    for _ in 0..rng.random_range(0..=2) {
        s.push('\n');
    }
    s.push_str("while");
    ws(rng, &mut s, 1, 3);
    ident(rng, &mut s);
    ws(rng, &mut s, 0, 2);
    s.push_str(pick(rng, CMP));
    ws(rng, &mut s, 0, 2);
    ident(rng, &mut s);
    ws(rng, &mut s, 0, 2);
    s.push(':');
    ws(rng, &mut s, 0, 2);
    s.push('\n');

    for i in 0..body_lines {
        if rng.random_bool(0.1) {
            s.push('\n');
        }
        ws(rng, &mut s, 1, 8);
        ident(rng, &mut s);
        ws(rng, &mut s, 1, 2);
        s.push('=');
        ws(rng, &mut s, 0, 2);
        ident(rng, &mut s);
        ws(rng, &mut s, 0, 2);
        s.push_str(pick(rng, OPS));
        ws(rng, &mut s, 0, 2);
        if rng.random_bool(0.5) {
            ident(rng, &mut s);
        } else {
            int(rng, &mut s);
        }
        ws(rng, &mut s, 0, 2);
        if i + 1 < body_lines || rng.random_bool(0.5) {
            s.push('\n');
        }
    }

    if rng.random_bool(0.25) {
        s.push('#');
    }
    s
}
