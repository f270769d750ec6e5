//! Slug derivation rules for project titles.
//!
//! Run with: `cargo test --test slug_test`
use studio_backend::db::projects::generate_slug;

#[test]
fn test_basic_title() {
    assert_eq!(generate_slug("My Portfolio Site"), "my-portfolio-site");
}

#[test]
fn test_punctuation_is_dropped() {
    assert_eq!(generate_slug("Hello, World!"), "hello-world");
    assert_eq!(generate_slug("Don't Panic"), "dont-panic");
    assert_eq!(generate_slug("C++ Rewrite"), "c-rewrite");
}

#[test]
fn test_separator_runs_collapse() {
    assert_eq!(generate_slug("A  Double   Spaced Title"), "a-double-spaced-title");
    assert_eq!(generate_slug("already-hyphenated--title"), "already-hyphenated-title");
    assert_eq!(generate_slug("mixed - separators"), "mixed-separators");
}

#[test]
fn test_underscores_survive() {
    assert_eq!(generate_slug("v2_final Build"), "v2_final-build");
}

#[test]
fn test_unicode_letters_survive() {
    assert_eq!(generate_slug("Café Menu"), "café-menu");
}

#[test]
fn test_nothing_left_yields_empty() {
    assert_eq!(generate_slug(""), "");
    assert_eq!(generate_slug("!!!"), "");
}

#[test]
fn test_output_alphabet() {
    // Whatever goes in, only word characters and hyphens come out.
    let slug = generate_slug("Q4 2025: the *big* re-launch (v2)");
    assert!(
        slug.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-'),
        "unexpected character in {slug:?}"
    );
    assert_eq!(slug, "q4-2025-the-big-re-launch-v2");
}
