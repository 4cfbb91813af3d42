//! Scanning the same input twice gives the same tree

use rstest::rstest;

use cxxsense::{
    CompletionTokenProcessor, ExprId, ScanOptions, SourceToken, TextSize, TokenProcessor, tokenize,
};

use crate::helpers::scan_helpers::scan_cpp;

#[rstest]
#[case("a + b * c")]
#[case("std::vector<int>::")]
#[case("f([](int a){ return a; }, b.")]
#[case("x = y ? p->q : r[")]
fn test_repeated_scans_agree(#[case] source: &str) {
    let first = scan_cpp(source);
    let second = scan_cpp(source);
    assert_eq!(first.dump(), second.dump());
    assert_eq!(first.diagnostics(), second.diagnostics());
}

#[test]
fn test_processor_is_reusable_after_start() {
    let source = "a.b";
    let feed = |processor: &mut CompletionTokenProcessor| {
        let end = TextSize::of(source);
        processor.start(TextSize::new(0), TextSize::new(0), end);
        for token in tokenize(source) {
            processor.token(&SourceToken::from_lexed(&token, TextSize::new(0)));
        }
        processor.end(end, TextSize::new(2));
    };
    let mut processor = CompletionTokenProcessor::new(ScanOptions::all());
    feed(&mut processor);
    let first = processor.stack().len();
    feed(&mut processor);
    assert_eq!(processor.stack().len(), first);
    assert_eq!(
        processor.into_result().render().as_deref(),
        Some("(DOT . (VARIABLE a) (VARIABLE b))")
    );
}

// ============================================================================
// Fresh processors replay every prefix
// ============================================================================

fn source_tokens(source: &str) -> Vec<SourceToken> {
    tokenize(source)
        .into_iter()
        .map(|token| SourceToken::from_lexed(&token, TextSize::new(0)))
        .collect()
}

fn snapshot(processor: &CompletionTokenProcessor) -> (Vec<ExprId>, Vec<String>) {
    let stack = processor.stack().to_vec();
    let rendered = stack.iter().map(|&id| processor.arena().render(id)).collect();
    (stack, rendered)
}

fn started(source: &str) -> CompletionTokenProcessor {
    let mut processor = CompletionTokenProcessor::new(ScanOptions::all());
    processor.start(TextSize::new(0), TextSize::new(0), TextSize::of(source));
    processor
}

#[rstest]
#[case("a + b * c - d")]
#[case("x = y ? p->q : r[i]")]
#[case("std::map<K, V>::iterator it = m.begin(")]
#[case("f([&](int a){ return a * 2; }, v.")]
#[case("a < b; c.")]
fn test_prefix_rescan_reproduces_intermediate_stacks(#[case] source: &str) {
    let tokens = source_tokens(source);

    let mut original = started(source);
    let mut snapshots = vec![snapshot(&original)];
    for token in &tokens {
        original.token(token);
        snapshots.push(snapshot(&original));
    }

    for (k, expected) in snapshots.iter().enumerate() {
        let mut fresh = started(source);
        for token in &tokens[..k] {
            fresh.token(token);
        }
        assert_eq!(&snapshot(&fresh), expected, "prefix of {k} tokens of {source:?}");
    }
}
