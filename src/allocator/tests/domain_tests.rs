//! Unit tests for allocator domain types.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use crate::allocator::domain::{AllocatorDomainError, CodePrefix, SequentialCode};
use rstest::rstest;

#[rstest]
#[case("T-")]
#[case("CG-")]
#[case(" P- ")]
fn code_prefix_accepts_trimmed_tokens(#[case] raw: &str) {
    let prefix = CodePrefix::new(raw).expect("prefix should validate");
    assert_eq!(prefix.as_str(), raw.trim());
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("T -")]
fn code_prefix_rejects_empty_or_spaced_tokens(#[case] raw: &str) {
    let result = CodePrefix::new(raw);
    assert_eq!(result, Err(AllocatorDomainError::InvalidPrefix(raw.to_owned())));
}

#[rstest]
#[case("T-11001", Some(11001))]
#[case("t-42", Some(42))]
#[case("T-", None)]
#[case("T-abc", None)]
#[case("P-99", None)]
#[case("T-99999999999999999999999", None)]
fn numeric_suffix_parses_case_insensitively(#[case] code: &str, #[case] expected: Option<u64>) {
    let prefix = CodePrefix::new("T-").expect("valid prefix");
    assert_eq!(prefix.numeric_suffix(code), expected);
}

#[rstest]
fn sequential_code_renders_prefix_then_number() {
    let prefix = CodePrefix::new("CG-").expect("valid prefix");
    let code = SequentialCode::new(prefix, 7);
    assert_eq!(code.to_string(), "CG-7");
    assert_eq!(code.number(), 7);
}
