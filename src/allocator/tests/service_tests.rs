//! Service tests for collision-safe code allocation.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use crate::allocator::{
    adapters::memory::InMemoryCodeDirectory,
    domain::{CodePrefix, EntityKind, SequentialCode},
    ports::{CodeDirectory, CodeDirectoryResult},
    services::{AllocatorError, CodeAllocator, MAX_ALLOCATION_ATTEMPTS},
};
use async_trait::async_trait;
use rstest::{fixture, rstest};
use std::sync::Arc;

mockall::mock! {
    Directory {}

    #[async_trait]
    impl CodeDirectory for Directory {
        async fn issued_codes(
            &self,
            entity: EntityKind,
            prefix: &CodePrefix,
        ) -> CodeDirectoryResult<Vec<String>>;

        async fn code_exists(&self, entity: EntityKind, code: &str) -> CodeDirectoryResult<bool>;
    }
}

#[fixture]
fn prefix() -> CodePrefix {
    CodePrefix::new("T-").expect("valid prefix")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn fresh_code_space_starts_at_offset(prefix: CodePrefix) {
    let directory = Arc::new(InMemoryCodeDirectory::new());
    let allocator = CodeAllocator::new(directory);

    let code = allocator
        .allocate(EntityKind::Task, &prefix, 11001)
        .await
        .expect("allocation should succeed");

    assert_eq!(code.to_string(), "T-11001");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn allocation_continues_from_maximum_issued_suffix(prefix: CodePrefix) {
    let directory = Arc::new(InMemoryCodeDirectory::new());
    directory
        .seed(EntityKind::Task, "T-11001")
        .expect("seed should succeed");
    directory
        .seed(EntityKind::Task, "T-11005")
        .expect("seed should succeed");
    let allocator = CodeAllocator::new(directory);

    let code = allocator
        .allocate(EntityKind::Task, &prefix, 11001)
        .await
        .expect("allocation should succeed");

    assert_eq!(code.to_string(), "T-11006");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unparseable_suffixes_fall_back_to_offset(prefix: CodePrefix) {
    let directory = Arc::new(InMemoryCodeDirectory::new());
    directory
        .seed(EntityKind::Task, "T-99999999999999999999999")
        .expect("seed should succeed");
    let allocator = CodeAllocator::new(directory);

    let code = allocator
        .allocate(EntityKind::Task, &prefix, 11001)
        .await
        .expect("allocation should succeed");

    assert_eq!(code.to_string(), "T-11001");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn seeded_codes_match_case_insensitively(prefix: CodePrefix) {
    let directory = Arc::new(InMemoryCodeDirectory::new());
    directory
        .seed(EntityKind::Task, "t-11001")
        .expect("seed should succeed");
    let allocator = CodeAllocator::new(directory);

    let code = allocator
        .allocate(EntityKind::Task, &prefix, 11001)
        .await
        .expect("allocation should succeed");

    assert_eq!(code.to_string(), "T-11002");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn candidate_collision_retries_to_next_free_code(prefix: CodePrefix) {
    let mut directory = MockDirectory::new();
    directory
        .expect_issued_codes()
        .returning(|_, _| Ok(Vec::new()));
    directory
        .expect_code_exists()
        .returning(|_, code| Ok(code == "T-11001"));
    let allocator = CodeAllocator::new(Arc::new(directory));

    let code = allocator
        .allocate(EntityKind::Task, &prefix, 11001)
        .await
        .expect("allocation should succeed");

    assert_eq!(code.to_string(), "T-11002");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn exhausted_retry_budget_fails_allocation(prefix: CodePrefix) {
    let mut directory = MockDirectory::new();
    directory
        .expect_issued_codes()
        .returning(|_, _| Ok(Vec::new()));
    directory.expect_code_exists().returning(|_, _| Ok(true));
    let allocator = CodeAllocator::new(Arc::new(directory));

    let result = allocator.allocate(EntityKind::Task, &prefix, 1).await;

    assert!(matches!(
        result,
        Err(AllocatorError::Exhausted {
            entity: EntityKind::Task,
            attempts: MAX_ALLOCATION_ATTEMPTS,
            ..
        })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn batch_allocation_continues_past_seeded_codes(prefix: CodePrefix) {
    let directory = Arc::new(InMemoryCodeDirectory::new());
    directory
        .seed(EntityKind::Task, "T-11002")
        .expect("seed should succeed");
    let allocator = CodeAllocator::new(directory);

    let codes = allocator
        .allocate_batch(EntityKind::Task, &prefix, 11001, 3)
        .await
        .expect("batch allocation should succeed");

    let rendered: Vec<String> = codes.iter().map(SequentialCode::to_string).collect();
    assert_eq!(rendered, vec!["T-11003", "T-11004", "T-11005"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn batch_allocation_issues_pairwise_distinct_codes(prefix: CodePrefix) {
    let directory = Arc::new(InMemoryCodeDirectory::new());
    let allocator = CodeAllocator::new(directory);

    let codes = allocator
        .allocate_batch(EntityKind::Task, &prefix, 11001, 1000)
        .await
        .expect("batch allocation should succeed");

    let mut numbers: Vec<u64> = codes.iter().map(SequentialCode::number).collect();
    numbers.sort_unstable();
    numbers.dedup();
    assert_eq!(numbers.len(), 1000);
    assert_eq!(numbers.first(), Some(&11001));
    assert_eq!(numbers.last(), Some(&12000));
}
