// Contract tests for the MemberRepository operations, run against the
// in-memory adapter. Each test pins behavior the Postgres adapter must share:
// absence vs. error, total counts, ordering, and range windows.

use member_store::common::{PageRequest, RangeSpec, Sort};
use member_store::domains::member::{
    InMemoryMemberRepository, Member, MemberFilter, MemberRepository, StoreError,
};

/// Insertion order is the store's unsorted order.
fn seeded_repo() -> InMemoryMemberRepository {
    InMemoryMemberRepository::with_members([
        Member::new("1", "Alice", false),
        Member::new("2", "Alicia", false),
        Member::new("3", "Bob", true),
        Member::new("5", "Carol", true),
        Member::new("7", "Dave", true),
        Member::new("8", "Erin", false),
    ])
}

#[tokio::test]
async fn find_by_id_distinguishes_absent_from_present() {
    let repo = seeded_repo();

    let found = repo.find_by_id("2").await.unwrap();
    assert_eq!(found.unwrap().name.as_deref(), Some("Alicia"));

    let missing = repo.find_by_id("999").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn find_by_name_like_matches_pattern_only() {
    let repo = seeded_repo();

    let mut names: Vec<String> = repo
        .find_by_name_like("Ali%", &PageRequest::of(0, 10))
        .await
        .unwrap()
        .into_iter()
        .filter_map(|m| m.name)
        .collect();
    names.sort();
    assert_eq!(names, ["Alice", "Alicia"]);
}

#[tokio::test]
async fn find_top3_is_capped_and_name_ordered() {
    let repo = seeded_repo();
    // Four members match %; the cap trims to the first three by name.
    let top = repo.find_top3_by_name_like("%").await.unwrap();
    let names: Vec<&str> = top.iter().filter_map(|m| m.name.as_deref()).collect();
    assert_eq!(names, ["Alice", "Alicia", "Bob"]);

    let top = repo.find_top3_by_name_like("A%").await.unwrap();
    let names: Vec<&str> = top.iter().filter_map(|m| m.name.as_deref()).collect();
    assert_eq!(names, ["Alice", "Alicia"]);
}

#[tokio::test]
async fn find_first_by_name_like_returns_lowest_name_or_none() {
    let repo = seeded_repo();

    let first = repo.find_first_by_name_like("%i%").await.unwrap();
    assert_eq!(first.unwrap().name.as_deref(), Some("Alice"));

    let none = repo.find_first_by_name_like("Z%").await.unwrap();
    assert!(none.is_none());
}

#[tokio::test]
async fn find_by_blocked_reports_full_total_beyond_the_page() {
    let repo = seeded_repo();

    let page = repo
        .find_by_blocked(true, &PageRequest::of(0, 2))
        .await
        .unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total_count, 3);
    assert_eq!(page.total_pages(), 2);
    assert!(page.items.iter().all(|m| m.blocked));

    let second = repo
        .find_by_blocked(true, &PageRequest::of(1, 2))
        .await
        .unwrap();
    assert_eq!(second.items.len(), 1);
    assert_eq!(second.total_count, 3);
}

#[tokio::test]
async fn find_all_combines_filter_paging_and_sort() {
    let repo = seeded_repo();

    let filter = MemberFilter::Blocked(false).and(MemberFilter::name_like("%i%"));
    let request = PageRequest::of(0, 10).with_sort(Sort::by_desc("name"));
    let members = repo.find_all(&filter, &request).await.unwrap();
    let names: Vec<&str> = members.iter().filter_map(|m| m.name.as_deref()).collect();
    assert_eq!(names, ["Erin", "Alicia", "Alice"]);
}

#[tokio::test]
async fn get_range_windows_the_match_order() {
    let repo = seeded_repo();

    // Offset 2, limit 3 over all six members in store order.
    let slice = repo
        .get_range(&MemberFilter::All, &RangeSpec::of(2, 3))
        .await
        .unwrap();
    let ids: Vec<&str> = slice.iter().filter_map(|m| m.id.as_deref()).collect();
    assert_eq!(ids, ["3", "5", "7"]);

    // A window past the end is empty, not an error.
    let past_end = repo
        .get_range(&MemberFilter::All, &RangeSpec::of(50, 10))
        .await
        .unwrap();
    assert!(past_end.is_empty());
}

#[tokio::test]
async fn get_range_clamps_unvalidated_specs() {
    let repo = seeded_repo();

    let clamped = repo
        .get_range(&MemberFilter::All, &RangeSpec::of(-5, 2))
        .await
        .unwrap();
    assert_eq!(clamped.len(), 2);

    let empty = repo
        .get_range(&MemberFilter::All, &RangeSpec::of(0, 0))
        .await
        .unwrap();
    assert!(empty.is_empty());
}

#[tokio::test]
async fn find_first_by_blocked_orders_by_id_and_requires_a_match() {
    let repo = seeded_repo();

    // Blocked ids are {3, 5, 7}; lowest wins.
    let first = repo.find_first_by_blocked(true).await.unwrap();
    assert_eq!(first.id.as_deref(), Some("3"));

    let empty = InMemoryMemberRepository::new();
    let err = empty.find_first_by_blocked(true).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound));
}

#[tokio::test]
async fn unknown_sort_field_is_rejected() {
    let repo = seeded_repo();

    let request = PageRequest::of(0, 10).with_sort(Sort::by("created_at"));
    let err = repo.find_all(&MemberFilter::All, &request).await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidSort(field) if field == "created_at"));
}

#[tokio::test]
async fn repeated_reads_are_identical() {
    let repo = seeded_repo();
    let filter = MemberFilter::name_like("%");
    let request = PageRequest::of(0, 4).with_sort(Sort::by("name"));

    let first = repo.find_all(&filter, &request).await.unwrap();
    let second = repo.find_all(&filter, &request).await.unwrap();
    assert_eq!(first, second);

    let page_a = repo.find_by_blocked(false, &PageRequest::of(0, 2)).await.unwrap();
    let page_b = repo.find_by_blocked(false, &PageRequest::of(0, 2)).await.unwrap();
    assert_eq!(page_a, page_b);
}
