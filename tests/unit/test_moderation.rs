use warta_api::infrastructure::security::comment_moderator::CommentModerator;

fn approved(content: &str) -> bool {
    CommentModerator::with_default_denylist().assess(content).approved
}

#[test]
fn scenario_matrix_matches_expected_decisions() {
    let cases = [
        ("anjing kamu jelek", false),
        ("Artikel yang bagus, terima kasih", true),
        ("cek link ini https://spam.com", false),
        ("ok", false),
    ];
    for (content, expected) in cases {
        assert_eq!(approved(content), expected, "content: {:?}", content);
    }
}

#[test]
fn boundary_lengths() {
    // Five characters is the shortest accepted comment.
    assert!(!approved("abcd"));
    assert!(approved("abcde"));
}

#[test]
fn alnum_run_boundary() {
    let ok = format!("token {}", "x".repeat(29));
    let spam = format!("token {}", "x".repeat(30));
    assert!(approved(&ok));
    assert!(!approved(&spam));
}

#[test]
fn url_detection_requires_the_scheme_separator() {
    assert!(approved("belajar https dan tls itu penting"));
    assert!(!approved("buka https://contoh.id sekarang"));
    assert!(!approved("buka HTTP://CONTOH.ID sekarang"));
}

#[test]
fn denylist_is_case_insensitive() {
    assert!(!approved("AnJiNg"));
}
