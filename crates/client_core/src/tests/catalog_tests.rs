use super::*;

fn record(name: &str, kind: &str) -> FileRecord {
    FileRecord::new(
        name,
        FileType::parse(kind),
        format!("https://files.example/{name}"),
    )
}

fn scenario_listing() -> Vec<FileRecord> {
    vec![
        record("archive", "Folder"),
        record("front.png", "Image"),
        record("back.jpg", "Image"),
        record("contract.pdf", "Document"),
    ]
}

fn mixed_listings() -> Vec<Vec<FileRecord>> {
    vec![
        Vec::new(),
        vec![record("only-folder", "folder")],
        scenario_listing(),
        vec![
            record("a.png", "IMAGE"),
            record("b", "folder"),
            record("c.bin", "archive"),
            record("d.docx", "document"),
            record("e", "FOLDER"),
            record("f.jpeg", "image"),
        ],
    ]
}

fn count_of(buckets: &[CategoryCount], id: &str) -> Option<usize> {
    buckets
        .iter()
        .find(|bucket| bucket.id == id)
        .map(|bucket| bucket.count)
}

#[test]
fn scenario_listing_counts_and_filters() {
    let listing = scenario_listing();
    let buckets = categorize(&listing, &CategoryLabels::default());

    assert_eq!(count_of(&buckets, "all"), Some(3));
    assert_eq!(count_of(&buckets, "image"), Some(2));
    assert_eq!(count_of(&buckets, "document"), Some(1));
    assert_eq!(count_of(&buckets, "folder"), None);

    let selector = TypeSelector::parse("image").expect("image selector");
    let images = filter_by_type(&listing, selector);
    assert_eq!(images.len(), 2);
    assert!(images.iter().all(|r| r.kind == FileType::Image));
}

#[test]
fn empty_listing_has_only_all_bucket() {
    let buckets = categorize(&[], &CategoryLabels::default());
    assert_eq!(
        buckets,
        vec![CategoryCount {
            id: "all".into(),
            label: "All".into(),
            count: 0,
        }]
    );
    assert!(filter_by_type(&[], TypeSelector::All).is_empty());
}

#[test]
fn all_bucket_equals_sum_of_typed_buckets() {
    for listing in mixed_listings() {
        let buckets = categorize(&listing, &CategoryLabels::default());
        let typed: usize = buckets.iter().skip(1).map(|b| b.count).sum();
        assert_eq!(buckets[0].id, "all");
        assert_eq!(buckets[0].count, typed, "listing: {listing:?}");
    }
}

#[test]
fn buckets_are_created_in_first_seen_order_with_labels() {
    let listing = vec![
        record("x.pdf", "document"),
        record("y.png", "image"),
        record("z.pdf", "Document"),
    ];
    let labels = CategoryLabels {
        all: "Alle".into(),
        image: "Bilder".into(),
        document: "Dokumente".into(),
        other: "Sonstige".into(),
    };
    let buckets = categorize(&listing, &labels);
    let ids: Vec<_> = buckets.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, ["all", "document", "image"]);
    assert_eq!(buckets[0].label, "Alle");
    assert_eq!(buckets[1].label, "Dokumente");
    assert_eq!(buckets[1].count, 2);
}

#[test]
fn filtered_lists_never_contain_folders_and_respect_the_selector() {
    let selectors = ["all", "image", "IMAGE", "document", "other", "folder"];
    for listing in mixed_listings() {
        for raw in selectors {
            let selector = TypeSelector::parse(raw).expect("known selector");
            let shown = filter_by_type(&listing, selector);
            assert!(shown.iter().all(|r| !r.kind.is_folder()));
            if let TypeSelector::Kind(kind) = selector {
                assert!(shown.iter().all(|r| r.kind == kind));
            }
        }
    }
}

#[test]
fn all_filter_plus_folders_partitions_the_listing() {
    for listing in mixed_listings() {
        let shown = filter_by_type(&listing, TypeSelector::All);
        let folders: Vec<_> = listing.iter().filter(|r| r.kind.is_folder()).collect();
        assert_eq!(shown.len() + folders.len(), listing.len());
        for record in &listing {
            assert!(shown.contains(record) || folders.contains(&record));
        }
    }
}

#[test]
fn selector_rejects_upload_sentinel_and_unknown_names() {
    assert_eq!(TypeSelector::parse("upload"), None);
    assert_eq!(TypeSelector::parse("Upload"), None);
    assert_eq!(TypeSelector::parse("videos"), None);
    assert_eq!(TypeSelector::parse("ALL"), Some(TypeSelector::All));
    assert_eq!(
        TypeSelector::parse("Document"),
        Some(TypeSelector::Kind(FileType::Document))
    );
}

#[test]
fn query_matches_name_stem_case_insensitively() {
    let file = record("Site+Survey%20North.pdf", "document");
    assert!(matches_query(&file, ""));
    assert!(matches_query(&file, "survey"));
    assert!(matches_query(&file, "SITE SURVEY"));
    assert!(!matches_query(&file, "pdf"));
}
