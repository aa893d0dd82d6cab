use teor_core::{
    advertised_url, candidate_url, is_pdf_record, pick_from_files, BillDetail, FileRecord,
};

fn pdf_file(download_url: &str) -> FileRecord {
    FileRecord {
        format: Some("pdf".into()),
        download_url: Some(download_url.into()),
        ..FileRecord::default()
    }
}

#[test]
fn advertised_url_wins_when_non_blank() {
    teor_logging::initialize_for_tests();

    let detail = BillDetail {
        id: 1,
        advertised_document_url: Some("https://example.org/teor/1".into()),
        ..BillDetail::default()
    };
    assert_eq!(advertised_url(&detail), Some("https://example.org/teor/1"));
}

#[test]
fn blank_or_missing_advertised_url_is_ignored() {
    let missing = BillDetail {
        id: 1,
        ..BillDetail::default()
    };
    assert_eq!(advertised_url(&missing), None);

    let blank = BillDetail {
        id: 1,
        advertised_document_url: Some("   ".into()),
        ..BillDetail::default()
    };
    assert_eq!(advertised_url(&blank), None);
}

#[test]
fn pdf_declared_format_returns_download_url() {
    let files = vec![pdf_file("X")];
    assert_eq!(pick_from_files(&files), Some("X".into()));
}

#[test]
fn classification_is_case_insensitive() {
    let by_format = FileRecord {
        format: Some("PDF".into()),
        ..FileRecord::default()
    };
    assert!(is_pdf_record(&by_format));

    let by_name = FileRecord {
        name: Some("Report.PDF".into()),
        ..FileRecord::default()
    };
    assert!(is_pdf_record(&by_name));

    let by_title = FileRecord {
        title: Some("Inteiro teor (PDF)".into()),
        ..FileRecord::default()
    };
    assert!(is_pdf_record(&by_title));

    let neither = FileRecord {
        format: Some("docx".into()),
        name: Some("report.docx".into()),
        title: Some("Anexo".into()),
        ..FileRecord::default()
    };
    assert!(!is_pdf_record(&neither));
}

#[test]
fn field_priority_prefers_download_url() {
    let file = FileRecord {
        format: Some("pdf".into()),
        download_url: Some("first".into()),
        document_url: Some("second".into()),
        url: Some("third".into()),
        ..FileRecord::default()
    };
    assert_eq!(candidate_url(&file), Some("first"));
}

#[test]
fn blank_fields_fall_through_to_next_candidate() {
    let file = FileRecord {
        download_url: Some("  ".into()),
        document_url: None,
        url: Some("last-resort".into()),
        ..FileRecord::default()
    };
    assert_eq!(candidate_url(&file), Some("last-resort"));
}

#[test]
fn pdf_classified_record_beats_earlier_untyped_one() {
    let files = vec![
        FileRecord {
            format: Some("docx".into()),
            url: Some("https://example.org/anexo.docx".into()),
            ..FileRecord::default()
        },
        pdf_file("https://example.org/teor.pdf"),
    ];
    assert_eq!(
        pick_from_files(&files),
        Some("https://example.org/teor.pdf".into())
    );
}

#[test]
fn falls_back_to_any_url_when_nothing_classifies_as_pdf() {
    let files = vec![
        FileRecord {
            format: Some("docx".into()),
            ..FileRecord::default()
        },
        FileRecord {
            name: Some("anexo.doc".into()),
            url: Some("https://example.org/anexo.doc".into()),
            ..FileRecord::default()
        },
    ];
    assert_eq!(
        pick_from_files(&files),
        Some("https://example.org/anexo.doc".into())
    );
}

#[test]
fn empty_or_all_blank_file_list_resolves_to_none() {
    assert_eq!(pick_from_files(&[]), None);

    let files = vec![
        FileRecord {
            format: Some("pdf".into()),
            download_url: Some("".into()),
            ..FileRecord::default()
        },
        FileRecord {
            url: Some("   ".into()),
            ..FileRecord::default()
        },
    ];
    assert_eq!(pick_from_files(&files), None);
}

#[test]
fn pdf_record_without_urls_does_not_stop_the_scan() {
    // A classified record with no usable URL must not shadow a later one.
    let files = vec![
        FileRecord {
            format: Some("pdf".into()),
            ..FileRecord::default()
        },
        pdf_file("https://example.org/2.pdf"),
    ];
    assert_eq!(
        pick_from_files(&files),
        Some("https://example.org/2.pdf".into())
    );
}
