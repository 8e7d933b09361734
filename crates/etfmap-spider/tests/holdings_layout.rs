use etfmap_spider::compositions::holdings::{parse, CsvLayout, LayoutError, ISHARES_LAYOUT_V1};

const HEADER: &str = "Ticker,Name,Sector,Weight (%)";

// Assemble a payload the way the provider exports them: fixed preamble,
// header row, data rows, one footnote trailer.
fn payload(data_rows: usize) -> String {
    let mut lines = Vec::new();
    for i in 0..ISHARES_LAYOUT_V1.header_row {
        lines.push(format!("boilerplate line {i}"));
    }
    lines.push(HEADER.to_string());
    for i in 0..data_rows {
        lines.push(format!("HLD{i},Holding {i},Information Technology,{}.25", i + 1));
    }
    lines.push("The content of this file is subject to change.".to_string());
    lines.join("\n")
}

#[test]
fn data_rows_and_headers_are_sliced_from_the_payload() {
    let table = parse(&payload(5), &ISHARES_LAYOUT_V1).unwrap();

    assert_eq!(
        table.headers,
        vec!["Ticker", "Name", "Sector", "Weight (%)"]
    );
    assert_eq!(table.rows.len(), 5);
    assert_eq!(table.rows[0][0], "HLD0");
    assert_eq!(table.rows[4][3], "5.25");
}

#[test]
fn minimal_payload_yields_an_empty_table() {
    // preamble + header + trailer, zero data rows: the smallest well-formed file
    let table = parse(&payload(0), &ISHARES_LAYOUT_V1).unwrap();

    assert!(table.is_empty());
    assert_eq!(table.headers.len(), 4);
}

#[test]
fn short_payload_is_a_shape_error() {
    // one row short of the minimum
    let text = (0..ISHARES_LAYOUT_V1.min_rows() - 1)
        .map(|i| format!("line {i}"))
        .collect::<Vec<_>>()
        .join("\n");

    match parse(&text, &ISHARES_LAYOUT_V1) {
        Err(LayoutError::TooShort { rows, min }) => {
            assert_eq!(rows, 10);
            assert_eq!(min, 11);
        }
        other => panic!("expected TooShort, got {other:?}"),
    }
}

#[test]
fn quoted_fields_survive_the_round_trip() {
    let mut lines: Vec<String> = (0..9).map(|i| format!("boilerplate line {i}")).collect();
    lines.push(HEADER.to_string());
    lines.push("AAPL,\"Apple, Inc.\",Information Technology,7.1".to_string());
    lines.push("footnote".to_string());

    let table = parse(&lines.join("\n"), &ISHARES_LAYOUT_V1).unwrap();
    assert_eq!(table.rows[0][1], "Apple, Inc.");

    let out = table.to_csv_string().unwrap();
    assert!(out.starts_with("Ticker,Name,Sector,Weight (%)\n"));
    assert!(out.contains("\"Apple, Inc.\""));
}

#[test]
fn stray_quote_in_the_preamble_does_not_shift_the_table() {
    let mut lines: Vec<String> = (0..9).map(|i| format!("boilerplate line {i}")).collect();
    // unbalanced double quote in the disclaimer text
    lines[3] = "Fund Holdings \"as of Aug 20, 2026".to_string();
    lines.push(HEADER.to_string());
    lines.push("AAPL,Apple Inc,Information Technology,7.1".to_string());
    lines.push("footnote".to_string());

    let table = parse(&lines.join("\n"), &ISHARES_LAYOUT_V1).unwrap();

    assert_eq!(table.headers[0], "Ticker");
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0][0], "AAPL");
}

#[test]
fn trailer_rows_are_dropped() {
    let table = parse(&payload(3), &ISHARES_LAYOUT_V1).unwrap();
    for row in &table.rows {
        assert!(!row[0].contains("subject to change"));
    }
}

#[test]
fn alternate_layouts_are_honoured() {
    let layout = CsvLayout {
        header_row: 2,
        trailer_rows: 2,
    };
    let text = "meta\nmeta\nA,B\n1,2\n3,4\nfoot\nfoot";

    let table = parse(text, &layout).unwrap();
    assert_eq!(table.headers, vec!["A", "B"]);
    assert_eq!(table.rows, vec![vec!["1", "2"], vec!["3", "4"]]);
}
