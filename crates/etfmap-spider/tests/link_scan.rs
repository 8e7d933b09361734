use etfmap_spider::compositions::link::{absolutize, extract_csv_href};
use etfmap_spider::compositions::PROVIDER_DOMAIN;

#[test]
fn first_csv_href_wins_in_document_order() {
    let html = r#"
        <html><body>
            <a href="/about">About</a>
            <a href="/fund/US/ABC/1467271812596.ajax?fileType=csv">Holdings</a>
            <a href="/fund/US/ABC/other.ajax?fileType=csv">Second csv</a>
            <a href="/contact">Contact</a>
        </body></html>
    "#;

    assert_eq!(
        extract_csv_href(html).as_deref(),
        Some("/fund/US/ABC/1467271812596.ajax?fileType=csv")
    );
}

#[test]
fn page_without_anchors_yields_none() {
    let html = "<html><body><p>No downloads here.</p></body></html>";
    assert_eq!(extract_csv_href(html), None);
}

#[test]
fn anchors_without_csv_yield_none() {
    let html = r#"<a href="/a">one</a><a href="/b.xlsx">two</a>"#;
    assert_eq!(extract_csv_href(html), None);
}

#[test]
fn hrefless_anchor_does_not_abort_the_scan() {
    // named anchor carries no href; the scan must carry on past it
    let html = r#"
        <a name="top"></a>
        <a href="/fund/holdings.ajax?fileType=csv">Holdings</a>
    "#;

    assert_eq!(
        extract_csv_href(html).as_deref(),
        Some("/fund/holdings.ajax?fileType=csv")
    );
}

#[test]
fn relative_href_is_prefixed_with_the_provider_domain() {
    let href = "/fund/US/ABC/1467271812596.ajax?fileType=csv";
    assert_eq!(
        absolutize(href),
        format!("{PROVIDER_DOMAIN}{href}")
    );
}

#[test]
fn absolute_href_is_not_prefixed_twice() {
    let href = "https://www.ishares.com/fund/holdings.ajax?fileType=csv";
    assert_eq!(absolutize(href), href);
}
