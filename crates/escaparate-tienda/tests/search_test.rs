//! Search box: panel readiness, query round-trip, submit scenarios.

mod common;

use common::{quick, sel, storefront, BASE_URL};
use escaparate::mock::{Effect, MockDocument, NodeSpec};
use escaparate::require_testdata;
use escaparate_tienda::records::{testdata_path, SearchCase};
use escaparate_tienda::{MainPage, SearchResultsPage};

type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Open the search panel and return the page
fn page_with_open_search(
    doc: &MockDocument,
) -> Result<MainPage<'_, MockDocument>, Box<dyn std::error::Error>> {
    let page = MainPage::new(doc, BASE_URL).with_policy(quick());
    assert!(page.header_top().open_search()?);
    Ok(page)
}

#[test]
fn panel_readiness_requires_every_control() -> TestResult {
    // A panel missing its cancel button is not operable, even though the
    // field and submit button are fine.
    let doc = storefront();
    doc.apply(&Effect::Detach(sel::search_cancel()));
    let page = MainPage::new(&doc, BASE_URL).with_policy(quick());
    assert!(page.header_top().open_search()?);
    assert!(!page.search().panel_ready()?);
    Ok(())
}

#[test]
fn set_query_confirms_the_typed_value() -> TestResult {
    let doc = storefront();
    let page = page_with_open_search(&doc)?;
    assert!(page.search().set_query("горный велосипед")?);
    assert_eq!(
        page.search().query()?.as_deref(),
        Some("горный велосипед")
    );
    Ok(())
}

#[test]
fn set_query_replaces_a_previous_query() -> TestResult {
    let doc = storefront();
    let page = page_with_open_search(&doc)?;
    assert!(page.search().set_query("шлем")?);
    assert!(page.search().set_query("фонарь")?);
    assert_eq!(page.search().query()?.as_deref(), Some("фонарь"));
    Ok(())
}

#[test]
fn submitting_a_query_navigates_to_results() -> TestResult {
    let doc = storefront();
    doc.on_click(
        &sel::search_submit(),
        vec![Effect::Navigate(format!("{BASE_URL}search/?q=велосипед"))],
    );
    for _ in 0..3 {
        doc.insert(NodeSpec::new(sel::product_block()));
    }

    let page = page_with_open_search(&doc)?;
    assert!(page.search().set_query("велосипед")?);
    assert!(page.search().submit()?);

    assert!(page.url_changed_from_base()?, "url did not change after submit");
    let results = SearchResultsPage::new(&doc).with_policy(quick());
    assert!(results.result_count()? >= 3);
    Ok(())
}

#[test]
fn empty_query_does_not_navigate() -> TestResult {
    // No navigation is wired to the submit button: the site ignores empty
    // queries, and the page must still be on its base URL afterwards.
    let doc = storefront();
    let page = page_with_open_search(&doc)?;
    assert!(page.search().set_query("")?);
    assert!(page.search().submit()?);
    assert!(!page.url_changed_from_base()?);
    Ok(())
}

#[test]
fn search_cases_fixture_drives_the_scenarios() -> TestResult {
    let cases: Vec<SearchCase> = require_testdata!(testdata_path("testdata_search.json"));
    assert!(!cases.is_empty());

    for case in &cases {
        let doc = storefront();
        if case.expect_navigation {
            doc.on_click(
                &sel::search_submit(),
                vec![Effect::Navigate(format!("{BASE_URL}search/"))],
            );
        }
        if case.expect_results {
            for _ in 0..case.min_results.max(1) {
                doc.insert(NodeSpec::new(sel::product_block()));
            }
        }

        let page = page_with_open_search(&doc)?;
        assert!(
            page.search().set_query(&case.query)?,
            "{}: query not typed",
            case.description
        );
        assert!(page.search().submit()?, "{}: submit failed", case.description);

        if case.expect_navigation {
            assert!(
                page.url_changed_from_base()?,
                "{}: expected navigation",
                case.description
            );
            let results = SearchResultsPage::new(&doc).with_policy(quick());
            let count = results.result_count()?;
            if case.expect_results {
                assert!(
                    count >= case.min_results,
                    "{}: {count} results, expected at least {}",
                    case.description,
                    case.min_results
                );
            } else {
                assert_eq!(count, 0, "{}: expected an empty listing", case.description);
            }
        } else {
            assert!(
                !page.url_changed_from_base()?,
                "{}: unexpected navigation",
                case.description
            );
        }
    }
    Ok(())
}

mod round_trip_properties {
    use super::*;
    use escaparate::Locator;
    use escaparate_tienda::SearchBox;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Action confirmation round-trip: `set_query` reports true exactly
        /// when reading the field back yields the typed string.
        #[test]
        fn prop_set_query_round_trips(value in "[ -~]{0,24}") {
            let doc = MockDocument::new(BASE_URL);
            doc.insert(NodeSpec::new(Locator::id("input__search")));
            let search = SearchBox::new(&doc).with_policy(quick());

            prop_assert!(search.set_query(&value).unwrap());
            let query = search.query().unwrap();
            prop_assert_eq!(query.as_deref(), Some(value.as_str()));
        }
    }
}
