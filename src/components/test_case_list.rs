//! Test Case List Component
//!
//! Read-only table of the selected module's test cases.

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::warn;

use crate::context::AppContext;
use crate::models::TestCase;

/// Rows per table page
const PAGE_SIZE: usize = 5;

/// Number of pages needed for `len` rows (at least one)
pub fn page_count(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE).max(1)
}

/// Rows on `page` (0-based) as (serial number, test case)
pub fn page_rows(cases: &[TestCase], page: usize) -> Vec<(usize, TestCase)> {
    cases
        .iter()
        .enumerate()
        .skip(page * PAGE_SIZE)
        .take(PAGE_SIZE)
        .map(|(i, case)| (i + 1, case.clone()))
        .collect()
}

#[component]
pub fn TestCaseList() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (cases, set_cases) = signal(Vec::<TestCase>::new());
    let (page, set_page) = signal(0usize);

    // Refetch whenever the selection changes
    Effect::new(move |_| {
        let module_id = ctx.selected_module.get();
        spawn_local(async move {
            match ctx.api().list_test_cases(module_id).await {
                Ok(loaded) => {
                    set_cases.set(loaded);
                    set_page.set(0);
                }
                Err(e) => {
                    warn!(error = %e, ?module_id, "loading test cases failed");
                    ctx.notify_error(format!("Failed to load test cases: {}", e));
                }
            }
        });
    });

    let pages = move || cases.with(|c| page_count(c.len()));
    let rows = move || cases.with(|c| page_rows(c, page.get()));

    let heading = move || match ctx.selected_module.get() {
        Some(id) => ctx
            .hierarchy
            .with(|h| h.name(id).map(|n| format!("Test Cases: {}", n)))
            .unwrap_or_else(|| "Test Cases".to_string()),
        None => "Test Cases".to_string(),
    };

    view! {
        <section class="test-case-list">
            <h2>{heading}</h2>
            <table>
                <thead>
                    <tr>
                        <th>"S.no"</th>
                        <th>"Summary"</th>
                        <th>"Description"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=rows
                        key=|(serial, case)| (*serial, case.id)
                        children=|(serial, case)| view! {
                            <tr>
                                <td>{serial}</td>
                                <td>{case.summary}</td>
                                <td>{case.description}</td>
                            </tr>
                        }
                    />
                </tbody>
            </table>
            <div class="pager">
                <button
                    disabled=move || page.get() == 0
                    on:click=move |_| set_page.update(|p| *p = p.saturating_sub(1))
                >"‹"</button>
                <span>{move || format!("{} / {}", page.get() + 1, pages())}</span>
                <button
                    disabled=move || page.get() + 1 >= pages()
                    on:click=move |_| set_page.update(|p| *p += 1)
                >"›"</button>
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(id: u32) -> TestCase {
        TestCase {
            id,
            summary: format!("Case {}", id),
            description: String::new(),
            module_id: None,
        }
    }

    #[test]
    fn test_paging() {
        let cases: Vec<TestCase> = (10..22).map(case).collect();

        assert_eq!(page_count(cases.len()), 3);
        assert_eq!(page_count(0), 1);

        let last = page_rows(&cases, 2);
        let serials: Vec<usize> = last.iter().map(|(s, _)| *s).collect();
        assert_eq!(serials, vec![11, 12]);
        assert_eq!(last[0].1.id, 20);
        assert!(page_rows(&cases, 3).is_empty());
    }
}
