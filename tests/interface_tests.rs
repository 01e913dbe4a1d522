//! Integration tests: interfaces rendered through an in-memory view binder

use std::cell::Cell;
use std::rc::Rc;

use pretty_assertions::assert_eq;

use loomview::{
    GetOrCreate, Interface, InterfaceBuilder, InterfaceConfig, InterfaceError, Partial,
    ProducerError, ScratchBuffer, TemplateError, ViewId, ViewRegistry,
};

const STATUS_TEMPLATE: &str = "STATUS

Branch:  {branch}
Head:    {head}

Your working directory is {state}.";

fn status_interface() -> Interface<ScratchBuffer> {
    InterfaceBuilder::new("status", STATUS_TEMPLATE)
        .partial(Partial::text("branch", || "main".to_string()))
        .partial(Partial::text("head", || "abc1234 initial commit".to_string()))
        .partial(Partial::text("state", || "clean".to_string()))
        .build(ScratchBuffer::new())
}

#[test]
fn test_status_interface_render() {
    let mut interface = status_interface();
    interface.render(true).expect("Should render");

    insta::assert_snapshot!(interface.binder().text(), @r"
    STATUS

    Branch:  main
    Head:    abc1234 initial commit

    Your working directory is clean.
    ");

    let buffer = interface.binder();
    assert_eq!(buffer.span_text("interface.branch"), Some("main"));
    assert_eq!(buffer.span_text("interface.head"), Some("abc1234 initial commit"));
    assert_eq!(buffer.span_text("interface.state"), Some("clean"));
    assert_eq!(buffer.cursor(), Some(0));
}

#[test]
fn test_point_update_keeps_sibling_spans_accurate() {
    let mut interface = status_interface();
    interface.render(true).expect("Should render");

    // Grow the branch span; head and state sit after it in the buffer.
    interface.update("branch", "feature/long-branch-name");

    let buffer = interface.binder();
    assert_eq!(
        buffer.span_text("interface.branch"),
        Some("feature/long-branch-name")
    );
    assert_eq!(buffer.span_text("interface.head"), Some("abc1234 initial commit"));
    assert_eq!(buffer.span_text("interface.state"), Some("clean"));
    assert!(buffer.text().contains("Branch:  feature/long-branch-name\n"));
}

#[test]
fn test_rerender_clears_stale_regions() {
    let mut interface = status_interface();
    interface.render(true).expect("Should render");
    interface.update("state", "dirty");

    // A fresh render recomputes everything; the point update is gone and
    // regions describe the new text only.
    interface.render(false).expect("Should render");

    let buffer = interface.binder();
    assert_eq!(buffer.span_text("interface.state"), Some("clean"));
    for region in interface.regions() {
        let value = &interface.binder().text()[region.start..region.end];
        assert!(!value.is_empty());
    }
}

#[test]
fn test_composite_section_end_to_end() {
    let mut interface = InterfaceBuilder::new("log", "pre {section} post")
        .partial(Partial::composite("section", || {
            (
                "[{inner}]".to_string(),
                vec![Partial::text("inner", || "content".to_string())],
            )
        }))
        .build(ScratchBuffer::new());

    interface.render(true).expect("Should render");

    let buffer = interface.binder();
    assert_eq!(buffer.text(), "pre [content] post");
    assert_eq!(buffer.span_text("interface.section"), Some("[content]"));
    assert_eq!(buffer.span_text("interface.inner"), Some("content"));
}

#[test]
fn test_singleton_interface_per_type_and_context() {
    let mut registry: ViewRegistry<Interface<ScratchBuffer>> = ViewRegistry::new();

    let first = registry.get_or_create("status", "/work/repo", || {
        let mut interface = status_interface();
        interface.render(true).expect("Should render");
        (ViewId(1), interface)
    });
    assert!(first.is_created());

    let second = registry.get_or_create("status", "/work/repo", || {
        panic!("Should reuse the live interface, not build a second one")
    });
    assert_eq!(second, GetOrCreate::Existing(ViewId(1)));

    // A different context gets its own view.
    let other = registry.get_or_create("status", "/work/other", || {
        (ViewId(2), status_interface())
    });
    assert!(other.is_created());
    assert_eq!(registry.len(), 2);

    // Closing the view frees the pair for re-creation.
    registry.remove(ViewId(1));
    let recreated = registry.get_or_create("status", "/work/repo", || {
        (ViewId(3), status_interface())
    });
    assert_eq!(recreated, GetOrCreate::Created(ViewId(3)));
}

#[test]
fn test_failed_producer_leaves_previous_render_visible() {
    let calls = Rc::new(Cell::new(0u32));
    let calls_in = Rc::clone(&calls);

    let mut interface = InterfaceBuilder::new("status", "state: {state}")
        .partial(Partial::try_text("state", move || {
            let n = calls_in.get() + 1;
            calls_in.set(n);
            if n > 1 {
                Err(ProducerError::new("backend went away"))
            } else {
                Ok("clean".to_string())
            }
        }))
        .build(ScratchBuffer::new());

    interface.render(true).expect("First render should succeed");
    assert_eq!(interface.binder().text(), "state: clean");

    let err = interface.render(true).unwrap_err();
    match err {
        InterfaceError::Template(TemplateError::Producer { key, .. }) => {
            assert_eq!(key, "state")
        }
        other => panic!("Expected Producer error, got {:?}", other),
    }

    // Content is computed before any buffer mutation, so the prior rendered
    // state is still intact.
    assert_eq!(interface.binder().text(), "state: clean");
    assert_eq!(interface.binder().span_text("interface.state"), Some("clean"));
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_strict_mode_reports_missing_partial_with_context() {
    let mut interface = InterfaceBuilder::new("status", "Branch: {branch}\n")
        .config(InterfaceConfig::default().with_strict(true))
        .build(ScratchBuffer::new());

    let err = interface.render(true).unwrap_err();
    let formatted = err.format(interface.template(), "<status>");
    assert!(formatted.contains("branch"));
    assert_eq!(interface.binder().text(), "");
}

#[test]
fn test_template_preprocessing_through_config() {
    let raw = "
        STATUS
        Branch: {branch}";

    let mut interface = InterfaceBuilder::new("status", raw)
        .config(
            InterfaceConfig::default()
                .with_skip_first_line(true)
                .with_dedent(8),
        )
        .partial(Partial::text("branch", || "main".to_string()))
        .build(ScratchBuffer::new());

    interface.render(true).expect("Should render");
    assert_eq!(interface.binder().text(), "STATUS\nBranch: main");
}

#[test]
fn test_repeated_placeholder_point_update_hits_all_occurrences() {
    let mut interface = InterfaceBuilder::new("diff", "{marker} hunk one\n{marker} hunk two\n")
        .partial(Partial::text("marker", || "--".to_string()))
        .build(ScratchBuffer::new());
    interface.render(true).expect("Should render");
    assert_eq!(interface.binder().text(), "-- hunk one\n-- hunk two\n");

    interface.update("marker", ">>>");
    assert_eq!(interface.binder().text(), ">>> hunk one\n>>> hunk two\n");
    assert_eq!(interface.binder().spans("interface.marker").len(), 2);
}
