// crates/guideline-audit-assess/src/tests.rs
// ============================================================================
// Module: Assessment Unit Tests
// Description: Tests for the in-memory document, built-in checks, and registry.
// Purpose: Validate selector dialect semantics and per-node verdicts.
// Dependencies: guideline-audit-core, tokio
// ============================================================================
//! ## Overview
//! Unit coverage for the selector dialect of [`MemDocument`], the verdict
//! logic of each built-in assessment, and registry resolution.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

use std::sync::Arc;

use guideline_audit_core::Assessment;
use guideline_audit_core::AssessmentCatalog;
use guideline_audit_core::AssessmentScope;
use guideline_audit_core::Case;
use guideline_audit_core::CaseSink;
use guideline_audit_core::CaseStatus;
use guideline_audit_core::DocumentQuery;
use guideline_audit_core::NodeRef;

use crate::AssessmentRegistry;
use crate::DataTableHeaders;
use crate::LabelPresent;
use crate::MemDocument;
use crate::ReadableText;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Runs an assessment over the document scope and collects its cases.
async fn collect_cases(assessment: &dyn Assessment, document: &MemDocument) -> Vec<Case> {
    let (sink, mut receiver) = CaseSink::channel();
    assessment
        .run(document, AssessmentScope::Document(document.root()), sink)
        .await
        .expect("assessment must not fail");
    let mut cases = Vec::new();
    while let Ok(case) = receiver.try_recv() {
        cases.push(case);
    }
    cases
}

/// Builds a document with a form containing one input per fixture need.
fn form_document() -> (MemDocument, NodeRef) {
    let mut document = MemDocument::new("html");
    let root = document.root();
    let form = document.append(&root, "form");
    (document, form)
}

// ============================================================================
// SECTION: Document Selectors
// ============================================================================

#[test]
fn scry_matches_by_tag_in_document_order() {
    let mut document = MemDocument::new("html");
    let root = document.root();
    let first = document.append(&root, "p");
    let section = document.append(&root, "div");
    let second = document.append(&section, "p");
    assert_eq!(document.scry("p", &root), vec![first, second]);
}

#[test]
fn scry_matches_by_class_and_tag_class() {
    let mut document = MemDocument::new("html");
    let root = document.root();
    let styled = document.append(&root, "span");
    document.add_class(&styled, "note");
    let _plain = document.append(&root, "span");
    let other = document.append(&root, "em");
    document.add_class(&other, "note");

    assert_eq!(document.scry(".note", &root), vec![styled.clone(), other]);
    assert_eq!(document.scry("span.note", &root), vec![styled]);
    assert_eq!(document.scry("p.note", &root), Vec::<NodeRef>::new());
}

#[test]
fn scry_star_matches_all_descendants_of_the_scope() {
    let mut document = MemDocument::new("html");
    let root = document.root();
    let outer = document.append(&root, "div");
    let inner = document.append(&outer, "p");
    let sibling = document.append(&root, "p");

    assert_eq!(document.scry("*", &outer), vec![inner.clone()]);
    assert_eq!(document.scry("*", &root), vec![outer, inner, sibling]);
}

#[test]
fn unsupported_selectors_match_nothing() {
    let mut document = MemDocument::new("html");
    let root = document.root();
    document.append(&root, "p");
    assert!(document.scry("p > span", &root).is_empty());
    assert!(document.scry("", &root).is_empty());
    assert!(document.scry(".a.b", &root).is_empty());
}

#[test]
fn text_concatenates_the_subtree() {
    let mut document = MemDocument::new("html");
    let root = document.root();
    let para = document.append(&root, "p");
    document.set_text(&para, "hello");
    let emphasis = document.append(&para, "em");
    document.set_text(&emphasis, "world");
    assert_eq!(document.text(&para), "hello world");
}

#[test]
fn foreign_references_resolve_to_nothing() {
    let document = MemDocument::new("html");
    let stale = NodeRef::new("mem:999");
    let foreign = NodeRef::new("doc:root");
    assert!(document.scry("p", &stale).is_empty());
    assert_eq!(document.tag(&foreign), None);
    assert_eq!(document.text(&stale), "");
    assert!(document.children(&foreign).is_empty());
}

// ============================================================================
// SECTION: Label Presence
// ============================================================================

#[tokio::test]
async fn input_referenced_by_label_for_passes() {
    let (mut document, form) = form_document();
    let label = document.append(&form, "label");
    document.set_attribute(&label, "for", "name");
    document.set_text(&label, "Your name");
    let input = document.append(&form, "input");
    document.set_attribute(&input, "id", "name");

    let cases = collect_cases(&LabelPresent::new(), &document).await;
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].status(), CaseStatus::Passed);
}

#[tokio::test]
async fn input_wrapped_by_readable_label_passes() {
    let (mut document, form) = form_document();
    let label = document.append(&form, "label");
    document.set_text(&label, "Subscribe");
    document.append(&label, "input");

    let cases = collect_cases(&LabelPresent::new(), &document).await;
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].status(), CaseStatus::Passed);
}

#[tokio::test]
async fn unlabelled_input_fails_with_a_message() {
    let (mut document, form) = form_document();
    document.append(&form, "input");

    let cases = collect_cases(&LabelPresent::new(), &document).await;
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].status(), CaseStatus::Failed);
    assert!(cases[0].metadata().message.is_some());
}

#[tokio::test]
async fn empty_label_does_not_count() {
    let (mut document, form) = form_document();
    let label = document.append(&form, "label");
    document.set_attribute(&label, "for", "name");
    let input = document.append(&form, "input");
    document.set_attribute(&input, "id", "name");

    let cases = collect_cases(&LabelPresent::new(), &document).await;
    assert_eq!(cases[0].status(), CaseStatus::Failed);
}

#[tokio::test]
async fn hidden_and_submit_inputs_are_inapplicable() {
    let (mut document, form) = form_document();
    let hidden = document.append(&form, "input");
    document.set_attribute(&hidden, "type", "hidden");
    let submit = document.append(&form, "input");
    document.set_attribute(&submit, "type", "Submit");

    let cases = collect_cases(&LabelPresent::new(), &document).await;
    assert_eq!(cases.len(), 2);
    assert!(cases.iter().all(|case| case.status() == CaseStatus::Inapplicable));
}

// ============================================================================
// SECTION: Data Table Headers
// ============================================================================

/// Appends a table with `rows` plain rows and returns its reference.
fn append_table(document: &mut MemDocument, rows: usize) -> NodeRef {
    let root = document.root();
    let table = document.append(&root, "table");
    for _ in 0..rows {
        let row = document.append(&table, "tr");
        document.append(&row, "td");
    }
    table
}

#[tokio::test]
async fn table_with_header_cells_passes() {
    let mut document = MemDocument::new("html");
    let table = append_table(&mut document, 3);
    let row = document.append(&table, "tr");
    let header = document.append(&row, "th");
    document.set_text(&header, "Amount");

    let cases = collect_cases(&DataTableHeaders::new(), &document).await;
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].status(), CaseStatus::Passed);
}

#[tokio::test]
async fn captioned_table_without_headers_fails() {
    let mut document = MemDocument::new("html");
    let table = append_table(&mut document, 2);
    let caption = document.append(&table, "caption");
    document.set_text(&caption, "Quarterly results");

    let cases = collect_cases(&DataTableHeaders::new(), &document).await;
    assert_eq!(cases[0].status(), CaseStatus::Failed);
}

#[tokio::test]
async fn short_plain_table_is_inapplicable() {
    let mut document = MemDocument::new("html");
    append_table(&mut document, 2);

    let cases = collect_cases(&DataTableHeaders::new(), &document).await;
    assert_eq!(cases[0].status(), CaseStatus::Inapplicable);
}

#[tokio::test]
async fn long_undeclared_table_is_cant_tell() {
    let mut document = MemDocument::new("html");
    append_table(&mut document, 5);

    let cases = collect_cases(&DataTableHeaders::new(), &document).await;
    assert_eq!(cases[0].status(), CaseStatus::CantTell);
}

// ============================================================================
// SECTION: Readable Text
// ============================================================================

#[tokio::test]
async fn headings_and_paragraphs_with_text_pass() {
    let mut document = MemDocument::new("html");
    let root = document.root();
    let heading = document.append(&root, "h1");
    document.set_text(&heading, "Annual report");
    let para = document.append(&root, "p");
    document.set_text(&para, "Results improved year over year.");

    let cases = collect_cases(&ReadableText::new(), &document).await;
    assert_eq!(cases.len(), 2);
    assert!(cases.iter().all(|case| case.status() == CaseStatus::Passed));
}

#[tokio::test]
async fn empty_and_punctuation_only_elements_fail() {
    let mut document = MemDocument::new("html");
    let root = document.root();
    document.append(&root, "p");
    let decorative = document.append(&root, "h2");
    document.set_text(&decorative, "***");

    let cases = collect_cases(&ReadableText::new(), &document).await;
    assert_eq!(cases.len(), 2);
    assert!(cases.iter().all(|case| case.status() == CaseStatus::Failed));
}

#[tokio::test]
async fn placeholder_phrases_fail() {
    let mut document = MemDocument::new("html");
    let root = document.root();
    let link = document.append(&root, "a");
    document.set_text(&link, "Click Here");

    let cases = collect_cases(&ReadableText::new(), &document).await;
    assert_eq!(cases[0].status(), CaseStatus::Failed);
}

// ============================================================================
// SECTION: Registry
// ============================================================================

#[test]
fn builtin_registry_lists_names_in_order() {
    let registry = AssessmentRegistry::with_builtin_assessments();
    let names: Vec<&str> = registry.names().collect();
    assert_eq!(names, vec!["data-table-headers", "label-present", "readable-text"]);
}

#[test]
fn unknown_names_resolve_to_none() {
    let registry = AssessmentRegistry::with_builtin_assessments();
    assert!(registry.get("no-such-check").is_none());
}

#[test]
fn registering_an_existing_name_replaces_it() {
    let mut registry = AssessmentRegistry::new();
    registry.register("check", LabelPresent::new());
    registry.register_shared("check", Arc::new(ReadableText::new()));
    assert_eq!(registry.len(), 1);
    let replaced = registry.get("check").expect("registered assessment");
    assert!(matches!(
        replaced.meta().binding,
        Some(guideline_audit_core::TestBinding::Custom)
    ));
}
