mod common;

use moneytree_invoice::{layout_batch, render_batch, render_member};
use rayon::prelude::*;

#[test]
fn batch_pages_match_single_member_layouts() {
    common::init_logging();
    let ledgers = common::roster();
    let ctx = common::ctx();

    let batch = layout_batch(&ledgers, &ctx).unwrap();
    assert_eq!(batch.pages().len(), ledgers.len());

    for (i, l) in ledgers.iter().enumerate() {
        let single = layout_batch(std::slice::from_ref(l), &ctx).unwrap();
        assert_eq!(single.pages().len(), 1);
        assert_eq!(
            batch.pages()[i],
            single.pages()[0],
            "page {i} differs from the single render of {}",
            l.name
        );
    }
}

#[test]
fn page_count_is_written_to_the_page_tree() {
    let ctx = common::ctx();
    let bytes = render_batch(&common::roster(), &ctx).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("/Count 3"), "page tree count missing");
    assert!(text.contains("/FlateDecode"));
}

#[test]
fn empty_batch_renders_one_blank_page() {
    let doc = layout_batch(&[], &common::ctx()).unwrap();
    assert_eq!(doc.pages().len(), 1);
    assert!(doc.pages()[0].is_empty());

    let bytes = render_batch(&[], &common::ctx()).unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("/Count 1"));
}

#[test]
fn rendering_is_byte_for_byte_repeatable() {
    let ledgers = common::roster();
    let ctx = common::ctx();
    let a = render_batch(&ledgers, &ctx).unwrap();
    let b = render_batch(&ledgers, &ctx).unwrap();
    assert_eq!(a, b);
}

#[test]
fn parallel_renders_match_sequential() {
    let ledgers = common::roster();
    let ctx = common::ctx();

    let sequential: Vec<Vec<u8>> = ledgers
        .iter()
        .map(|l| render_member(l, &ctx).unwrap())
        .collect();
    let parallel: Vec<Vec<u8>> = ledgers
        .par_iter()
        .map(|l| render_member(l, &ctx).unwrap())
        .collect();

    assert_eq!(sequential, parallel);
}
