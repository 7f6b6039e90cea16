//! Library-level reduction scenarios.

use std::collections::HashSet;

use diagsift::aggregate::{Aggregator, Origin, RawStream};
use diagsift::reduce::{Blocks, Deduplicator, LineFilter, Marker, Reducer};

use crate::helpers::read_fixture;

#[test]
fn repeated_block_is_reported_once() {
    let text = "ERROR --- A\nLOG x\nERROR --- B\nLOG y\nERROR --- A\nLOG x\n";

    let log = Reducer::new("---").reduce_text(text);

    assert_eq!(log.render(), "ERROR --- A\nLOG x\nERROR --- B\nLOG y\n");
    assert_eq!(log.len(), 2);
}

#[test]
fn blocks_sharing_two_leading_lines_collapse_to_the_first() {
    let log = Reducer::default().reduce_text(&read_fixture("build_stderr.log"));

    let rendered = log.render();
    assert!(rendered.contains("LOG second free in slab_destroy"));
    assert!(!rendered.contains("LOG second free on a different path"));
}

#[test]
fn deduplication_is_idempotent() {
    let reducer = Reducer::default();
    let once = reducer.reduce_text(&read_fixture("build_stderr.log")).render();
    let twice = reducer.reduce_text(&once).render();

    assert_eq!(once, twice);
}

#[test]
fn output_keys_are_unique() {
    let text = read_fixture("build_stderr.log");
    let log = Deduplicator::new().dedup(Blocks::new(
        text.lines().map(str::to_string),
        Marker::new("---"),
    ));

    let keys = log.keys();
    let unique: HashSet<&String> = keys.iter().collect();
    assert_eq!(keys.len(), unique.len());
}

#[test]
fn filter_never_invents_lines() {
    let text = read_fixture("build_stderr.log");
    let filter = LineFilter::new(["ERROR", "LOG"]);

    let kept: Vec<&str> = text.lines().filter(|l| filter.matches(l)).collect();

    assert!(kept.iter().all(|l| text.lines().any(|orig| orig == *l)));
    assert!(kept.iter().all(|l| l.contains("ERROR") || l.contains("LOG")));
    assert!(!kept.iter().any(|l| l.contains("Elapsed")));
}

#[test]
fn aggregated_report_keeps_primary_before_auxiliary() {
    let primary = RawStream::from_text(Origin::Primary, &read_fixture("build_stderr.log"));
    let aux = RawStream::from_text(
        Origin::Auxiliary("fs/inode.diag.log".into()),
        "[ERROR] --- [Leak] --- fs/inode.c:88\nLOG kmalloc without kfree\n\
         [ERROR] --- [DoubleLock] --- fs/inode.c:12\nLOG lock held\n",
    );

    let aggregate = Aggregator::default().reduce_streams(&[primary, aux]);

    let headers: Vec<&str> = aggregate
        .report
        .blocks()
        .iter()
        .map(|b| b.lines()[0].as_str())
        .collect();
    assert_eq!(
        headers,
        [
            "[ERROR] --- [DoubleFree] --- mm/slab.c:120",
            "[ERROR] --- [Leak] --- fs/inode.c:88",
            "[ERROR] --- [DoubleLock] --- fs/inode.c:12",
        ]
    );
    assert_eq!(aggregate.dropped_blocks, 2);
    assert_eq!(aggregate.measure, ["[Elapsed Calculated] (mm/slab.c) 12"]);
}
